pub mod groups;
pub mod schedule;
pub mod status;
pub mod subjects;
pub mod teachers;
