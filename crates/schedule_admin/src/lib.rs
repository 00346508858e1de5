//! Administration backend for a university class schedule.
//!
//! Groups, subjects, teachers and timetable entries are stored in SQLite and
//! edited through HTML form posts. Input is validated before anything is
//! written; referential integrity is left to the database.

pub mod config;
pub mod db;
pub mod server;
pub mod types;
pub mod validate;
