/// Row types as they are read back from the store
use chrono::NaiveDateTime;

#[derive(Debug, Clone, PartialEq)]
pub struct DbGroup {
    pub id: i64,
    pub faculty: String,
    pub course: i64,
    pub name: String,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DbSubject {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DbTeacher {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DbScheduleEntry {
    pub id: i64,
    pub group_id: i64,
    pub subject_id: i64,
    pub teacher_id: i64,
    pub day_of_week: String,
    pub start_time: String,   // HH:MM
    pub end_time: String,     // HH:MM
    pub room: String,
    pub lesson_type: String,
    pub created_at: Option<NaiveDateTime>,
}
