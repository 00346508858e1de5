//! Database schema definitions

/// Enables foreign-key enforcement. SQLite keeps it off per connection by
/// default, so this runs on every freshly opened connection.
pub const ENABLE_FOREIGN_KEYS: &str = "PRAGMA foreign_keys = ON";

pub const CREATE_GROUPS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS groups (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    faculty TEXT NOT NULL,
    course INTEGER NOT NULL CHECK (course BETWEEN 1 AND 4),
    name TEXT NOT NULL,
    created_at DATETIME DEFAULT CURRENT_TIMESTAMP
)
"#;

pub const CREATE_SUBJECTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS subjects (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL
)
"#;

pub const CREATE_TEACHERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS teachers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL
)
"#;

/// Timetable rows. Removing a group, subject or teacher removes every row
/// that points at it.
pub const CREATE_SCHEDULE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS schedule (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    group_id INTEGER NOT NULL,
    subject_id INTEGER NOT NULL,
    teacher_id INTEGER NOT NULL,
    day_of_week TEXT NOT NULL CHECK (
        day_of_week IN ('понедельник', 'вторник', 'среда', 'четверг', 'пятница', 'суббота')
    ),
    start_time TEXT NOT NULL,
    end_time TEXT NOT NULL,
    room TEXT NOT NULL,
    lesson_type TEXT NOT NULL CHECK (
        lesson_type IN ('лекция', 'практика', 'лабораторная')
    ),
    created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
    FOREIGN KEY (group_id) REFERENCES groups (id) ON DELETE CASCADE,
    FOREIGN KEY (subject_id) REFERENCES subjects (id) ON DELETE CASCADE,
    FOREIGN KEY (teacher_id) REFERENCES teachers (id) ON DELETE CASCADE
)
"#;

/// All schema creation statements, parents before the table referencing them
pub fn all_schema_statements() -> [(&'static str, &'static str); 4] {
    [
        ("groups", CREATE_GROUPS_TABLE),
        ("subjects", CREATE_SUBJECTS_TABLE),
        ("teachers", CREATE_TEACHERS_TABLE),
        ("schedule", CREATE_SCHEDULE_TABLE),
    ]
}
