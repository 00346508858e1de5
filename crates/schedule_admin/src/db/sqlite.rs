//! SQLite-backed schedule store

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, Params, Row};
use tracing::debug;

use super::error::StoreResult;
use super::types::{DbGroup, DbScheduleEntry, DbSubject, DbTeacher};
use super::{format_time, schema, ScheduleStore};
use crate::validate::{NewGroup, NewScheduleEntry, NewSubject, NewTeacher};

/// A schedule store kept in a single SQLite file.
///
/// No connection is held between calls. Every operation opens the file,
/// switches on foreign keys, runs its statement and drops the connection.
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    /// Opens (creating if needed) the database at `path` and makes sure all
    /// four tables exist. Safe to call against an initialized database.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let store = Self { path };
        store.initialize_schema()?;
        Ok(store)
    }

    /// The database file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn initialize_schema(&self) -> StoreResult<()> {
        debug!("Initializing database schema at {}", self.path.display());
        self.with_connection(|conn| {
            for (table, stmt) in schema::all_schema_statements() {
                conn.execute(stmt, [])?;
                debug!("Table {} ready", table);
            }
            Ok(())
        })
    }

    /// Runs `f` on a connection that lives exactly as long as the call.
    /// The connection is dropped, and therefore closed, on both the success
    /// and the error path.
    fn with_connection<T>(
        &self,
        f: impl FnOnce(&Connection) -> rusqlite::Result<T>,
    ) -> StoreResult<T> {
        let conn = Connection::open(&self.path)?;
        conn.execute_batch(schema::ENABLE_FOREIGN_KEYS)?;
        let result = f(&conn);
        drop(conn);
        Ok(result?)
    }

    /// Executes one write statement.
    fn execute<P: Params>(&self, sql: &str, params: P) -> StoreResult<usize> {
        self.with_connection(|conn| conn.execute(sql, params))
    }

    /// Executes an update/delete by id, noting when nothing matched.
    fn execute_by_id<P: Params>(&self, what: &str, id: i64, sql: &str, params: P) -> StoreResult<()> {
        let changed = self.execute(sql, params)?;
        if changed == 0 {
            debug!("{} with id {} not found, nothing changed", what, id);
        }
        Ok(())
    }

    fn query_all<T>(
        &self,
        sql: &str,
        map: impl FnMut(&Row<'_>) -> rusqlite::Result<T>,
    ) -> StoreResult<Vec<T>> {
        self.with_connection(|conn| {
            let mut stmt = conn.prepare(sql)?;
            let rows = stmt.query_map([], map)?;
            rows.collect()
        })
    }
}

impl ScheduleStore for SqliteStore {
    // ========== Groups ==========

    fn add_group(&self, group: &NewGroup) -> StoreResult<()> {
        self.execute(
            "INSERT INTO groups (faculty, course, name) VALUES (?1, ?2, ?3)",
            params![group.faculty, group.course, group.name],
        )?;
        Ok(())
    }

    fn update_group(&self, id: i64, group: &NewGroup) -> StoreResult<()> {
        self.execute_by_id(
            "Group",
            id,
            "UPDATE groups SET faculty = ?1, course = ?2, name = ?3 WHERE id = ?4",
            params![group.faculty, group.course, group.name, id],
        )
    }

    fn delete_group(&self, id: i64) -> StoreResult<()> {
        self.execute_by_id("Group", id, "DELETE FROM groups WHERE id = ?1", [id])
    }

    fn list_groups(&self) -> StoreResult<Vec<DbGroup>> {
        self.query_all(
            "SELECT id, faculty, course, name, created_at FROM groups ORDER BY id",
            |row| {
                Ok(DbGroup {
                    id: row.get(0)?,
                    faculty: row.get(1)?,
                    course: row.get(2)?,
                    name: row.get(3)?,
                    created_at: row.get(4)?,
                })
            },
        )
    }

    // ========== Subjects ==========

    fn add_subject(&self, subject: &NewSubject) -> StoreResult<()> {
        self.execute("INSERT INTO subjects (name) VALUES (?1)", [&subject.name])?;
        Ok(())
    }

    fn update_subject(&self, id: i64, subject: &NewSubject) -> StoreResult<()> {
        self.execute_by_id(
            "Subject",
            id,
            "UPDATE subjects SET name = ?1 WHERE id = ?2",
            params![subject.name, id],
        )
    }

    fn delete_subject(&self, id: i64) -> StoreResult<()> {
        self.execute_by_id("Subject", id, "DELETE FROM subjects WHERE id = ?1", [id])
    }

    fn list_subjects(&self) -> StoreResult<Vec<DbSubject>> {
        self.query_all("SELECT id, name FROM subjects ORDER BY id", |row| {
            Ok(DbSubject {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })
    }

    // ========== Teachers ==========

    fn add_teacher(&self, teacher: &NewTeacher) -> StoreResult<()> {
        self.execute(
            "INSERT INTO teachers (first_name, last_name) VALUES (?1, ?2)",
            params![teacher.first_name, teacher.last_name],
        )?;
        Ok(())
    }

    fn update_teacher(&self, id: i64, teacher: &NewTeacher) -> StoreResult<()> {
        self.execute_by_id(
            "Teacher",
            id,
            "UPDATE teachers SET first_name = ?1, last_name = ?2 WHERE id = ?3",
            params![teacher.first_name, teacher.last_name, id],
        )
    }

    fn delete_teacher(&self, id: i64) -> StoreResult<()> {
        self.execute_by_id("Teacher", id, "DELETE FROM teachers WHERE id = ?1", [id])
    }

    fn list_teachers(&self) -> StoreResult<Vec<DbTeacher>> {
        self.query_all(
            "SELECT id, first_name, last_name FROM teachers ORDER BY id",
            |row| {
                Ok(DbTeacher {
                    id: row.get(0)?,
                    first_name: row.get(1)?,
                    last_name: row.get(2)?,
                })
            },
        )
    }

    // ========== Schedule ==========

    fn add_schedule_entry(&self, entry: &NewScheduleEntry) -> StoreResult<()> {
        self.execute(
            "INSERT INTO schedule (
                group_id, subject_id, teacher_id, day_of_week,
                start_time, end_time, room, lesson_type
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                entry.group_id,
                entry.subject_id,
                entry.teacher_id,
                entry.day_of_week.as_str(),
                format_time(&entry.start_time),
                format_time(&entry.end_time),
                entry.room,
                entry.lesson_type.as_str(),
            ],
        )?;
        Ok(())
    }

    fn update_schedule_entry(&self, id: i64, entry: &NewScheduleEntry) -> StoreResult<()> {
        self.execute_by_id(
            "Schedule entry",
            id,
            "UPDATE schedule SET
                group_id = ?1, subject_id = ?2, teacher_id = ?3, day_of_week = ?4,
                start_time = ?5, end_time = ?6, room = ?7, lesson_type = ?8
             WHERE id = ?9",
            params![
                entry.group_id,
                entry.subject_id,
                entry.teacher_id,
                entry.day_of_week.as_str(),
                format_time(&entry.start_time),
                format_time(&entry.end_time),
                entry.room,
                entry.lesson_type.as_str(),
                id,
            ],
        )
    }

    fn delete_schedule_entry(&self, id: i64) -> StoreResult<()> {
        self.execute_by_id(
            "Schedule entry",
            id,
            "DELETE FROM schedule WHERE id = ?1",
            [id],
        )
    }

    fn list_schedule_entries(&self) -> StoreResult<Vec<DbScheduleEntry>> {
        self.query_all(
            "SELECT id, group_id, subject_id, teacher_id, day_of_week,
                    start_time, end_time, room, lesson_type, created_at
             FROM schedule
             ORDER BY id",
            |row| {
                Ok(DbScheduleEntry {
                    id: row.get(0)?,
                    group_id: row.get(1)?,
                    subject_id: row.get(2)?,
                    teacher_id: row.get(3)?,
                    day_of_week: row.get(4)?,
                    start_time: row.get(5)?,
                    end_time: row.get(6)?,
                    room: row.get(7)?,
                    lesson_type: row.get(8)?,
                    created_at: row.get(9)?,
                })
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::contract;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, SqliteStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteStore::open(dir.path().join("BD").join("schedule.db")).unwrap();
        (dir, store)
    }

    #[test]
    fn test_insert_then_list() {
        let (_dir, store) = temp_store();
        contract::insert_then_list(&store);
    }

    #[test]
    fn test_update_in_place() {
        let (_dir, store) = temp_store();
        contract::update_in_place(&store);
    }

    #[test]
    fn test_missing_ids_are_noops() {
        let (_dir, store) = temp_store();
        contract::missing_ids_are_noops(&store);
    }

    #[test]
    fn test_delete_cascades() {
        let (_dir, store) = temp_store();
        contract::delete_cascades(&store);
    }

    #[test]
    fn test_dangling_reference_rejected() {
        let (_dir, store) = temp_store();
        contract::dangling_reference_rejected(&store);
    }

    #[test]
    fn test_reopen_keeps_data() {
        let (dir, store) = temp_store();
        store
            .add_subject(&NewSubject {
                name: "Физика".to_string(),
            })
            .unwrap();

        let reopened = SqliteStore::open(store.path().to_path_buf()).unwrap();
        let subjects = reopened.list_subjects().unwrap();
        assert_eq!(subjects.len(), 1);
        assert_eq!(subjects[0].name, "Физика");
        drop(dir);
    }

    #[test]
    fn test_engine_checks_course_range() {
        // Bypasses validation to make sure the table itself refuses the row.
        let (_dir, store) = temp_store();
        let err = store
            .add_group(&NewGroup {
                faculty: "ФКН".to_string(),
                course: 7,
                name: "БПИ-21".to_string(),
            })
            .unwrap_err();
        assert!(err.is_constraint());
        assert!(store.list_groups().unwrap().is_empty());
    }
}
