//! In-process schedule store.
//!
//! Mirrors the SQLite store's behavior (ascending ids, cascading deletes,
//! rejection of dangling references) without touching the filesystem, so the
//! handlers can be exercised without a database.

use std::sync::{Mutex, MutexGuard};

use chrono::Utc;

use super::error::{StoreError, StoreResult};
use super::types::{DbGroup, DbScheduleEntry, DbSubject, DbTeacher};
use super::{format_time, ScheduleStore};
use crate::validate::{NewGroup, NewScheduleEntry, NewSubject, NewTeacher};

#[derive(Default)]
struct Tables {
    groups: Vec<DbGroup>,
    subjects: Vec<DbSubject>,
    teachers: Vec<DbTeacher>,
    schedule: Vec<DbScheduleEntry>,
    // Ids are never reused, like AUTOINCREMENT.
    next_group_id: i64,
    next_subject_id: i64,
    next_teacher_id: i64,
    next_schedule_id: i64,
}

fn next_id(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

impl Tables {
    fn check_references(&self, entry: &NewScheduleEntry) -> StoreResult<()> {
        let known = self.groups.iter().any(|g| g.id == entry.group_id)
            && self.subjects.iter().any(|s| s.id == entry.subject_id)
            && self.teachers.iter().any(|t| t.id == entry.teacher_id);
        if !known {
            return Err(StoreError::Constraint {
                message: "FOREIGN KEY constraint failed".to_string(),
            });
        }
        Ok(())
    }

    fn schedule_row(id: i64, entry: &NewScheduleEntry) -> DbScheduleEntry {
        DbScheduleEntry {
            id,
            group_id: entry.group_id,
            subject_id: entry.subject_id,
            teacher_id: entry.teacher_id,
            day_of_week: entry.day_of_week.as_str().to_string(),
            start_time: format_time(&entry.start_time),
            end_time: format_time(&entry.end_time),
            room: entry.room.clone(),
            lesson_type: entry.lesson_type.as_str().to_string(),
            created_at: Some(Utc::now().naive_utc()),
        }
    }
}

/// A [`ScheduleStore`] held entirely in memory.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The guard is the "connection": it is held for one operation only.
    fn acquire(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ScheduleStore for MemoryStore {
    fn add_group(&self, group: &NewGroup) -> StoreResult<()> {
        let mut t = self.acquire();
        let id = next_id(&mut t.next_group_id);
        t.groups.push(DbGroup {
            id,
            faculty: group.faculty.clone(),
            course: group.course,
            name: group.name.clone(),
            created_at: Some(Utc::now().naive_utc()),
        });
        Ok(())
    }

    fn update_group(&self, id: i64, group: &NewGroup) -> StoreResult<()> {
        let mut t = self.acquire();
        if let Some(row) = t.groups.iter_mut().find(|g| g.id == id) {
            row.faculty = group.faculty.clone();
            row.course = group.course;
            row.name = group.name.clone();
        }
        Ok(())
    }

    fn delete_group(&self, id: i64) -> StoreResult<()> {
        let mut t = self.acquire();
        t.groups.retain(|g| g.id != id);
        t.schedule.retain(|e| e.group_id != id);
        Ok(())
    }

    fn list_groups(&self) -> StoreResult<Vec<DbGroup>> {
        Ok(self.acquire().groups.clone())
    }

    fn add_subject(&self, subject: &NewSubject) -> StoreResult<()> {
        let mut t = self.acquire();
        let id = next_id(&mut t.next_subject_id);
        t.subjects.push(DbSubject {
            id,
            name: subject.name.clone(),
        });
        Ok(())
    }

    fn update_subject(&self, id: i64, subject: &NewSubject) -> StoreResult<()> {
        let mut t = self.acquire();
        if let Some(row) = t.subjects.iter_mut().find(|s| s.id == id) {
            row.name = subject.name.clone();
        }
        Ok(())
    }

    fn delete_subject(&self, id: i64) -> StoreResult<()> {
        let mut t = self.acquire();
        t.subjects.retain(|s| s.id != id);
        t.schedule.retain(|e| e.subject_id != id);
        Ok(())
    }

    fn list_subjects(&self) -> StoreResult<Vec<DbSubject>> {
        Ok(self.acquire().subjects.clone())
    }

    fn add_teacher(&self, teacher: &NewTeacher) -> StoreResult<()> {
        let mut t = self.acquire();
        let id = next_id(&mut t.next_teacher_id);
        t.teachers.push(DbTeacher {
            id,
            first_name: teacher.first_name.clone(),
            last_name: teacher.last_name.clone(),
        });
        Ok(())
    }

    fn update_teacher(&self, id: i64, teacher: &NewTeacher) -> StoreResult<()> {
        let mut t = self.acquire();
        if let Some(row) = t.teachers.iter_mut().find(|r| r.id == id) {
            row.first_name = teacher.first_name.clone();
            row.last_name = teacher.last_name.clone();
        }
        Ok(())
    }

    fn delete_teacher(&self, id: i64) -> StoreResult<()> {
        let mut t = self.acquire();
        t.teachers.retain(|r| r.id != id);
        t.schedule.retain(|e| e.teacher_id != id);
        Ok(())
    }

    fn list_teachers(&self) -> StoreResult<Vec<DbTeacher>> {
        Ok(self.acquire().teachers.clone())
    }

    fn add_schedule_entry(&self, entry: &NewScheduleEntry) -> StoreResult<()> {
        let mut t = self.acquire();
        t.check_references(entry)?;
        let id = next_id(&mut t.next_schedule_id);
        t.schedule.push(Tables::schedule_row(id, entry));
        Ok(())
    }

    fn update_schedule_entry(&self, id: i64, entry: &NewScheduleEntry) -> StoreResult<()> {
        let mut t = self.acquire();
        let Some(pos) = t.schedule.iter().position(|e| e.id == id) else {
            return Ok(());
        };
        t.check_references(entry)?;
        let created_at = t.schedule[pos].created_at;
        t.schedule[pos] = DbScheduleEntry {
            created_at,
            ..Tables::schedule_row(id, entry)
        };
        Ok(())
    }

    fn delete_schedule_entry(&self, id: i64) -> StoreResult<()> {
        self.acquire().schedule.retain(|e| e.id != id);
        Ok(())
    }

    fn list_schedule_entries(&self) -> StoreResult<Vec<DbScheduleEntry>> {
        Ok(self.acquire().schedule.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::contract;

    #[test]
    fn test_insert_then_list() {
        contract::insert_then_list(&MemoryStore::new());
    }

    #[test]
    fn test_update_in_place() {
        contract::update_in_place(&MemoryStore::new());
    }

    #[test]
    fn test_missing_ids_are_noops() {
        contract::missing_ids_are_noops(&MemoryStore::new());
    }

    #[test]
    fn test_delete_cascades() {
        contract::delete_cascades(&MemoryStore::new());
    }

    #[test]
    fn test_dangling_reference_rejected() {
        contract::dangling_reference_rejected(&MemoryStore::new());
    }
}
