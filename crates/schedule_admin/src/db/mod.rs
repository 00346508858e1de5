/// Storage for groups, subjects, teachers and the timetable
mod error;
mod memory;
pub mod schema;
mod sqlite;
mod types;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use types::{DbGroup, DbScheduleEntry, DbSubject, DbTeacher};

use crate::validate::{NewGroup, NewScheduleEntry, NewSubject, NewTeacher};

/// Repository over the four schedule relations.
///
/// Each call is self-contained: it acquires whatever connection it needs,
/// runs a single statement and releases the connection before returning,
/// whether or not the statement succeeded.
///
/// Updates and deletes addressed at an id that does not exist succeed
/// without touching anything. Deleting a group, subject or teacher also
/// deletes the schedule entries that reference it. Referential integrity of
/// new schedule entries is the store's job; a dangling id surfaces as
/// [`StoreError::Constraint`].
pub trait ScheduleStore: Send + Sync {
    fn add_group(&self, group: &NewGroup) -> StoreResult<()>;
    fn update_group(&self, id: i64, group: &NewGroup) -> StoreResult<()>;
    fn delete_group(&self, id: i64) -> StoreResult<()>;
    fn list_groups(&self) -> StoreResult<Vec<DbGroup>>;

    fn add_subject(&self, subject: &NewSubject) -> StoreResult<()>;
    fn update_subject(&self, id: i64, subject: &NewSubject) -> StoreResult<()>;
    fn delete_subject(&self, id: i64) -> StoreResult<()>;
    fn list_subjects(&self) -> StoreResult<Vec<DbSubject>>;

    fn add_teacher(&self, teacher: &NewTeacher) -> StoreResult<()>;
    fn update_teacher(&self, id: i64, teacher: &NewTeacher) -> StoreResult<()>;
    fn delete_teacher(&self, id: i64) -> StoreResult<()>;
    fn list_teachers(&self) -> StoreResult<Vec<DbTeacher>>;

    fn add_schedule_entry(&self, entry: &NewScheduleEntry) -> StoreResult<()>;
    fn update_schedule_entry(&self, id: i64, entry: &NewScheduleEntry) -> StoreResult<()>;
    fn delete_schedule_entry(&self, id: i64) -> StoreResult<()>;
    fn list_schedule_entries(&self) -> StoreResult<Vec<DbScheduleEntry>>;
}

/// Formats a wall-clock time the way it is stored.
pub(crate) fn format_time(time: &chrono::NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Runs the same scenario against every store implementation.
#[cfg(test)]
pub(crate) mod contract {
    use super::*;
    use crate::validate::{validate_group, validate_schedule_entry, validate_subject, validate_teacher};

    fn group(faculty: &str, course: &str, name: &str) -> NewGroup {
        validate_group(faculty, course, name).unwrap()
    }

    fn entry(group_id: i64, subject_id: i64, teacher_id: i64) -> NewScheduleEntry {
        validate_schedule_entry(
            &group_id.to_string(),
            &subject_id.to_string(),
            &teacher_id.to_string(),
            "вторник",
            "10:00",
            "11:30",
            "305",
            "практика",
        )
        .unwrap()
    }

    /// Seeds one group, subject and teacher plus a schedule entry linking them.
    fn seed(store: &dyn ScheduleStore) {
        store.add_group(&group("ФКН", "2", "БПИ-21")).unwrap();
        store.add_subject(&validate_subject("Алгебра").unwrap()).unwrap();
        store
            .add_teacher(&validate_teacher("Иван", "Петров").unwrap())
            .unwrap();
        store.add_schedule_entry(&entry(1, 1, 1)).unwrap();
    }

    pub fn insert_then_list(store: &dyn ScheduleStore) {
        store.add_group(&group("ФКН", "2", "БПИ-21")).unwrap();
        store.add_group(&group("ФЭН", "4", "ЭК-18")).unwrap();

        let groups = store.list_groups().unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].faculty, "ФКН");
        assert_eq!(groups[0].course, 2);
        assert_eq!(groups[0].name, "БПИ-21");
        assert!(groups[0].created_at.is_some());
        assert!(groups[0].id < groups[1].id);
    }

    pub fn update_in_place(store: &dyn ScheduleStore) {
        seed(store);
        store
            .update_group(1, &group("ФКН", "3", "БПИ-21"))
            .unwrap();
        store
            .update_subject(1, &validate_subject("Геометрия").unwrap())
            .unwrap();
        store
            .update_teacher(1, &validate_teacher("Пётр", "Иванов").unwrap())
            .unwrap();

        let mut moved = entry(1, 1, 1);
        moved.room = "101".to_string();
        store.update_schedule_entry(1, &moved).unwrap();

        assert_eq!(store.list_groups().unwrap()[0].course, 3);
        assert_eq!(store.list_subjects().unwrap()[0].name, "Геометрия");
        assert_eq!(store.list_teachers().unwrap()[0].first_name, "Пётр");
        let entries = store.list_schedule_entries().unwrap();
        assert_eq!(entries[0].room, "101");
        assert_eq!(entries[0].start_time, "10:00");
        assert_eq!(entries[0].day_of_week, "вторник");
        assert_eq!(entries[0].lesson_type, "практика");
    }

    pub fn missing_ids_are_noops(store: &dyn ScheduleStore) {
        seed(store);
        store
            .update_group(999, &group("ЮФ", "1", "Ю-1"))
            .unwrap();
        store.delete_group(999).unwrap();
        store.delete_subject(-1).unwrap();
        store.delete_teacher(0).unwrap();
        store.delete_schedule_entry(42).unwrap();

        let groups = store.list_groups().unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "БПИ-21");
        assert_eq!(store.list_schedule_entries().unwrap().len(), 1);
    }

    pub fn delete_cascades(store: &dyn ScheduleStore) {
        seed(store);
        store.add_group(&group("ФКН", "1", "БПИ-24")).unwrap();
        store.add_subject(&validate_subject("Физика").unwrap()).unwrap();
        store.add_schedule_entry(&entry(2, 1, 1)).unwrap();
        store.add_schedule_entry(&entry(2, 2, 1)).unwrap();
        assert_eq!(store.list_schedule_entries().unwrap().len(), 3);

        store.delete_subject(1).unwrap();
        let entries = store.list_schedule_entries().unwrap();
        assert_eq!(entries.iter().map(|e| e.id).collect::<Vec<_>>(), vec![3]);
        assert_eq!(entries[0].subject_id, 2);

        store.add_schedule_entry(&entry(1, 2, 1)).unwrap();
        store.delete_group(1).unwrap();
        let entries = store.list_schedule_entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].group_id, 2);

        store.delete_teacher(1).unwrap();
        assert!(store.list_schedule_entries().unwrap().is_empty());
        assert_eq!(store.list_subjects().unwrap().len(), 1);
        assert_eq!(store.list_groups().unwrap().len(), 1);
    }

    pub fn dangling_reference_rejected(store: &dyn ScheduleStore) {
        seed(store);
        let err = store.add_schedule_entry(&entry(7, 1, 1)).unwrap_err();
        assert!(err.is_constraint(), "unexpected error: {err}");

        let mut bad_update = entry(1, 1, 1);
        bad_update.teacher_id = 9;
        let err = store.update_schedule_entry(1, &bad_update).unwrap_err();
        assert!(err.is_constraint(), "unexpected error: {err}");

        assert_eq!(store.list_schedule_entries().unwrap().len(), 1);
    }
}
