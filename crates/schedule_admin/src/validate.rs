//! Form validation for groups, subjects, teachers and schedule entries.
//!
//! Every validator parses raw form text into a typed payload and stops at the
//! first failing check. Messages are user-facing and returned verbatim in the
//! 400 response body.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveTime;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// `HH:MM`, tolerating one trailing newline the same way a `$` anchor would.
static TIME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{2}:\d{2}\n?$").expect("time pattern is valid"));

/// Lowest and highest course year a group can be in.
pub const COURSE_RANGE: std::ops::RangeInclusive<i64> = 1..=4;

/// Identifier fields that are checked for being positive integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdField {
    Group,
    Subject,
    Teacher,
    Record,
}

impl fmt::Display for IdField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            IdField::Group => "ID группы",
            IdField::Subject => "ID предмета",
            IdField::Teacher => "ID преподавателя",
            IdField::Record => "ID записи",
        };
        f.write_str(label)
    }
}

/// A rejected form submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Факультет должен быть непустой строкой")]
    EmptyFaculty,

    #[error("Курс должен быть числом")]
    CourseNotNumber,

    #[error("Курс должен быть числом от 1 до 4")]
    CourseOutOfRange,

    #[error("Название группы должно быть непустой строкой")]
    EmptyGroupName,

    #[error("Название предмета должно быть непустой строкой")]
    EmptySubjectName,

    #[error("Имя преподавателя должно быть непустой строкой")]
    EmptyFirstName,

    #[error("Фамилия преподавателя должна быть непустой строкой")]
    EmptyLastName,

    #[error("{0} должен быть числом")]
    IdNotNumber(IdField),

    #[error("{0} должен быть положительным числом")]
    IdNotPositive(IdField),

    #[error("Неверный день недели")]
    InvalidWeekday,

    #[error("Время начала должно быть в формате ЧЧ:ММ")]
    StartTimeFormat,

    #[error("Время окончания должно быть в формате ЧЧ:ММ")]
    EndTimeFormat,

    #[error("Некорректный формат времени")]
    InvalidTime,

    #[error("Время окончания должно быть позже времени начала")]
    EndNotAfterStart,

    #[error("Аудитория должна быть непустой строкой")]
    EmptyRoom,

    #[error("Неверный тип занятия")]
    InvalidLessonType,
}

/// Day of the week a class can be held on. Sunday has no classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    pub const ALL: [Weekday; 6] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    /// The value stored in the `day_of_week` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Monday => "понедельник",
            Weekday::Tuesday => "вторник",
            Weekday::Wednesday => "среда",
            Weekday::Thursday => "четверг",
            Weekday::Friday => "пятница",
            Weekday::Saturday => "суббота",
        }
    }
}

impl FromStr for Weekday {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Weekday::ALL
            .into_iter()
            .find(|day| day.as_str() == s)
            .ok_or(ValidationError::InvalidWeekday)
    }
}

/// Kind of class session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonType {
    Lecture,
    Practice,
    Laboratory,
}

impl LessonType {
    pub const ALL: [LessonType; 3] = [
        LessonType::Lecture,
        LessonType::Practice,
        LessonType::Laboratory,
    ];

    /// The value stored in the `lesson_type` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            LessonType::Lecture => "лекция",
            LessonType::Practice => "практика",
            LessonType::Laboratory => "лабораторная",
        }
    }
}

impl FromStr for LessonType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LessonType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or(ValidationError::InvalidLessonType)
    }
}

/// A validated group, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGroup {
    pub faculty: String,
    pub course: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubject {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTeacher {
    pub first_name: String,
    pub last_name: String,
}

/// A validated schedule entry. The referenced ids are only known to be
/// positive; whether the rows exist is up to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewScheduleEntry {
    pub group_id: i64,
    pub subject_id: i64,
    pub teacher_id: i64,
    pub day_of_week: Weekday,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub room: String,
    pub lesson_type: LessonType,
}

/// Parses an integer the lenient way form fields are expected to be read:
/// surrounding whitespace is ignored and an explicit sign is allowed.
/// Only ASCII digits count, with no `_` separators.
fn parse_integer(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

fn is_blank(raw: &str) -> bool {
    raw.trim().is_empty()
}

fn positive_id(raw: &str, field: IdField) -> Result<i64, ValidationError> {
    let id = parse_integer(raw).ok_or(ValidationError::IdNotNumber(field))?;
    if id <= 0 {
        return Err(ValidationError::IdNotPositive(field));
    }
    Ok(id)
}

/// Parses the `id` field of update and delete forms.
///
/// Unlike the reference ids of a schedule entry, zero and negative values are
/// accepted here: they simply match no row.
pub fn parse_record_id(raw: &str) -> Result<i64, ValidationError> {
    parse_integer(raw).ok_or(ValidationError::IdNotNumber(IdField::Record))
}

/// Checks faculty, course and name, in that order.
pub fn validate_group(faculty: &str, course: &str, name: &str) -> Result<NewGroup, ValidationError> {
    if is_blank(faculty) {
        return Err(ValidationError::EmptyFaculty);
    }

    let course = parse_integer(course).ok_or(ValidationError::CourseNotNumber)?;
    if !COURSE_RANGE.contains(&course) {
        return Err(ValidationError::CourseOutOfRange);
    }

    if is_blank(name) {
        return Err(ValidationError::EmptyGroupName);
    }

    Ok(NewGroup {
        faculty: faculty.to_string(),
        course,
        name: name.to_string(),
    })
}

pub fn validate_subject(name: &str) -> Result<NewSubject, ValidationError> {
    if is_blank(name) {
        return Err(ValidationError::EmptySubjectName);
    }

    Ok(NewSubject {
        name: name.to_string(),
    })
}

pub fn validate_teacher(first_name: &str, last_name: &str) -> Result<NewTeacher, ValidationError> {
    if is_blank(first_name) {
        return Err(ValidationError::EmptyFirstName);
    }
    if is_blank(last_name) {
        return Err(ValidationError::EmptyLastName);
    }

    Ok(NewTeacher {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
    })
}

/// Validates one timetable row.
///
/// Checks run in a fixed order and the first failure is returned:
/// the three ids, weekday, both time formats, time ordering, room and
/// finally the lesson type.
#[allow(clippy::too_many_arguments)]
pub fn validate_schedule_entry(
    group_id: &str,
    subject_id: &str,
    teacher_id: &str,
    day_of_week: &str,
    start_time: &str,
    end_time: &str,
    room: &str,
    lesson_type: &str,
) -> Result<NewScheduleEntry, ValidationError> {
    let group_id = positive_id(group_id, IdField::Group)?;
    let subject_id = positive_id(subject_id, IdField::Subject)?;
    let teacher_id = positive_id(teacher_id, IdField::Teacher)?;

    let day_of_week: Weekday = day_of_week.parse()?;

    if !TIME_PATTERN.is_match(start_time) {
        return Err(ValidationError::StartTimeFormat);
    }
    if !TIME_PATTERN.is_match(end_time) {
        return Err(ValidationError::EndTimeFormat);
    }

    let start = NaiveTime::parse_from_str(start_time, "%H:%M")
        .map_err(|_| ValidationError::InvalidTime)?;
    let end =
        NaiveTime::parse_from_str(end_time, "%H:%M").map_err(|_| ValidationError::InvalidTime)?;
    if start >= end {
        return Err(ValidationError::EndNotAfterStart);
    }

    if is_blank(room) {
        return Err(ValidationError::EmptyRoom);
    }

    let lesson_type: LessonType = lesson_type.parse()?;

    Ok(NewScheduleEntry {
        group_id,
        subject_id,
        teacher_id,
        day_of_week,
        start_time: start,
        end_time: end,
        room: room.to_string(),
        lesson_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(start: &str, end: &str) -> Result<NewScheduleEntry, ValidationError> {
        validate_schedule_entry("1", "2", "3", "понедельник", start, end, "101", "лекция")
    }

    #[test]
    fn test_valid_group() {
        for course in ["1", "2", "3", "4", " 2 ", "+3"] {
            let group = validate_group("ФКН", course, "БПИ-21").unwrap();
            assert_eq!(group.faculty, "ФКН");
            assert!(COURSE_RANGE.contains(&group.course));
        }
    }

    #[test]
    fn test_group_course_rejected() {
        for course in ["0", "5", "-1", "100"] {
            assert_eq!(
                validate_group("ФКН", course, "БПИ-21"),
                Err(ValidationError::CourseOutOfRange)
            );
        }
        for course in ["", "abc", "2.0", "два"] {
            assert_eq!(
                validate_group("ФКН", course, "БПИ-21"),
                Err(ValidationError::CourseNotNumber)
            );
        }
    }

    #[test]
    fn test_group_check_order() {
        // Faculty is reported before an equally broken course or name.
        assert_eq!(
            validate_group("   ", "9", ""),
            Err(ValidationError::EmptyFaculty)
        );
        assert_eq!(
            validate_group("ФКН", "9", ""),
            Err(ValidationError::CourseOutOfRange)
        );
        assert_eq!(
            validate_group("ФКН", "1", "\t\n"),
            Err(ValidationError::EmptyGroupName)
        );
    }

    #[test]
    fn test_subject_and_teacher() {
        assert!(validate_subject("Матанализ").is_ok());
        assert_eq!(validate_subject(" "), Err(ValidationError::EmptySubjectName));

        assert!(validate_teacher("Иван", "Петров").is_ok());
        assert_eq!(validate_teacher("", ""), Err(ValidationError::EmptyFirstName));
        assert_eq!(validate_teacher("Иван", "  "), Err(ValidationError::EmptyLastName));
        assert_eq!(
            ValidationError::EmptyFirstName.to_string(),
            "Имя преподавателя должно быть непустой строкой"
        );
    }

    #[test]
    fn test_valid_schedule_entry() {
        let e = entry("09:00", "10:30").unwrap();
        assert_eq!(e.group_id, 1);
        assert_eq!(e.day_of_week, Weekday::Monday);
        assert_eq!(e.lesson_type, LessonType::Lecture);
        assert_eq!(e.start_time.format("%H:%M").to_string(), "09:00");
    }

    #[test]
    fn test_schedule_ids() {
        let err = validate_schedule_entry("0", "x", "3", "среда", "09:00", "10:00", "1", "лекция");
        assert_eq!(err, Err(ValidationError::IdNotPositive(IdField::Group)));
        assert_eq!(
            err.unwrap_err().to_string(),
            "ID группы должен быть положительным числом"
        );

        let err = validate_schedule_entry("1", "x", "-3", "среда", "09:00", "10:00", "1", "лекция");
        assert_eq!(err, Err(ValidationError::IdNotNumber(IdField::Subject)));

        let err = validate_schedule_entry("1", "2", "-3", "среда", "09:00", "10:00", "1", "лекция");
        assert_eq!(err, Err(ValidationError::IdNotPositive(IdField::Teacher)));
    }

    #[test]
    fn test_schedule_weekday() {
        for day in ["воскресенье", "Monday", "Понедельник", ""] {
            let err = validate_schedule_entry("1", "2", "3", day, "09:00", "10:00", "1", "лекция");
            assert_eq!(err, Err(ValidationError::InvalidWeekday));
        }
        for day in Weekday::ALL {
            let ok =
                validate_schedule_entry("1", "2", "3", day.as_str(), "09:00", "10:00", "1", "лекция");
            assert_eq!(ok.unwrap().day_of_week, day);
        }
    }

    #[test]
    fn test_schedule_time_format() {
        assert_eq!(entry("9:00", "10:00"), Err(ValidationError::StartTimeFormat));
        assert_eq!(entry("09:00", "10:0"), Err(ValidationError::EndTimeFormat));
        assert_eq!(entry("09:00 ", "10:00"), Err(ValidationError::StartTimeFormat));
        assert_eq!(entry("25:00", "26:00"), Err(ValidationError::InvalidTime));
        assert_eq!(entry("09:00", "10:61"), Err(ValidationError::InvalidTime));
        // Passes the pattern, fails the clock parse.
        assert_eq!(entry("09:00\n", "10:00"), Err(ValidationError::InvalidTime));
    }

    #[test]
    fn test_schedule_time_ordering() {
        for (start, end) in [("10:00", "09:00"), ("10:00", "10:00"), ("23:59", "00:00")] {
            let err = entry(start, end).unwrap_err();
            assert_eq!(err, ValidationError::EndNotAfterStart);
            assert_eq!(
                err.to_string(),
                "Время окончания должно быть позже времени начала"
            );
        }
        assert!(entry("00:00", "00:01").is_ok());
    }

    #[test]
    fn test_schedule_room_and_lesson_type() {
        let err = validate_schedule_entry("1", "2", "3", "суббота", "09:00", "10:00", " ", "лекция");
        assert_eq!(err, Err(ValidationError::EmptyRoom));

        let err =
            validate_schedule_entry("1", "2", "3", "суббота", "09:00", "10:00", "101", "lecture");
        assert_eq!(err, Err(ValidationError::InvalidLessonType));

        let ok = validate_schedule_entry(
            "1", "2", "3", "суббота", "09:00", "10:00", "101", "лабораторная",
        );
        assert_eq!(ok.unwrap().lesson_type, LessonType::Laboratory);
    }

    #[test]
    fn test_course_accepts_ascii_digits_only() {
        for course in ["٢", "1_0", "\u{1f}2", "２"] {
            assert_eq!(
                validate_group("ФКН", course, "Б"),
                Err(ValidationError::CourseNotNumber),
                "{course:?}"
            );
        }
        assert_eq!(validate_group("ФКН", "\u{a0}2\t", "Б").unwrap().course, 2);
    }

    #[test]
    fn test_record_id() {
        assert_eq!(parse_record_id(" 42 "), Ok(42));
        assert_eq!(parse_record_id("0"), Ok(0));
        assert_eq!(
            parse_record_id("abc"),
            Err(ValidationError::IdNotNumber(IdField::Record))
        );
    }
}
