//! HTML listings for the four relations.
//!
//! Deliberately plain: a heading and one table per page. Every value coming
//! from the store is escaped before it is written out.

use std::fmt::Write;

use crate::db::{DbGroup, DbScheduleEntry, DbSubject, DbTeacher};

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Builds a full page with a single table.
fn page(title: &str, headers: &[&str], rows: Vec<Vec<String>>) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"ru\">\n<head><meta charset=\"utf-8\"><title>{0}</title></head>\n<body>\n<h1>{0}</h1>\n<table>\n<tr>",
        escape(title)
    );
    for h in headers {
        let _ = write!(html, "<th>{}</th>", escape(h));
    }
    html.push_str("</tr>\n");

    for row in rows {
        html.push_str("<tr>");
        for cell in row {
            let _ = write!(html, "<td>{}</td>", escape(&cell));
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</table>\n</body>\n</html>\n");
    html
}

pub fn render_groups(groups: &[DbGroup]) -> String {
    let rows = groups
        .iter()
        .map(|g| {
            vec![
                g.id.to_string(),
                g.faculty.clone(),
                g.course.to_string(),
                g.name.clone(),
            ]
        })
        .collect();
    page("Группы", &["ID", "Факультет", "Курс", "Название"], rows)
}

pub fn render_subjects(subjects: &[DbSubject]) -> String {
    let rows = subjects
        .iter()
        .map(|s| vec![s.id.to_string(), s.name.clone()])
        .collect();
    page("Предметы", &["ID", "Название"], rows)
}

pub fn render_teachers(teachers: &[DbTeacher]) -> String {
    let rows = teachers
        .iter()
        .map(|t| vec![t.id.to_string(), t.first_name.clone(), t.last_name.clone()])
        .collect();
    page("Преподаватели", &["ID", "Имя", "Фамилия"], rows)
}

pub fn render_schedule(entries: &[DbScheduleEntry]) -> String {
    let rows = entries
        .iter()
        .map(|e| {
            vec![
                e.id.to_string(),
                e.group_id.to_string(),
                e.subject_id.to_string(),
                e.teacher_id.to_string(),
                e.day_of_week.clone(),
                format!("{} - {}", e.start_time, e.end_time),
                e.room.clone(),
                e.lesson_type.clone(),
            ]
        })
        .collect();
    page(
        "Расписание",
        &[
            "ID",
            "Группа",
            "Предмет",
            "Преподаватель",
            "День",
            "Время",
            "Аудитория",
            "Тип",
        ],
        rows,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_are_escaped() {
        let html = render_subjects(&[DbSubject {
            id: 1,
            name: "<script>alert('x')</script>".to_string(),
        }]);
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_group_rows() {
        let html = render_groups(&[DbGroup {
            id: 3,
            faculty: "ФКН".to_string(),
            course: 2,
            name: "БПИ-21".to_string(),
            created_at: None,
        }]);
        assert!(html.contains("<td>3</td><td>ФКН</td><td>2</td><td>БПИ-21</td>"));
    }
}
