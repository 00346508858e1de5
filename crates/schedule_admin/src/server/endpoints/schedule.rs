use std::sync::Arc;

use axum::extract::{Form, State};
use axum::response::{Html, Redirect};
use tracing::info;

use crate::server::types::{field, FormFields, ServerResult};
use crate::server::views;
use crate::types::AppState;
use crate::validate::{parse_record_id, validate_schedule_entry, NewScheduleEntry};

pub const SCHEDULE_ROUTE: &str = "/schedule";

/// Reads and validates the eight timetable fields shared by add and update.
fn entry_from_form(form: &FormFields) -> ServerResult<NewScheduleEntry> {
    let entry = validate_schedule_entry(
        field(form, "group_id")?,
        field(form, "subject_id")?,
        field(form, "teacher_id")?,
        field(form, "day_of_week")?,
        field(form, "start_time")?,
        field(form, "end_time")?,
        field(form, "room")?,
        field(form, "lesson_type")?,
    )?;
    Ok(entry)
}

/// POST /add_schedule
///
/// The referenced group, subject and teacher are not looked up beforehand;
/// a dangling id is refused by the store.
pub async fn post_add_schedule(
    State(s): State<Arc<AppState>>,
    Form(form): Form<FormFields>,
) -> ServerResult<Redirect> {
    info!("POST /add_schedule");

    let entry = entry_from_form(&form)?;
    s.store.add_schedule_entry(&entry)?;

    Ok(Redirect::to(SCHEDULE_ROUTE))
}

/// POST /update_schedule
pub async fn post_update_schedule(
    State(s): State<Arc<AppState>>,
    Form(form): Form<FormFields>,
) -> ServerResult<Redirect> {
    info!("POST /update_schedule");

    let raw_id = field(&form, "id")?;
    let entry = entry_from_form(&form)?;
    let id = parse_record_id(raw_id)?;
    s.store.update_schedule_entry(id, &entry)?;

    Ok(Redirect::to(SCHEDULE_ROUTE))
}

/// POST /delete_schedule
pub async fn post_delete_schedule(
    State(s): State<Arc<AppState>>,
    Form(form): Form<FormFields>,
) -> ServerResult<Redirect> {
    info!("POST /delete_schedule");

    let id = parse_record_id(field(&form, "id")?)?;
    s.store.delete_schedule_entry(id)?;

    Ok(Redirect::to(SCHEDULE_ROUTE))
}

/// GET /schedule
pub async fn get_schedule(State(s): State<Arc<AppState>>) -> ServerResult<Html<String>> {
    info!("GET /schedule");

    let entries = s.store.list_schedule_entries()?;
    Ok(Html(views::render_schedule(&entries)))
}
