use std::sync::Arc;

use axum::extract::{Form, State};
use axum::response::{Html, Redirect};
use tracing::info;

use crate::server::types::{field, FormFields, ServerResult};
use crate::server::views;
use crate::types::AppState;
use crate::validate::{parse_record_id, validate_teacher};

pub const TEACHERS_ROUTE: &str = "/teachers";

/// POST /add_teacher
pub async fn post_add_teacher(
    State(s): State<Arc<AppState>>,
    Form(form): Form<FormFields>,
) -> ServerResult<Redirect> {
    info!("POST /add_teacher");

    let teacher = validate_teacher(field(&form, "first_name")?, field(&form, "last_name")?)?;
    s.store.add_teacher(&teacher)?;

    Ok(Redirect::to(TEACHERS_ROUTE))
}

/// POST /update_teacher
pub async fn post_update_teacher(
    State(s): State<Arc<AppState>>,
    Form(form): Form<FormFields>,
) -> ServerResult<Redirect> {
    info!("POST /update_teacher");

    let raw_id = field(&form, "id")?;
    let teacher = validate_teacher(field(&form, "first_name")?, field(&form, "last_name")?)?;
    let id = parse_record_id(raw_id)?;
    s.store.update_teacher(id, &teacher)?;

    Ok(Redirect::to(TEACHERS_ROUTE))
}

/// POST /delete_teacher
pub async fn post_delete_teacher(
    State(s): State<Arc<AppState>>,
    Form(form): Form<FormFields>,
) -> ServerResult<Redirect> {
    info!("POST /delete_teacher");

    let id = parse_record_id(field(&form, "id")?)?;
    s.store.delete_teacher(id)?;

    Ok(Redirect::to(TEACHERS_ROUTE))
}

/// GET /teachers
pub async fn get_teachers(State(s): State<Arc<AppState>>) -> ServerResult<Html<String>> {
    info!("GET /teachers");

    let teachers = s.store.list_teachers()?;
    Ok(Html(views::render_teachers(&teachers)))
}
