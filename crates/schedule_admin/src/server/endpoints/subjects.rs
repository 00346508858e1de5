use std::sync::Arc;

use axum::extract::{Form, State};
use axum::response::{Html, Redirect};
use tracing::info;

use crate::server::types::{field, FormFields, ServerResult};
use crate::server::views;
use crate::types::AppState;
use crate::validate::{parse_record_id, validate_subject};

pub const SUBJECTS_ROUTE: &str = "/subjects";

/// POST /add_subject
pub async fn post_add_subject(
    State(s): State<Arc<AppState>>,
    Form(form): Form<FormFields>,
) -> ServerResult<Redirect> {
    info!("POST /add_subject");

    let subject = validate_subject(field(&form, "name")?)?;
    s.store.add_subject(&subject)?;

    Ok(Redirect::to(SUBJECTS_ROUTE))
}

/// POST /update_subject
pub async fn post_update_subject(
    State(s): State<Arc<AppState>>,
    Form(form): Form<FormFields>,
) -> ServerResult<Redirect> {
    info!("POST /update_subject");

    let raw_id = field(&form, "id")?;
    let subject = validate_subject(field(&form, "name")?)?;
    let id = parse_record_id(raw_id)?;
    s.store.update_subject(id, &subject)?;

    Ok(Redirect::to(SUBJECTS_ROUTE))
}

/// POST /delete_subject
pub async fn post_delete_subject(
    State(s): State<Arc<AppState>>,
    Form(form): Form<FormFields>,
) -> ServerResult<Redirect> {
    info!("POST /delete_subject");

    let id = parse_record_id(field(&form, "id")?)?;
    s.store.delete_subject(id)?;

    Ok(Redirect::to(SUBJECTS_ROUTE))
}

/// GET /subjects
pub async fn get_subjects(State(s): State<Arc<AppState>>) -> ServerResult<Html<String>> {
    info!("GET /subjects");

    let subjects = s.store.list_subjects()?;
    Ok(Html(views::render_subjects(&subjects)))
}
