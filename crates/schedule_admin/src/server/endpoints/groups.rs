use std::sync::Arc;

use axum::extract::{Form, State};
use axum::response::{Html, Redirect};
use tracing::info;

use crate::server::types::{field, FormFields, ServerResult};
use crate::server::views;
use crate::types::AppState;
use crate::validate::{parse_record_id, validate_group};

pub const GROUPS_ROUTE: &str = "/groups";

/// POST /add_group
pub async fn post_add_group(
    State(s): State<Arc<AppState>>,
    Form(form): Form<FormFields>,
) -> ServerResult<Redirect> {
    info!("POST /add_group");

    let group = validate_group(
        field(&form, "faculty")?,
        field(&form, "course")?,
        field(&form, "name")?,
    )?;
    s.store.add_group(&group)?;

    Ok(Redirect::to(GROUPS_ROUTE))
}

/// POST /update_group
/// Updating an id that does not exist is not an error.
pub async fn post_update_group(
    State(s): State<Arc<AppState>>,
    Form(form): Form<FormFields>,
) -> ServerResult<Redirect> {
    info!("POST /update_group");

    let raw_id = field(&form, "id")?;
    let group = validate_group(
        field(&form, "faculty")?,
        field(&form, "course")?,
        field(&form, "name")?,
    )?;
    let id = parse_record_id(raw_id)?;
    s.store.update_group(id, &group)?;

    Ok(Redirect::to(GROUPS_ROUTE))
}

/// POST /delete_group
/// Also removes every schedule entry of the group.
pub async fn post_delete_group(
    State(s): State<Arc<AppState>>,
    Form(form): Form<FormFields>,
) -> ServerResult<Redirect> {
    info!("POST /delete_group");

    let id = parse_record_id(field(&form, "id")?)?;
    s.store.delete_group(id)?;

    Ok(Redirect::to(GROUPS_ROUTE))
}

/// GET /groups
pub async fn get_groups(State(s): State<Arc<AppState>>) -> ServerResult<Html<String>> {
    info!("GET /groups");

    let groups = s.store.list_groups()?;
    Ok(Html(views::render_groups(&groups)))
}
