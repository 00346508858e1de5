use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::server::endpoints::{groups, schedule, status, subjects, teachers};
use crate::types::AppState;

mod endpoints;
mod types;
mod views;

pub use types::{ServerError, ServerResult};

/// Builds the application router.
///
/// Each entity gets `POST /add_*`, `/update_*` and `/delete_*` form routes
/// that redirect to its `GET` listing (`/groups`, `/subjects`, `/teachers`,
/// `/schedule`). `GET /health` reports liveness and the database in use.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    let group_router = Router::new()
        .route("/add_group", post(groups::post_add_group))
        .route("/update_group", post(groups::post_update_group))
        .route("/delete_group", post(groups::post_delete_group))
        .route(groups::GROUPS_ROUTE, get(groups::get_groups));

    let subject_router = Router::new()
        .route("/add_subject", post(subjects::post_add_subject))
        .route("/update_subject", post(subjects::post_update_subject))
        .route("/delete_subject", post(subjects::post_delete_subject))
        .route(subjects::SUBJECTS_ROUTE, get(subjects::get_subjects));

    let teacher_router = Router::new()
        .route("/add_teacher", post(teachers::post_add_teacher))
        .route("/update_teacher", post(teachers::post_update_teacher))
        .route("/delete_teacher", post(teachers::post_delete_teacher))
        .route(teachers::TEACHERS_ROUTE, get(teachers::get_teachers));

    let schedule_router = Router::new()
        .route("/add_schedule", post(schedule::post_add_schedule))
        .route("/update_schedule", post(schedule::post_update_schedule))
        .route("/delete_schedule", post(schedule::post_delete_schedule))
        .route(schedule::SCHEDULE_ROUTE, get(schedule::get_schedule));

    Router::new()
        .route("/health", get(status::get_health))
        .merge(group_router)
        .merge(subject_router)
        .merge(teacher_router)
        .merge(schedule_router)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
