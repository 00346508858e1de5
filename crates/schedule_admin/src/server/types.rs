//! Request and error types shared by the endpoints.

use std::collections::HashMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

use crate::db::StoreError;
use crate::validate::ValidationError;

/// Raw `application/x-www-form-urlencoded` body.
pub type FormFields = HashMap<String, String>;

pub type ServerResult<T> = Result<T, ServerError>;

/// Everything a handler can fail with.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The submitted values were rejected
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A required form key was not submitted at all
    #[error("Отсутствует поле: {0}")]
    MissingField(&'static str),

    /// The store refused the write (dangling reference and the like)
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServerError::Validation(e) => {
                warn!("Rejected form: {}", e);
                StatusCode::BAD_REQUEST
            }
            ServerError::MissingField(field) => {
                warn!("Form is missing field {:?}", field);
                StatusCode::BAD_REQUEST
            }
            ServerError::Store(e) if e.is_constraint() => {
                warn!("Store refused write: {}", e);
                StatusCode::CONFLICT
            }
            ServerError::Store(e) => {
                error!("Store failure: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, self.to_string()).into_response()
    }
}

/// Looks up a required form field.
pub fn field<'a>(form: &'a FormFields, name: &'static str) -> ServerResult<&'a str> {
    form.get(name)
        .map(String::as_str)
        .ok_or(ServerError::MissingField(name))
}
