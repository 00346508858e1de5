//! Error types for the storage layer.

use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while talking to the schedule store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The storage engine rejected a write: dangling reference, failed CHECK
    #[error("Constraint violation: {message}")]
    Constraint { message: String },

    /// Any other database failure
    #[error("Database error: {0}")]
    Database(rusqlite::Error),

    /// The database file or its directory could not be prepared
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Returns true if the store refused the write because of its own
    /// integrity rules rather than failing.
    pub fn is_constraint(&self) -> bool {
        matches!(self, StoreError::Constraint { .. })
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(e, message)
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                StoreError::Constraint {
                    message: message.unwrap_or_else(|| e.to_string()),
                }
            }
            other => StoreError::Database(other),
        }
    }
}
