//! Error types for the budget tracker.
//!
//! Every domain and storage operation returns [`Result`]. The io layer maps each
//! variant onto an HTTP status; see `io::rest::error_response`.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    /// Input rejected before anything was written
    #[error("Validation error: {0}")]
    Validation(String),

    /// A record referenced a category id that does not exist
    #[error("Category not found: {0}")]
    CategoryNotFound(i64),

    /// Update or delete targeted a record that does not exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Duplicate: {0}")]
    Duplicate(String),

    /// Money arithmetic left the representable decimal range
    #[error("Amount overflow: {0}")]
    Overflow(String),

    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

impl TrackerError {
    pub fn validation(message: impl Into<String>) -> Self {
        TrackerError::Validation(message.into())
    }

    pub fn not_found(entity: &'static str, id: i64) -> Self {
        TrackerError::NotFound { entity, id }
    }

    pub fn overflow(context: impl Into<String>) -> Self {
        TrackerError::Overflow(context.into())
    }

    /// True for errors caused by caller input rather than by the store
    pub fn is_client_error(&self) -> bool {
        !matches!(self, TrackerError::Storage(_))
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;
