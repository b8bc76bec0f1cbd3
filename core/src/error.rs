//! Error types for todo-core.

use thiserror::Error;

use crate::domain::todo::TodoId;

/// Main error type for the todo-core library.
///
/// `Validation`, `NotFound` and `InvalidQuery` are the caller-facing
/// taxonomy; everything else is an internal failure the HTTP layer reports
/// generically.
#[derive(Error, Debug)]
pub enum Error {
    /// Input violates an entity invariant
    #[error("validation error: {0}")]
    Validation(String),

    /// Referenced todo does not exist
    #[error("todo not found: {0}")]
    NotFound(TodoId),

    /// Unsupported filter or sort parameter
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// Database error
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// JSON error (tags column encoding)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for todo-core.
pub type Result<T> = std::result::Result<T, Error>;
