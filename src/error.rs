//! Error types for Aloion.

use thiserror::Error;

/// Common error type for Aloion.
#[derive(Error, Debug)]
pub enum AloionError {
    /// Database error.
    ///
    /// Errors from sqlx are converted into this variant with their message only.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Unique constraint violated (e.g. duplicate email).
    #[error("{0} already exists")]
    Conflict(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for AloionError {
    fn from(e: sqlx::Error) -> Self {
        AloionError::Database(e.to_string())
    }
}

/// Result type alias for Aloion operations.
pub type Result<T> = std::result::Result<T, AloionError>;
