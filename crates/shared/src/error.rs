//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// Every module-level error converts into one of these variants at the
/// service boundary. Callers receive a machine-readable kind plus a human
/// message; internal detail stays out of production-facing responses.
#[derive(Debug, Error)]
pub enum AppError {
    /// Validation error (missing fields, invalid enum value, malformed identifier).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Conflict (e.g., duplicate document number).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Invalid state transition or action on a processed transaction.
    #[error("Invalid state: {0}")]
    State(String),

    /// Sequence allocation retries exhausted; the whole operation may be retried later.
    #[error("Sequence allocation exhausted: {0}")]
    AllocationExhausted(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::NotFound(_) => 404,
            Self::Conflict(_) | Self::State(_) => 409,
            Self::AllocationExhausted(_) => 503,
            Self::Database(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::State(_) => "INVALID_STATE",
            Self::AllocationExhausted(_) => "ALLOCATION_EXHAUSTED",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}
