//! Numbering error types.

use thiserror::Error;
use tradewind_shared::AppError;

/// Errors that can occur while planning document numbers.
#[derive(Debug, Error)]
pub enum NumberingError {
    /// Manual identifier was empty after trimming.
    #[error("Document number must not be empty")]
    EmptyIdentifier,

    /// Manual identifier contains characters outside letters, digits, dash.
    #[error("Invalid document number '{0}': only letters, digits and '-' are allowed")]
    InvalidIdentifier(String),

    /// Manual mode was requested but no identifier was supplied.
    #[error("Manual numbering requires a document number")]
    MissingManualIdentifier,

    /// Period override is not YYYYMM or YYYY.
    #[error("Invalid period '{0}': use YYYYMM or YYYY")]
    InvalidPeriod(String),

    /// Document type code is not recognized.
    #[error("Unsupported sequence type: {0}")]
    UnsupportedDocumentType(String),
}

impl From<NumberingError> for AppError {
    fn from(err: NumberingError) -> Self {
        Self::Validation(err.to_string())
    }
}
