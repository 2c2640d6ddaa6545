//! Workflow error types for lifecycle validation.

use thiserror::Error;
use tradewind_shared::AppError;

use super::types::TransactionStatus;

/// Errors that can occur during workflow validation.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Transaction already left Draft and is immutable.
    #[error("Transaction already processed with status '{0}'")]
    AlreadyProcessed(TransactionStatus),

    /// The requested action is not one of approve/reject/cancel.
    #[error("Invalid action '{0}'")]
    InvalidAction(String),

    /// A transaction needs at least one line item.
    #[error("Items are required")]
    EmptyItems,
}

impl From<WorkflowError> for AppError {
    fn from(err: WorkflowError) -> Self {
        match err {
            WorkflowError::AlreadyProcessed(_) | WorkflowError::InvalidAction(_) => {
                Self::State(err.to_string())
            }
            WorkflowError::EmptyItems => Self::Validation(err.to_string()),
        }
    }
}
