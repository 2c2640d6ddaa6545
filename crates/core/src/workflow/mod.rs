//! Transaction lifecycle management for Tradewind.
//!
//! This module implements the order/return state machine, action
//! validation, and line-item calculation.
//!
//! # Modules
//!
//! - `types` - Document domain types (TransactionType, TransactionStatus, LineItem)
//! - `error` - Workflow-specific error types
//! - `service` - Action validation, approval flags, line-item math

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::WorkflowError;
pub use service::{ApprovalFlags, WorkflowService};
pub use types::{
    LineItem, LineItemInput, PartyKind, Priority, ProcessAction, TransactionStatus,
    TransactionType,
};
