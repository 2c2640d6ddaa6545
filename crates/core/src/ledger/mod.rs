//! Party ledger effects for Tradewind.
//!
//! Computes the balance delta a transaction applies to its counterparty
//! and drafts the immutable debit/credit log entry recording it, plus
//! the exact reversal of a previously applied effect.
//!
//! # Modules
//!
//! - `types` - Entry statuses and drafts
//! - `engine` - Balance effect math and reversal

pub mod engine;
pub mod types;

#[cfg(test)]
mod engine_props;

pub use engine::LedgerEngine;
pub use types::{EntryStatus, LedgerContext, LedgerEffect, LedgerEntryDraft};
