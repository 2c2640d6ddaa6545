//! Inventory effect planning for Tradewind.
//!
//! Computes stock deltas, weighted-average cost updates, and immutable
//! movement drafts for a transaction's line items, plus exact reversals.
//! Persistence of movements and stock rows lives in the database layer.
//!
//! # Modules
//!
//! - `types` - Stock snapshots, movement drafts, event labels
//! - `engine` - Delta/cost math and reversal planning

pub mod engine;
pub mod types;

#[cfg(test)]
mod engine_props;

pub use engine::InventoryEngine;
pub use types::{MovementEvent, MovementPlan, MovementRecord, ReversalPlan, StockSnapshot};
