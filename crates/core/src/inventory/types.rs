//! Stock snapshots and movement drafts.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stock event labels, one per transaction type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementEvent {
    /// Goods received against a purchase order.
    PurchaseReceive,
    /// Goods dispatched against a sales order.
    SalesDispatch,
    /// Goods sent back to a vendor.
    PurchaseReturn,
    /// Goods taken back from a customer.
    SalesReturn,
}

impl MovementEvent {
    /// Returns the event label as stored on movement records.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PurchaseReceive => "PURCHASE_RECEIVE",
            Self::SalesDispatch => "SALES_DISPATCH",
            Self::PurchaseReturn => "PURCHASE_RETURN",
            Self::SalesReturn => "SALES_RETURN",
        }
    }
}

impl fmt::Display for MovementEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Current stock state for one item, as returned by the stock lookup.
#[derive(Debug, Clone)]
pub struct StockSnapshot {
    /// The stock item id.
    pub item_id: Uuid,
    /// Quantity on hand (may be negative).
    pub current_stock: Decimal,
    /// Weighted-average purchase price.
    pub purchase_price: Decimal,
    /// Batch number carried onto movements.
    pub batch_number: Option<String>,
    /// Expiry date carried onto movements.
    pub expiry_date: Option<NaiveDate>,
}

/// Draft of one immutable stock movement.
///
/// The database layer persists this verbatim and applies `new_stock`
/// (and `cost_update`, when present) to the stock row in the same
/// atomic scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovementPlan {
    /// The stock item id.
    pub item_id: Uuid,
    /// Signed quantity delta.
    pub quantity: Decimal,
    /// Stock level before this movement.
    pub previous_stock: Decimal,
    /// Stock level after this movement.
    pub new_stock: Decimal,
    /// New weighted-average cost to persist, when the event changes it.
    pub cost_update: Option<Decimal>,
    /// Event label.
    pub event_type: MovementEvent,
    /// Document number of the originating transaction (or `REV-` tagged).
    pub reference_number: String,
    /// Unit cost for this movement.
    pub unit_cost: Decimal,
    /// Absolute value moved at `unit_cost`.
    pub total_value: Decimal,
    /// Human-readable note.
    pub notes: String,
    /// Batch number snapshot.
    pub batch_number: Option<String>,
    /// Expiry date snapshot.
    pub expiry_date: Option<NaiveDate>,
}

/// A stored movement as loaded for reversal.
#[derive(Debug, Clone)]
pub struct MovementRecord {
    /// Movement id.
    pub id: Uuid,
    /// The stock item id.
    pub item_id: Uuid,
    /// Signed quantity delta of the original movement.
    pub quantity: Decimal,
    /// Unit cost of the original movement.
    pub unit_cost: Decimal,
    /// Event label of the original movement.
    pub event_type: MovementEvent,
    /// Note of the original movement.
    pub notes: String,
    /// Batch number snapshot.
    pub batch_number: Option<String>,
    /// Expiry date snapshot.
    pub expiry_date: Option<NaiveDate>,
}

/// An offsetting movement plus the original it neutralizes.
#[derive(Debug, Clone)]
pub struct ReversalPlan {
    /// Id of the original movement to flag as reversed.
    pub original_id: Uuid,
    /// The offsetting movement to record.
    pub movement: MovementPlan,
}
