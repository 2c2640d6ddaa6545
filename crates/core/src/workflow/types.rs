//! Document domain types for orders, returns, and their lifecycle.
//!
//! These types are shared by every effect engine: the numbering policy,
//! the inventory engine, the party ledger engine, and VAT aggregation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Transaction type classification.
///
/// The four recognized document types. Parsing from the wire returns
/// `None` for anything else, so unrecognized types never reach the
/// effect engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    /// Sales order (customer buys from us).
    SalesOrder,
    /// Purchase order (we buy from a vendor).
    PurchaseOrder,
    /// Sales return (customer returns goods).
    SalesReturn,
    /// Purchase return (we return goods to a vendor).
    PurchaseReturn,
}

impl TransactionType {
    /// Returns the string representation of the type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SalesOrder => "sales_order",
            Self::PurchaseOrder => "purchase_order",
            Self::SalesReturn => "sales_return",
            Self::PurchaseReturn => "purchase_return",
        }
    }

    /// Parses a type from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "sales_order" => Some(Self::SalesOrder),
            "purchase_order" => Some(Self::PurchaseOrder),
            "sales_return" => Some(Self::SalesReturn),
            "purchase_return" => Some(Self::PurchaseReturn),
            _ => None,
        }
    }

    /// Returns true for return documents.
    #[must_use]
    pub fn is_return(&self) -> bool {
        matches!(self, Self::SalesReturn | Self::PurchaseReturn)
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Transaction status in the processing lifecycle.
///
/// A transaction is created in `Draft` and transitions once to a
/// terminal status. `Paid` and `Partial` are set by the payments
/// collaborator but still count as processed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionStatus {
    /// Editable, no side effects applied yet.
    Draft,
    /// Approved; inventory and ledger effects applied.
    Approved,
    /// Rejected without side effects.
    Rejected,
    /// Cancelled; any applied effects were reversed.
    Cancelled,
    /// Fully paid (set by payment processing).
    Paid,
    /// Partially paid (set by payment processing).
    Partial,
}

impl TransactionStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::Cancelled => "CANCELLED",
            Self::Paid => "PAID",
            Self::Partial => "PARTIAL",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "DRAFT" => Some(Self::Draft),
            "APPROVED" => Some(Self::Approved),
            "REJECTED" => Some(Self::Rejected),
            "CANCELLED" => Some(Self::Cancelled),
            "PAID" => Some(Self::Paid),
            "PARTIAL" => Some(Self::Partial),
            _ => None,
        }
    }

    /// Returns true once the transaction has left `Draft`.
    ///
    /// Processed transactions are immutable to edits and further actions.
    #[must_use]
    pub fn is_processed(&self) -> bool {
        !matches!(self, Self::Draft)
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The kind of counterparty on a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartyKind {
    /// A customer (receivable side, credit log).
    Customer,
    /// A vendor (payable side, debit log).
    Vendor,
}

impl PartyKind {
    /// Returns the string representation of the kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "Customer",
            Self::Vendor => "Vendor",
        }
    }

    /// Parses a kind from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Customer" => Some(Self::Customer),
            "Vendor" => Some(Self::Vendor),
            _ => None,
        }
    }
}

impl fmt::Display for PartyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Action requested against a draft transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessAction {
    /// Apply side effects and mark approved.
    Approve,
    /// Mark rejected, no side effects.
    Reject,
    /// Mark cancelled, reversing effects if previously approved.
    Cancel,
}

impl ProcessAction {
    /// Returns the string representation of the action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::Cancel => "cancel",
        }
    }

    /// Parses an action from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "approve" => Some(Self::Approve),
            "reject" => Some(Self::Reject),
            "cancel" => Some(Self::Cancel),
            _ => None,
        }
    }
}

/// Order priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Priority {
    /// Low priority.
    Low,
    /// Default priority.
    #[default]
    Medium,
    /// High priority.
    High,
}

impl Priority {
    /// Returns the string representation of the priority.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Parses a priority from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Low" => Some(Self::Low),
            "Medium" => Some(Self::Medium),
            "High" => Some(Self::High),
            _ => None,
        }
    }
}

/// Raw line item as supplied by the caller.
///
/// Different clients send different shapes; `price` and `rate` are both
/// accepted as the unit price with `price` winning, and the item code is
/// derived from whichever identifying field is present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItemInput {
    /// The stock item this line refers to.
    pub item_id: Uuid,
    /// Item code, if the client sent one.
    pub item_code: Option<String>,
    /// Line description.
    pub description: String,
    /// Quantity ordered.
    pub qty: Decimal,
    /// Line value (also used as the unit-price fallback).
    pub rate: Option<Decimal>,
    /// Explicit unit price; wins over `rate` for line math.
    pub price: Option<Decimal>,
    /// VAT percentage for this line.
    pub vat_percent: Option<Decimal>,
    /// Package count.
    pub package: Option<Decimal>,
    /// Caller-supplied grand total override.
    pub grand_total: Option<Decimal>,
}

/// A fully calculated line item as persisted on the transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// The stock item this line refers to.
    pub item_id: Uuid,
    /// Derived item code (empty when nothing identifying was sent).
    pub item_code: String,
    /// Line description.
    pub description: String,
    /// Quantity ordered.
    pub qty: Decimal,
    /// Line value as supplied (used as-is for cost averaging).
    pub rate: Option<Decimal>,
    /// Explicit unit price, if supplied.
    pub price: Option<Decimal>,
    /// VAT percentage.
    pub vat_percent: Decimal,
    /// Calculated VAT amount, 2dp.
    pub vat_amount: Decimal,
    /// VAT-inclusive line total, 2dp.
    pub line_total: Decimal,
    /// Grand total (caller override or `line_total`).
    pub grand_total: Decimal,
    /// Package count.
    pub package: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(TransactionType::SalesOrder, "sales_order")]
    #[case(TransactionType::PurchaseOrder, "purchase_order")]
    #[case(TransactionType::SalesReturn, "sales_return")]
    #[case(TransactionType::PurchaseReturn, "purchase_return")]
    fn test_transaction_type_roundtrip(#[case] ty: TransactionType, #[case] name: &str) {
        assert_eq!(ty.as_str(), name);
        assert_eq!(TransactionType::parse(name), Some(ty));
    }

    #[test]
    fn test_transaction_type_unknown_is_none() {
        assert_eq!(TransactionType::parse("journal"), None);
        assert_eq!(TransactionType::parse(""), None);
    }

    #[test]
    fn test_transaction_type_is_return() {
        assert!(TransactionType::SalesReturn.is_return());
        assert!(TransactionType::PurchaseReturn.is_return());
        assert!(!TransactionType::SalesOrder.is_return());
        assert!(!TransactionType::PurchaseOrder.is_return());
    }

    #[test]
    fn test_status_processed() {
        assert!(!TransactionStatus::Draft.is_processed());
        assert!(TransactionStatus::Approved.is_processed());
        assert!(TransactionStatus::Rejected.is_processed());
        assert!(TransactionStatus::Cancelled.is_processed());
        assert!(TransactionStatus::Paid.is_processed());
        assert!(TransactionStatus::Partial.is_processed());
    }

    #[test]
    fn test_status_parse_case_insensitive() {
        assert_eq!(
            TransactionStatus::parse("draft"),
            Some(TransactionStatus::Draft)
        );
        assert_eq!(
            TransactionStatus::parse("Approved"),
            Some(TransactionStatus::Approved)
        );
        assert_eq!(TransactionStatus::parse("posted"), None);
    }

    #[test]
    fn test_process_action_parse() {
        assert_eq!(ProcessAction::parse("approve"), Some(ProcessAction::Approve));
        assert_eq!(ProcessAction::parse("reject"), Some(ProcessAction::Reject));
        assert_eq!(ProcessAction::parse("cancel"), Some(ProcessAction::Cancel));
        assert_eq!(ProcessAction::parse("void"), None);
        assert_eq!(ProcessAction::parse("APPROVE"), None);
    }

    #[test]
    fn test_party_kind_parse() {
        assert_eq!(PartyKind::parse("Customer"), Some(PartyKind::Customer));
        assert_eq!(PartyKind::parse("Vendor"), Some(PartyKind::Vendor));
        assert_eq!(PartyKind::parse("vendor"), None);
    }

    #[test]
    fn test_priority_default() {
        assert_eq!(Priority::default(), Priority::Medium);
    }
}
