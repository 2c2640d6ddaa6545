//! `SeaORM` active enums mirroring the database enum types.
//!
//! Conversions to/from the core domain enums live here so repositories
//! can hand entity rows straight to the effect engines.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use tradewind_core::inventory::MovementEvent as CoreMovementEvent;
use tradewind_core::ledger::EntryStatus as CoreEntryStatus;
use tradewind_core::numbering::SequenceType as CoreSequenceType;
use tradewind_core::workflow::{
    PartyKind as CorePartyKind, Priority as CorePriority,
    TransactionStatus as CoreTransactionStatus, TransactionType as CoreTransactionType,
};

/// Document types.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "transaction_type")]
pub enum TransactionType {
    /// Sales order.
    #[sea_orm(string_value = "sales_order")]
    SalesOrder,
    /// Purchase order.
    #[sea_orm(string_value = "purchase_order")]
    PurchaseOrder,
    /// Sales return.
    #[sea_orm(string_value = "sales_return")]
    SalesReturn,
    /// Purchase return.
    #[sea_orm(string_value = "purchase_return")]
    PurchaseReturn,
}

/// Transaction lifecycle statuses.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "transaction_status")]
pub enum TransactionStatus {
    /// Editable draft.
    #[sea_orm(string_value = "DRAFT")]
    Draft,
    /// Approved, side effects applied.
    #[sea_orm(string_value = "APPROVED")]
    Approved,
    /// Rejected without side effects.
    #[sea_orm(string_value = "REJECTED")]
    Rejected,
    /// Cancelled, effects reversed if any.
    #[sea_orm(string_value = "CANCELLED")]
    Cancelled,
    /// Fully paid.
    #[sea_orm(string_value = "PAID")]
    Paid,
    /// Partially paid.
    #[sea_orm(string_value = "PARTIAL")]
    Partial,
}

/// Counterparty kinds.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "party_kind")]
pub enum PartyKind {
    /// A customer.
    #[sea_orm(string_value = "Customer")]
    Customer,
    /// A vendor.
    #[sea_orm(string_value = "Vendor")]
    Vendor,
}

/// Sequence buckets.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "sequence_type")]
pub enum SequenceType {
    /// Sales order numbers.
    #[sea_orm(string_value = "sales_order")]
    SalesOrder,
    /// Purchase order numbers.
    #[sea_orm(string_value = "purchase_order")]
    PurchaseOrder,
    /// Sales return numbers.
    #[sea_orm(string_value = "sales_return")]
    SalesReturn,
    /// Purchase return numbers.
    #[sea_orm(string_value = "purchase_return")]
    PurchaseReturn,
    /// Sales invoice numbers.
    #[sea_orm(string_value = "sales_invoice")]
    SalesInvoice,
    /// Purchase invoice numbers.
    #[sea_orm(string_value = "purchase_invoice")]
    PurchaseInvoice,
}

/// Stock movement event labels.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "movement_event")]
pub enum MovementEvent {
    /// Goods received against a purchase order.
    #[sea_orm(string_value = "PURCHASE_RECEIVE")]
    PurchaseReceive,
    /// Goods dispatched against a sales order.
    #[sea_orm(string_value = "SALES_DISPATCH")]
    SalesDispatch,
    /// Goods returned to a vendor.
    #[sea_orm(string_value = "PURCHASE_RETURN")]
    PurchaseReturn,
    /// Goods returned by a customer.
    #[sea_orm(string_value = "SALES_RETURN")]
    SalesReturn,
}

/// Ledger event types.
///
/// Orders and returns are written by the orchestrator; payment and
/// adjustment entries come from the payments collaborator.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "ledger_event_type")]
pub enum LedgerEventType {
    /// Sales order.
    #[sea_orm(string_value = "sales_order")]
    SalesOrder,
    /// Purchase order.
    #[sea_orm(string_value = "purchase_order")]
    PurchaseOrder,
    /// Sales return.
    #[sea_orm(string_value = "sales_return")]
    SalesReturn,
    /// Purchase return.
    #[sea_orm(string_value = "purchase_return")]
    PurchaseReturn,
    /// Payment received from a customer.
    #[sea_orm(string_value = "payment_received")]
    PaymentReceived,
    /// Payment made to a vendor.
    #[sea_orm(string_value = "payment_made")]
    PaymentMade,
    /// Manual adjustment.
    #[sea_orm(string_value = "adjustment")]
    Adjustment,
}

/// Settlement statuses of ledger entries.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "entry_status")]
pub enum EntryStatus {
    /// Not yet settled.
    #[sea_orm(string_value = "UNPAID")]
    Unpaid,
    /// Partially settled.
    #[sea_orm(string_value = "PARTIAL")]
    Partial,
    /// Fully settled.
    #[sea_orm(string_value = "PAID")]
    Paid,
    /// Compensating entry of a reversal.
    #[sea_orm(string_value = "REVERSED")]
    Reversed,
}

/// VAT report statuses.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "vat_report_status")]
pub enum VatReportStatus {
    /// Open draft accumulating approved transactions.
    #[sea_orm(string_value = "DRAFT")]
    Draft,
    /// Finalized report.
    #[sea_orm(string_value = "FINALIZED")]
    Finalized,
}

/// Purchase log statuses.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "purchase_log_status")]
pub enum PurchaseLogStatus {
    /// Awaiting processing.
    #[sea_orm(string_value = "PENDING")]
    Pending,
    /// Order approved.
    #[sea_orm(string_value = "APPROVED")]
    Approved,
    /// Order rejected.
    #[sea_orm(string_value = "REJECTED")]
    Rejected,
    /// Order cancelled.
    #[sea_orm(string_value = "CANCELLED")]
    Cancelled,
    /// Order effects reversed.
    #[sea_orm(string_value = "REVERSED")]
    Reversed,
}

/// Order priorities.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "priority")]
pub enum Priority {
    /// Low priority.
    #[sea_orm(string_value = "Low")]
    Low,
    /// Default priority.
    #[sea_orm(string_value = "Medium")]
    Medium,
    /// High priority.
    #[sea_orm(string_value = "High")]
    High,
}

impl From<CoreTransactionType> for TransactionType {
    fn from(value: CoreTransactionType) -> Self {
        match value {
            CoreTransactionType::SalesOrder => Self::SalesOrder,
            CoreTransactionType::PurchaseOrder => Self::PurchaseOrder,
            CoreTransactionType::SalesReturn => Self::SalesReturn,
            CoreTransactionType::PurchaseReturn => Self::PurchaseReturn,
        }
    }
}

impl From<TransactionType> for CoreTransactionType {
    fn from(value: TransactionType) -> Self {
        match value {
            TransactionType::SalesOrder => Self::SalesOrder,
            TransactionType::PurchaseOrder => Self::PurchaseOrder,
            TransactionType::SalesReturn => Self::SalesReturn,
            TransactionType::PurchaseReturn => Self::PurchaseReturn,
        }
    }
}

impl From<TransactionType> for LedgerEventType {
    fn from(value: TransactionType) -> Self {
        match value {
            TransactionType::SalesOrder => Self::SalesOrder,
            TransactionType::PurchaseOrder => Self::PurchaseOrder,
            TransactionType::SalesReturn => Self::SalesReturn,
            TransactionType::PurchaseReturn => Self::PurchaseReturn,
        }
    }
}

impl From<CoreTransactionType> for LedgerEventType {
    fn from(value: CoreTransactionType) -> Self {
        TransactionType::from(value).into()
    }
}

impl From<CoreTransactionStatus> for TransactionStatus {
    fn from(value: CoreTransactionStatus) -> Self {
        match value {
            CoreTransactionStatus::Draft => Self::Draft,
            CoreTransactionStatus::Approved => Self::Approved,
            CoreTransactionStatus::Rejected => Self::Rejected,
            CoreTransactionStatus::Cancelled => Self::Cancelled,
            CoreTransactionStatus::Paid => Self::Paid,
            CoreTransactionStatus::Partial => Self::Partial,
        }
    }
}

impl From<TransactionStatus> for CoreTransactionStatus {
    fn from(value: TransactionStatus) -> Self {
        match value {
            TransactionStatus::Draft => Self::Draft,
            TransactionStatus::Approved => Self::Approved,
            TransactionStatus::Rejected => Self::Rejected,
            TransactionStatus::Cancelled => Self::Cancelled,
            TransactionStatus::Paid => Self::Paid,
            TransactionStatus::Partial => Self::Partial,
        }
    }
}

impl From<CorePartyKind> for PartyKind {
    fn from(value: CorePartyKind) -> Self {
        match value {
            CorePartyKind::Customer => Self::Customer,
            CorePartyKind::Vendor => Self::Vendor,
        }
    }
}

impl From<PartyKind> for CorePartyKind {
    fn from(value: PartyKind) -> Self {
        match value {
            PartyKind::Customer => Self::Customer,
            PartyKind::Vendor => Self::Vendor,
        }
    }
}

impl From<CoreSequenceType> for SequenceType {
    fn from(value: CoreSequenceType) -> Self {
        match value {
            CoreSequenceType::SalesOrder => Self::SalesOrder,
            CoreSequenceType::PurchaseOrder => Self::PurchaseOrder,
            CoreSequenceType::SalesReturn => Self::SalesReturn,
            CoreSequenceType::PurchaseReturn => Self::PurchaseReturn,
            CoreSequenceType::SalesInvoice => Self::SalesInvoice,
            CoreSequenceType::PurchaseInvoice => Self::PurchaseInvoice,
        }
    }
}

impl From<CoreMovementEvent> for MovementEvent {
    fn from(value: CoreMovementEvent) -> Self {
        match value {
            CoreMovementEvent::PurchaseReceive => Self::PurchaseReceive,
            CoreMovementEvent::SalesDispatch => Self::SalesDispatch,
            CoreMovementEvent::PurchaseReturn => Self::PurchaseReturn,
            CoreMovementEvent::SalesReturn => Self::SalesReturn,
        }
    }
}

impl From<MovementEvent> for CoreMovementEvent {
    fn from(value: MovementEvent) -> Self {
        match value {
            MovementEvent::PurchaseReceive => Self::PurchaseReceive,
            MovementEvent::SalesDispatch => Self::SalesDispatch,
            MovementEvent::PurchaseReturn => Self::PurchaseReturn,
            MovementEvent::SalesReturn => Self::SalesReturn,
        }
    }
}

impl From<CoreEntryStatus> for EntryStatus {
    fn from(value: CoreEntryStatus) -> Self {
        match value {
            CoreEntryStatus::Unpaid => Self::Unpaid,
            CoreEntryStatus::Partial => Self::Partial,
            CoreEntryStatus::Paid => Self::Paid,
            CoreEntryStatus::Reversed => Self::Reversed,
        }
    }
}

impl From<CorePriority> for Priority {
    fn from(value: CorePriority) -> Self {
        match value {
            CorePriority::Low => Self::Low,
            CorePriority::Medium => Self::Medium,
            CorePriority::High => Self::High,
        }
    }
}
