//! `SeaORM` Entity for the transactions table.

use sea_orm::entity::prelude::*;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};
use tradewind_core::workflow::LineItem;

use super::sea_orm_active_enums::{PartyKind, Priority, TransactionStatus, TransactionType};

/// Line items stored as a JSONB column; the transaction owns them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct LineItems(pub Vec<LineItem>);

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Internal tracking number; `"0000"` placeholder for sales orders.
    pub transaction_no: String,
    /// External document number (sales orders only).
    pub order_number: Option<String>,
    /// Allocated at most once, on approval of a sales order.
    pub invoice_number: Option<String>,
    pub number_manual: bool,
    pub transaction_type: TransactionType,
    pub party_id: Uuid,
    pub party_kind: PartyKind,
    pub vendor_reference: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub items: LineItems,
    pub total_amount: Decimal,
    pub status: TransactionStatus,
    pub date: Date,
    pub delivery_date: Date,
    pub terms: String,
    pub notes: String,
    pub priority: Priority,
    pub grn_generated: bool,
    pub invoice_generated: bool,
    pub credit_note_issued: bool,
    pub created_by: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
