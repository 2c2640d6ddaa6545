//! `SeaORM` Entity for the debit_logs table (vendor ledger).
//!
//! Append-only; reversals are new rows with status REVERSED.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{EntryStatus, LedgerEventType};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "debit_logs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub vendor_id: Uuid,
    pub event_type: LedgerEventType,
    pub date: Date,
    /// Document number of the source transaction.
    pub inv_no: String,
    /// Signed amount applied to the balance.
    pub amount: Decimal,
    pub paid: Decimal,
    /// Running balance immediately after this entry.
    pub balance: Decimal,
    /// Source reference: transaction id, or `REV-<id>` for reversals.
    pub reference: String,
    pub status: EntryStatus,
    pub created_by: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::vendors::Entity",
        from = "Column::VendorId",
        to = "super::vendors::Column::Id"
    )]
    Vendors,
}

impl Related<super::vendors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vendors.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
