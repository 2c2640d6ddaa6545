//! `SeaORM` Entity for the purchase_logs table.
//!
//! Companion record for purchase orders, tracked through the same
//! lifecycle and deleted with its transaction.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{Priority, PurchaseLogStatus};
use super::transactions::LineItems;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "purchase_logs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub transaction_no: String,
    pub vendor_id: Uuid,
    pub date: Date,
    pub delivery_date: Date,
    #[sea_orm(column_type = "JsonBinary")]
    pub items: LineItems,
    pub total_amount: Decimal,
    pub status: PurchaseLogStatus,
    pub terms: String,
    pub notes: String,
    pub priority: Priority,
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
