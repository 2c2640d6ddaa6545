//! `SeaORM` Entity for the inventory_movements table.
//!
//! Immutable ledger of stock deltas. Rows are never edited except to
//! flag them as reversed; a reversal is a new offsetting row.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::MovementEvent;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "inventory_movements")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub item_id: Uuid,
    /// Signed quantity delta.
    pub quantity: Decimal,
    pub previous_stock: Decimal,
    pub new_stock: Decimal,
    pub event_type: MovementEvent,
    /// Originating transaction, referenced weakly for traceability.
    pub reference_id: Uuid,
    /// Document number, `REV-` prefixed on reversal rows.
    pub reference_number: String,
    pub unit_cost: Decimal,
    pub total_value: Decimal,
    pub notes: String,
    pub batch_number: Option<String>,
    pub expiry_date: Option<Date>,
    pub is_reversed: bool,
    /// The offsetting movement that neutralized this one.
    pub reversal_reference: Option<Uuid>,
    pub created_by: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::stocks::Entity",
        from = "Column::ItemId",
        to = "super::stocks::Column::Id"
    )]
    Stocks,
}

impl Related<super::stocks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Stocks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
