//! `SeaORM` Entity for the stocks table.
//!
//! Stock lookup internals belong to the inventory collaborator; the
//! orchestrator only reads and read-modify-writes these rows inside its
//! transaction scope.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "stocks")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub item_code: String,
    pub item_name: String,
    /// Quantity on hand; may go negative by design.
    pub current_stock: Decimal,
    /// Weighted-average purchase price.
    pub purchase_price: Decimal,
    pub batch_number: Option<String>,
    pub expiry_date: Option<Date>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
