//! `SeaORM` Entity for the vendors table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "vendors")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub vendor_name: String,
    /// Running balance; purchase orders raise it (payable).
    pub cash_balance: Decimal,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::debit_logs::Entity")]
    DebitLogs,
}

impl Related<super::debit_logs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DebitLogs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
