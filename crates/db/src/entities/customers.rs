//! `SeaORM` Entity for the customers table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub customer_name: String,
    /// Running balance; sales orders push it negative (receivable).
    pub cash_balance: Decimal,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::credit_logs::Entity")]
    CreditLogs,
}

impl Related<super::credit_logs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CreditLogs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
