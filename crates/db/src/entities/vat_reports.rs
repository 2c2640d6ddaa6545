//! `SeaORM` Entity for the vat_reports table.
//!
//! One open draft per calendar month, accumulating the taxable lines of
//! approved transactions.

use sea_orm::entity::prelude::*;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};
use tradewind_core::vat::VatReportItem;

use super::sea_orm_active_enums::VatReportStatus;

/// VAT line items stored as a JSONB column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct VatItems(pub Vec<VatReportItem>);

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "vat_reports")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub period_start: Date,
    pub period_end: Date,
    pub status: VatReportStatus,
    pub generated_by: String,
    pub total_vat_output: Decimal,
    pub total_vat_input: Decimal,
    pub net_vat_payable: Decimal,
    #[sea_orm(column_type = "JsonBinary")]
    pub items: VatItems,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
