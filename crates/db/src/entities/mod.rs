//! `SeaORM` entity definitions.

pub mod credit_logs;
pub mod customers;
pub mod debit_logs;
pub mod inventory_movements;
pub mod purchase_logs;
pub mod sea_orm_active_enums;
pub mod sequences;
pub mod stocks;
pub mod transactions;
pub mod vat_reports;
pub mod vendors;
