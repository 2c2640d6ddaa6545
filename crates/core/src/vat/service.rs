//! VAT classification and aggregation.

use chrono::{Datelike, Days, Months, NaiveDate};
use rust_decimal::Decimal;

use super::types::{VatClass, VatContext, VatReportItem};
use crate::workflow::types::{LineItem, TransactionType};

/// Stateless VAT aggregation service.
pub struct VatService;

impl VatService {
    /// Classifies a transaction type into output or input VAT.
    #[must_use]
    pub fn classify(transaction_type: TransactionType) -> VatClass {
        match transaction_type {
            TransactionType::SalesOrder | TransactionType::PurchaseReturn => VatClass::Output,
            TransactionType::PurchaseOrder | TransactionType::SalesReturn => VatClass::Input,
        }
    }

    /// Builds report items for the lines carrying VAT.
    ///
    /// Lines with a zero VAT amount are skipped; a transaction without
    /// any taxable lines contributes nothing to the report.
    #[must_use]
    pub fn build_items(ctx: &VatContext, items: &[LineItem]) -> Vec<VatReportItem> {
        items
            .iter()
            .filter(|item| item.vat_amount > Decimal::ZERO)
            .map(|item| VatReportItem {
                transaction_id: ctx.transaction_id,
                transaction_no: ctx.transaction_no.clone(),
                item_id: item.item_id,
                item_code: item.item_code.clone(),
                description: item.description.clone(),
                qty: item.qty,
                rate: item.rate.or(item.price).unwrap_or(Decimal::ZERO),
                line_total: item.line_total,
                vat_amount: item.vat_amount,
                vat_rate: item.vat_percent,
                party_id: ctx.party_id,
                party_name: ctx.party_name.clone(),
                party_type: ctx.party_kind,
                date: ctx.date,
            })
            .collect()
    }

    /// First and last day of the calendar month containing `date`.
    ///
    /// Draft reports are scoped to exactly this window.
    #[must_use]
    pub fn month_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
        let start = date.with_day(1).unwrap_or(date);
        let end = start
            .checked_add_months(Months::new(1))
            .and_then(|d| d.checked_sub_days(Days::new(1)))
            .unwrap_or(start);
        (start, end)
    }
}
