//! VAT aggregation types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::workflow::types::PartyKind;

/// Which side of the VAT return a transaction lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VatClass {
    /// VAT we collected (sales orders, purchase returns).
    Output,
    /// VAT we paid (purchase orders, sales returns).
    Input,
}

/// The transaction fields VAT items are built from.
#[derive(Debug, Clone)]
pub struct VatContext {
    /// Source transaction id.
    pub transaction_id: Uuid,
    /// Source document number.
    pub transaction_no: String,
    /// The counterparty.
    pub party_id: Uuid,
    /// Resolved party display name.
    pub party_name: String,
    /// Customer or vendor.
    pub party_kind: PartyKind,
    /// Document date.
    pub date: NaiveDate,
}

/// One taxable line on a VAT report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VatReportItem {
    /// Source transaction id.
    pub transaction_id: Uuid,
    /// Source document number.
    pub transaction_no: String,
    /// The stock item.
    pub item_id: Uuid,
    /// Item code.
    pub item_code: String,
    /// Line description.
    pub description: String,
    /// Quantity.
    pub qty: Decimal,
    /// Line value.
    pub rate: Decimal,
    /// VAT-inclusive line total.
    pub line_total: Decimal,
    /// VAT amount for this line.
    pub vat_amount: Decimal,
    /// VAT percentage.
    pub vat_rate: Decimal,
    /// The counterparty.
    pub party_id: Uuid,
    /// Party display name.
    pub party_name: String,
    /// Customer or vendor.
    pub party_type: PartyKind,
    /// Document date.
    pub date: NaiveDate,
}

/// Running totals of a draft VAT report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VatTotals {
    /// Sum of output VAT.
    pub total_vat_output: Decimal,
    /// Sum of input VAT.
    pub total_vat_input: Decimal,
    /// `output - input`.
    pub net_vat_payable: Decimal,
}

impl VatTotals {
    /// Accumulates the VAT of `items` on the given side and recomputes
    /// the net payable.
    pub fn accumulate(&mut self, class: VatClass, items: &[VatReportItem]) {
        let sum: Decimal = items.iter().map(|i| i.vat_amount).sum();
        match class {
            VatClass::Output => self.total_vat_output += sum,
            VatClass::Input => self.total_vat_input += sum,
        }
        self.net_vat_payable = self.total_vat_output - self.total_vat_input;
    }
}
