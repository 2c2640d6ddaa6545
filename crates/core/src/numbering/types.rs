//! Sequence buckets and number formatting.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::NumberingError;

/// Placeholder tracking number for sales orders pending invoice.
pub const SALES_ORDER_PLACEHOLDER: &str = "0000";

/// Named sequence bucket.
///
/// Each bucket owns an independent counter, optionally partitioned by a
/// period key. Order and return buckets reset monthly; invoice buckets
/// are global.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SequenceType {
    /// Sales order numbers (`SO<YYYYMM>-NNNNN`).
    SalesOrder,
    /// Purchase order numbers (`PO<YYYYMM>-NNNNN`).
    PurchaseOrder,
    /// Sales return numbers (`SR<YYYYMM>-NNNNN`).
    SalesReturn,
    /// Purchase return numbers (`PR<YYYYMM>-NNNNN`).
    PurchaseReturn,
    /// Sales invoice numbers (global 5-digit counter, no prefix).
    SalesInvoice,
    /// Purchase invoice numbers (global `PI`-prefixed counter).
    PurchaseInvoice,
}

impl SequenceType {
    /// Returns the bucket name as stored in the sequence table.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SalesOrder => "sales_order",
            Self::PurchaseOrder => "purchase_order",
            Self::SalesReturn => "sales_return",
            Self::PurchaseReturn => "purchase_return",
            Self::SalesInvoice => "sales_invoice",
            Self::PurchaseInvoice => "purchase_invoice",
        }
    }

    /// Parses a bucket name.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "sales_order" => Some(Self::SalesOrder),
            "purchase_order" => Some(Self::PurchaseOrder),
            "sales_return" => Some(Self::SalesReturn),
            "purchase_return" => Some(Self::PurchaseReturn),
            "sales_invoice" => Some(Self::SalesInvoice),
            "purchase_invoice" => Some(Self::PurchaseInvoice),
            _ => None,
        }
    }

    /// Resolves a document code as accepted by the preview endpoint.
    ///
    /// Accepts short codes (`PO`, `SO`, `SR`, `PR`, `SI`, `PI`, any case)
    /// or full bucket names.
    ///
    /// # Errors
    ///
    /// Returns `NumberingError::UnsupportedDocumentType` for anything else.
    pub fn from_code(code: &str) -> Result<Self, NumberingError> {
        if let Some(ty) = Self::parse(code) {
            return Ok(ty);
        }
        match code.to_uppercase().as_str() {
            "SO" => Ok(Self::SalesOrder),
            "PO" => Ok(Self::PurchaseOrder),
            "SR" => Ok(Self::SalesReturn),
            "PR" => Ok(Self::PurchaseReturn),
            "SI" => Ok(Self::SalesInvoice),
            "PI" => Ok(Self::PurchaseInvoice),
            _ => Err(NumberingError::UnsupportedDocumentType(code.to_string())),
        }
    }

    /// The document prefix code, empty for sales invoices.
    #[must_use]
    pub fn prefix_code(&self) -> &'static str {
        match self {
            Self::SalesOrder => "SO",
            Self::PurchaseOrder => "PO",
            Self::SalesReturn => "SR",
            Self::PurchaseReturn => "PR",
            Self::SalesInvoice => "",
            Self::PurchaseInvoice => "PI",
        }
    }

    /// Returns true for the monthly-partitioned order/return buckets.
    #[must_use]
    pub fn is_period_partitioned(&self) -> bool {
        !matches!(self, Self::SalesInvoice | Self::PurchaseInvoice)
    }
}

impl fmt::Display for SequenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Everything the allocator needs to mint one number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceSpec {
    /// The bucket to draw from.
    pub sequence_type: SequenceType,
    /// Optional partition key (`YYYYMM` for orders/returns).
    pub period: Option<String>,
    /// Literal prefix prepended to the padded counter.
    pub prefix: String,
    /// Zero-padding width of the counter.
    pub padding: u32,
}

impl SequenceSpec {
    /// Builds the spec for a document type, partitioning by the given date.
    ///
    /// Orders and returns are partitioned by `YYYYMM` and carry a
    /// `<CODE><YYYYMM>-` prefix; invoice buckets are global with a
    /// bare (sales) or `PI` (purchase) prefix. All counters pad to 5.
    #[must_use]
    pub fn for_document(sequence_type: SequenceType, date: NaiveDate) -> Self {
        if sequence_type.is_period_partitioned() {
            let period = period_key(date);
            let prefix = format!("{}{}-", sequence_type.prefix_code(), period);
            Self {
                sequence_type,
                period: Some(period),
                prefix,
                padding: 5,
            }
        } else {
            Self {
                sequence_type,
                period: None,
                prefix: sequence_type.prefix_code().to_string(),
                padding: 5,
            }
        }
    }

    /// Builds the spec with an explicit period key instead of today's.
    #[must_use]
    pub fn for_period(sequence_type: SequenceType, period: &str) -> Self {
        if sequence_type.is_period_partitioned() {
            Self {
                sequence_type,
                period: Some(period.to_string()),
                prefix: format!("{}{}-", sequence_type.prefix_code(), period),
                padding: 5,
            }
        } else {
            Self {
                sequence_type,
                period: None,
                prefix: sequence_type.prefix_code().to_string(),
                padding: 5,
            }
        }
    }

    /// Formats a counter value under this spec.
    #[must_use]
    pub fn format(&self, counter: i64) -> String {
        format_number(&self.prefix, counter, self.padding)
    }
}

/// The `YYYYMM` partition key for a date.
#[must_use]
pub fn period_key(date: NaiveDate) -> String {
    date.format("%Y%m").to_string()
}

/// Formats `prefix + zero-padded counter`.
#[must_use]
pub fn format_number(prefix: &str, counter: i64, padding: u32) -> String {
    format!("{prefix}{counter:0width$}", width = padding as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jan_15() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    #[test]
    fn test_period_key() {
        assert_eq!(period_key(jan_15()), "202501");
        assert_eq!(
            period_key(NaiveDate::from_ymd_opt(2025, 12, 1).unwrap()),
            "202512"
        );
    }

    #[test]
    fn test_format_number_padding() {
        assert_eq!(format_number("", 1, 5), "00001");
        assert_eq!(format_number("SO202501-", 11, 5), "SO202501-00011");
        assert_eq!(format_number("PI", 42, 5), "PI00042");
        // Counters wider than the pad are not truncated
        assert_eq!(format_number("", 123_456, 5), "123456");
    }

    #[test]
    fn test_spec_for_sales_order() {
        let spec = SequenceSpec::for_document(SequenceType::SalesOrder, jan_15());
        assert_eq!(spec.period.as_deref(), Some("202501"));
        assert_eq!(spec.prefix, "SO202501-");
        assert_eq!(spec.padding, 5);
        assert_eq!(spec.format(1), "SO202501-00001");
    }

    #[test]
    fn test_spec_for_sales_invoice_is_global() {
        let spec = SequenceSpec::for_document(SequenceType::SalesInvoice, jan_15());
        assert_eq!(spec.period, None);
        assert_eq!(spec.prefix, "");
        assert_eq!(spec.format(1), "00001");
    }

    #[test]
    fn test_spec_for_purchase_invoice() {
        let spec = SequenceSpec::for_document(SequenceType::PurchaseInvoice, jan_15());
        assert_eq!(spec.period, None);
        assert_eq!(spec.format(7), "PI00007");
    }

    #[test]
    fn test_spec_for_returns() {
        let sr = SequenceSpec::for_document(SequenceType::SalesReturn, jan_15());
        assert_eq!(sr.prefix, "SR202501-");
        let pr = SequenceSpec::for_document(SequenceType::PurchaseReturn, jan_15());
        assert_eq!(pr.prefix, "PR202501-");
    }

    #[test]
    fn test_from_code() {
        assert_eq!(
            SequenceType::from_code("PO").unwrap(),
            SequenceType::PurchaseOrder
        );
        assert_eq!(
            SequenceType::from_code("si").unwrap(),
            SequenceType::SalesInvoice
        );
        assert_eq!(
            SequenceType::from_code("sales_order").unwrap(),
            SequenceType::SalesOrder
        );
        assert!(SequenceType::from_code("XX").is_err());
    }

    #[test]
    fn test_for_period_override() {
        let spec = SequenceSpec::for_period(SequenceType::PurchaseOrder, "202403");
        assert_eq!(spec.prefix, "PO202403-");
        assert_eq!(spec.period.as_deref(), Some("202403"));
    }
}
