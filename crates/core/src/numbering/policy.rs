//! Create/approve numbering decisions.
//!
//! The policy is pure: it decides which identifier fields are populated
//! and from which bucket, returning a plan the orchestrator executes
//! against the allocator inside its database transaction.

use chrono::NaiveDate;

use super::error::NumberingError;
use super::types::{SequenceSpec, SequenceType};
use crate::workflow::types::TransactionType;

/// Numbering decision for transaction creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreatePlan {
    /// Auto sales order: placeholder tracking number, order number from
    /// the `sales_order` bucket.
    AutoSalesOrder {
        /// Spec for the order-number allocation.
        order: SequenceSpec,
    },
    /// Manual sales order: user-supplied order number, placeholder
    /// tracking number, no allocator call.
    ManualSalesOrder {
        /// The validated order number.
        order_number: String,
    },
    /// Auto purchase order or return: tracking number from its bucket.
    AutoOrder {
        /// Spec for the tracking-number allocation.
        transaction: SequenceSpec,
    },
    /// Manual purchase order or return: user-supplied tracking number.
    ManualOrder {
        /// The validated tracking number.
        transaction_no: String,
    },
}

/// Numbering decision for transaction approval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvoiceAllocation {
    /// Allocate the invoice number from a bucket.
    Sequence(SequenceSpec),
    /// Reuse the manual order number as the invoice number.
    ReuseOrderNumber(String),
    /// No invoice handling for this document.
    None,
}

/// Stateless numbering policy.
pub struct NumberingPolicy;

impl NumberingPolicy {
    /// Validates a manually supplied document identifier.
    ///
    /// The identifier is trimmed; it must be non-empty and contain only
    /// letters, digits, and dashes.
    ///
    /// # Errors
    ///
    /// Returns `NumberingError::EmptyIdentifier` or
    /// `NumberingError::InvalidIdentifier`.
    pub fn validate_manual_identifier(raw: &str) -> Result<String, NumberingError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(NumberingError::EmptyIdentifier);
        }
        if !trimmed.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(NumberingError::InvalidIdentifier(trimmed.to_string()));
        }
        Ok(trimmed.to_string())
    }

    /// Parses a preview period override: `YYYYMM`, or `YYYY` combined
    /// with the current month.
    ///
    /// # Errors
    ///
    /// Returns `NumberingError::InvalidPeriod` for any other shape.
    pub fn parse_period_override(raw: &str, today: NaiveDate) -> Result<String, NumberingError> {
        if !raw.chars().all(|c| c.is_ascii_digit()) {
            return Err(NumberingError::InvalidPeriod(raw.to_string()));
        }
        match raw.len() {
            6 => {
                let month: u32 = raw[4..6]
                    .parse()
                    .map_err(|_| NumberingError::InvalidPeriod(raw.to_string()))?;
                if !(1..=12).contains(&month) {
                    return Err(NumberingError::InvalidPeriod(raw.to_string()));
                }
                Ok(raw.to_string())
            }
            4 => Ok(format!("{raw}{}", today.format("%m"))),
            _ => Err(NumberingError::InvalidPeriod(raw.to_string())),
        }
    }

    /// Decides the numbering for a new transaction.
    ///
    /// Manual mode (explicit flag, or a caller-supplied identifier) uses
    /// the validated user string without touching the allocator; auto mode
    /// allocates from the bucket matching the document type.
    ///
    /// # Errors
    ///
    /// Returns a `NumberingError` for missing or malformed manual
    /// identifiers.
    pub fn plan_create(
        transaction_type: TransactionType,
        number_manual: bool,
        supplied_transaction_no: Option<&str>,
        supplied_order_number: Option<&str>,
        date: NaiveDate,
    ) -> Result<CreatePlan, NumberingError> {
        match transaction_type {
            TransactionType::SalesOrder => {
                if number_manual || supplied_order_number.is_some() {
                    let raw =
                        supplied_order_number.ok_or(NumberingError::MissingManualIdentifier)?;
                    Ok(CreatePlan::ManualSalesOrder {
                        order_number: Self::validate_manual_identifier(raw)?,
                    })
                } else {
                    Ok(CreatePlan::AutoSalesOrder {
                        order: SequenceSpec::for_document(SequenceType::SalesOrder, date),
                    })
                }
            }
            TransactionType::PurchaseOrder
            | TransactionType::SalesReturn
            | TransactionType::PurchaseReturn => {
                if number_manual || supplied_transaction_no.is_some() {
                    let raw =
                        supplied_transaction_no.ok_or(NumberingError::MissingManualIdentifier)?;
                    Ok(CreatePlan::ManualOrder {
                        transaction_no: Self::validate_manual_identifier(raw)?,
                    })
                } else {
                    Ok(CreatePlan::AutoOrder {
                        transaction: SequenceSpec::for_document(
                            Self::bucket_for(transaction_type),
                            date,
                        ),
                    })
                }
            }
        }
    }

    /// Decides invoice numbering on approval.
    ///
    /// Idempotent by construction: an already-set invoice number returns
    /// `InvoiceAllocation::None` no matter how often approval is retried.
    /// Only sales orders allocate invoices.
    ///
    /// # Errors
    ///
    /// Returns `NumberingError::MissingManualIdentifier` when a manual
    /// sales order reaches approval without an order number.
    pub fn invoice_allocation_on_approve(
        transaction_type: TransactionType,
        number_manual: bool,
        invoice_number: Option<&str>,
        order_number: Option<&str>,
    ) -> Result<InvoiceAllocation, NumberingError> {
        if transaction_type != TransactionType::SalesOrder {
            return Ok(InvoiceAllocation::None);
        }
        if invoice_number.is_some_and(|n| !n.is_empty()) {
            return Ok(InvoiceAllocation::None);
        }
        if number_manual {
            let order = order_number.ok_or(NumberingError::MissingManualIdentifier)?;
            return Ok(InvoiceAllocation::ReuseOrderNumber(order.to_string()));
        }
        Ok(InvoiceAllocation::Sequence(SequenceSpec {
            sequence_type: SequenceType::SalesInvoice,
            period: None,
            prefix: String::new(),
            padding: 5,
        }))
    }

    fn bucket_for(transaction_type: TransactionType) -> SequenceType {
        match transaction_type {
            TransactionType::SalesOrder => SequenceType::SalesOrder,
            TransactionType::PurchaseOrder => SequenceType::PurchaseOrder,
            TransactionType::SalesReturn => SequenceType::SalesReturn,
            TransactionType::PurchaseReturn => SequenceType::PurchaseReturn,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jan_15() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    #[test]
    fn test_validate_manual_identifier_trims() {
        assert_eq!(
            NumberingPolicy::validate_manual_identifier("  PO-CUSTOM-1  ").unwrap(),
            "PO-CUSTOM-1"
        );
    }

    #[test]
    fn test_validate_manual_identifier_empty() {
        assert!(matches!(
            NumberingPolicy::validate_manual_identifier("   "),
            Err(NumberingError::EmptyIdentifier)
        ));
    }

    #[test]
    fn test_validate_manual_identifier_bad_chars() {
        for bad in ["PO 1", "PO_1", "PO#1", "ÄÖ-1"] {
            assert!(matches!(
                NumberingPolicy::validate_manual_identifier(bad),
                Err(NumberingError::InvalidIdentifier(_))
            ));
        }
    }

    #[test]
    fn test_plan_create_auto_sales_order() {
        let plan =
            NumberingPolicy::plan_create(TransactionType::SalesOrder, false, None, None, jan_15())
                .unwrap();
        match plan {
            CreatePlan::AutoSalesOrder { order } => {
                assert_eq!(order.sequence_type, SequenceType::SalesOrder);
                assert_eq!(order.prefix, "SO202501-");
            }
            other => panic!("unexpected plan: {other:?}"),
        }
    }

    #[test]
    fn test_plan_create_manual_sales_order() {
        let plan = NumberingPolicy::plan_create(
            TransactionType::SalesOrder,
            true,
            None,
            Some("CUSTOM-2025-001"),
            jan_15(),
        )
        .unwrap();
        assert_eq!(
            plan,
            CreatePlan::ManualSalesOrder {
                order_number: "CUSTOM-2025-001".to_string()
            }
        );
    }

    #[test]
    fn test_plan_create_manual_sales_order_without_number_fails() {
        assert!(matches!(
            NumberingPolicy::plan_create(TransactionType::SalesOrder, true, None, None, jan_15()),
            Err(NumberingError::MissingManualIdentifier)
        ));
    }

    #[test]
    fn test_plan_create_auto_purchase_order() {
        let plan = NumberingPolicy::plan_create(
            TransactionType::PurchaseOrder,
            false,
            None,
            None,
            jan_15(),
        )
        .unwrap();
        match plan {
            CreatePlan::AutoOrder { transaction } => {
                assert_eq!(transaction.prefix, "PO202501-");
            }
            other => panic!("unexpected plan: {other:?}"),
        }
    }

    #[test]
    fn test_plan_create_supplied_number_forces_manual() {
        // A caller-supplied tracking number wins even without the flag.
        let plan = NumberingPolicy::plan_create(
            TransactionType::PurchaseOrder,
            false,
            Some("PO-CUSTOM-1"),
            None,
            jan_15(),
        )
        .unwrap();
        assert_eq!(
            plan,
            CreatePlan::ManualOrder {
                transaction_no: "PO-CUSTOM-1".to_string()
            }
        );
    }

    #[test]
    fn test_plan_create_returns_use_their_buckets() {
        let plan =
            NumberingPolicy::plan_create(TransactionType::SalesReturn, false, None, None, jan_15())
                .unwrap();
        match plan {
            CreatePlan::AutoOrder { transaction } => {
                assert_eq!(transaction.sequence_type, SequenceType::SalesReturn);
                assert_eq!(transaction.prefix, "SR202501-");
            }
            other => panic!("unexpected plan: {other:?}"),
        }
    }

    #[test]
    fn test_invoice_allocation_auto_first_approval() {
        let alloc = NumberingPolicy::invoice_allocation_on_approve(
            TransactionType::SalesOrder,
            false,
            None,
            Some("SO202501-00001"),
        )
        .unwrap();
        match alloc {
            InvoiceAllocation::Sequence(spec) => {
                assert_eq!(spec.sequence_type, SequenceType::SalesInvoice);
                assert_eq!(spec.prefix, "");
                assert_eq!(spec.padding, 5);
            }
            other => panic!("unexpected allocation: {other:?}"),
        }
    }

    #[test]
    fn test_invoice_allocation_is_idempotent() {
        // Second approval sees the populated invoice number and does nothing.
        let alloc = NumberingPolicy::invoice_allocation_on_approve(
            TransactionType::SalesOrder,
            false,
            Some("00002"),
            Some("SO202501-00002"),
        )
        .unwrap();
        assert_eq!(alloc, InvoiceAllocation::None);
    }

    #[test]
    fn test_invoice_allocation_manual_reuses_order_number() {
        let alloc = NumberingPolicy::invoice_allocation_on_approve(
            TransactionType::SalesOrder,
            true,
            None,
            Some("CUSTOM-2025-001"),
        )
        .unwrap();
        assert_eq!(
            alloc,
            InvoiceAllocation::ReuseOrderNumber("CUSTOM-2025-001".to_string())
        );
    }

    #[test]
    fn test_invoice_allocation_purchase_order_none() {
        for ty in [
            TransactionType::PurchaseOrder,
            TransactionType::SalesReturn,
            TransactionType::PurchaseReturn,
        ] {
            let alloc =
                NumberingPolicy::invoice_allocation_on_approve(ty, false, None, None).unwrap();
            assert_eq!(alloc, InvoiceAllocation::None);
        }
    }

    #[test]
    fn test_parse_period_override() {
        let today = jan_15();
        assert_eq!(
            NumberingPolicy::parse_period_override("202403", today).unwrap(),
            "202403"
        );
        assert_eq!(
            NumberingPolicy::parse_period_override("2024", today).unwrap(),
            "202401"
        );
        assert!(NumberingPolicy::parse_period_override("202413", today).is_err());
        assert!(NumberingPolicy::parse_period_override("20240", today).is_err());
        assert!(NumberingPolicy::parse_period_override("abc", today).is_err());
    }
}
