//! Property-based tests for the numbering policy.

use chrono::NaiveDate;
use proptest::prelude::*;

use crate::numbering::policy::{InvoiceAllocation, NumberingPolicy};
use crate::numbering::types::{format_number, SequenceSpec, SequenceType};
use crate::workflow::types::TransactionType;

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (2020i32..2035, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

fn arb_bucket() -> impl Strategy<Value = SequenceType> {
    prop_oneof![
        Just(SequenceType::SalesOrder),
        Just(SequenceType::PurchaseOrder),
        Just(SequenceType::SalesReturn),
        Just(SequenceType::PurchaseReturn),
        Just(SequenceType::SalesInvoice),
        Just(SequenceType::PurchaseInvoice),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Formatted numbers are at least `padding` digits after the prefix
    /// and parse back to the counter.
    #[test]
    fn prop_format_number_roundtrip(counter in 1i64..10_000_000, padding in 1u32..8) {
        let formatted = format_number("", counter, padding);
        prop_assert!(formatted.len() >= padding as usize);
        prop_assert_eq!(formatted.parse::<i64>().unwrap(), counter);
    }

    /// Specs for period-partitioned buckets always embed the period in
    /// the prefix; global buckets never carry a period.
    #[test]
    fn prop_spec_period_consistency(bucket in arb_bucket(), date in arb_date()) {
        let spec = SequenceSpec::for_document(bucket, date);
        prop_assert_eq!(spec.padding, 5);
        if bucket.is_period_partitioned() {
            let period = spec.period.clone().unwrap();
            prop_assert_eq!(period.len(), 6);
            prop_assert!(spec.prefix.contains(&period));
            prop_assert!(spec.prefix.ends_with('-'));
        } else {
            prop_assert_eq!(spec.period, None);
        }
    }

    /// An already-populated invoice number always short-circuits the
    /// allocation, regardless of mode.
    #[test]
    fn prop_invoice_allocation_idempotent(
        manual in any::<bool>(),
        existing in "[0-9]{5}",
        order in "[A-Z0-9-]{1,12}",
    ) {
        let alloc = NumberingPolicy::invoice_allocation_on_approve(
            TransactionType::SalesOrder,
            manual,
            Some(&existing),
            Some(&order),
        ).unwrap();
        prop_assert_eq!(alloc, InvoiceAllocation::None);
    }

    /// Validated manual identifiers contain only letters, digits, dashes.
    #[test]
    fn prop_manual_identifier_charset(raw in "\\PC{0,24}") {
        match NumberingPolicy::validate_manual_identifier(&raw) {
            Ok(cleaned) => {
                prop_assert!(!cleaned.is_empty());
                prop_assert!(cleaned.chars().all(|c| c.is_ascii_alphanumeric() || c == '-'));
            }
            Err(_) => {
                let trimmed = raw.trim();
                prop_assert!(
                    trimmed.is_empty()
                        || !trimmed.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
                );
            }
        }
    }
}
