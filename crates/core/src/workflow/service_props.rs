//! Property-based tests for WorkflowService.

use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::workflow::error::WorkflowError;
use crate::workflow::service::WorkflowService;
use crate::workflow::types::{LineItemInput, TransactionStatus};

/// Strategy for generating random TransactionStatus values.
fn arb_status() -> impl Strategy<Value = TransactionStatus> {
    prop_oneof![
        Just(TransactionStatus::Draft),
        Just(TransactionStatus::Approved),
        Just(TransactionStatus::Rejected),
        Just(TransactionStatus::Cancelled),
        Just(TransactionStatus::Paid),
        Just(TransactionStatus::Partial),
    ]
}

/// Strategy for small positive decimals with 2dp.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn arb_line_item() -> impl Strategy<Value = LineItemInput> {
    (arb_amount(), arb_amount(), 0u32..=25).prop_map(|(qty, price, vat)| LineItemInput {
        item_id: Uuid::from_u128(7),
        item_code: None,
        description: "line".to_string(),
        qty,
        rate: None,
        price: Some(price),
        vat_percent: Some(Decimal::from(vat)),
        package: None,
        grand_total: None,
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Draft accepts every action; Approved accepts only cancel; every
    /// other status rejects everything.
    #[test]
    fn prop_status_gates_actions(status in arb_status()) {
        for action in ["approve", "reject", "cancel"] {
            let result = WorkflowService::validate_action(status, action);
            let allowed = status == TransactionStatus::Draft
                || (status == TransactionStatus::Approved && action == "cancel");
            if allowed {
                prop_assert!(result.is_ok());
            } else {
                prop_assert!(matches!(result, Err(WorkflowError::AlreadyProcessed(_))));
            }
        }
    }

    /// The total is always the sum of the processed line totals.
    #[test]
    fn prop_total_is_sum_of_line_totals(items in proptest::collection::vec(arb_line_item(), 1..8)) {
        let (processed, total) = WorkflowService::calculate_line_items(&items);
        let expected: Decimal = processed.iter().map(|i| i.line_total).sum();
        prop_assert_eq!(total, expected);
        prop_assert_eq!(processed.len(), items.len());
    }

    /// VAT amount and line total always carry at most 2 decimal places.
    #[test]
    fn prop_line_amounts_are_2dp(items in proptest::collection::vec(arb_line_item(), 1..8)) {
        let (processed, _) = WorkflowService::calculate_line_items(&items);
        for item in &processed {
            prop_assert!(item.vat_amount.scale() <= 2);
            prop_assert!(item.line_total.scale() <= 2);
        }
    }

    /// Zero VAT percent yields a zero VAT amount and line_total == line value.
    #[test]
    fn prop_zero_vat_means_no_vat_amount(qty in arb_amount(), price in arb_amount()) {
        let input = LineItemInput {
            item_id: Uuid::from_u128(9),
            item_code: None,
            description: "line".to_string(),
            qty,
            rate: None,
            price: Some(price),
            vat_percent: Some(Decimal::ZERO),
            package: None,
            grand_total: None,
        };
        let (processed, _) = WorkflowService::calculate_line_items(&[input]);
        prop_assert_eq!(processed[0].vat_amount, Decimal::ZERO);
    }
}
