//! Property-based tests for the party ledger engine.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::ledger::engine::LedgerEngine;
use crate::ledger::types::{EntryStatus, LedgerContext};
use crate::workflow::types::{PartyKind, TransactionType};

fn arb_type() -> impl Strategy<Value = TransactionType> {
    prop_oneof![
        Just(TransactionType::SalesOrder),
        Just(TransactionType::PurchaseOrder),
        Just(TransactionType::SalesReturn),
        Just(TransactionType::PurchaseReturn),
    ]
}

fn arb_amount() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn arb_balance() -> impl Strategy<Value = Decimal> {
    (-100_000_000i64..100_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn make_ctx(ty: TransactionType, total: Decimal) -> LedgerContext {
    LedgerContext {
        transaction_id: Uuid::from_u128(11),
        transaction_type: ty,
        party_id: Uuid::from_u128(12),
        party_kind: PartyKind::Vendor,
        transaction_no: "DOC-1".to_string(),
        total_amount: total,
        date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Apply followed by reverse always restores the starting balance.
    #[test]
    fn prop_apply_then_reverse_restores_balance(
        ty in arb_type(),
        total in arb_amount(),
        start in arb_balance(),
    ) {
        let ctx = make_ctx(ty, total);
        let applied = LedgerEngine::apply(&ctx, start);
        let reversed = LedgerEngine::reverse(&ctx, applied.new_balance, ctx.date);
        prop_assert_eq!(reversed.new_balance, start);
        prop_assert_eq!(reversed.entry.amount, -applied.entry.amount);
    }

    /// The entry's balance snapshot always equals the new running balance.
    #[test]
    fn prop_entry_balance_matches_new_balance(
        ty in arb_type(),
        total in arb_amount(),
        start in arb_balance(),
    ) {
        let ctx = make_ctx(ty, total);
        let applied = LedgerEngine::apply(&ctx, start);
        prop_assert_eq!(applied.entry.balance, applied.new_balance);
        prop_assert_eq!(applied.new_balance - start, applied.entry.amount);
        prop_assert_eq!(applied.entry.status, EntryStatus::Unpaid);
        prop_assert_eq!(applied.entry.paid, Decimal::ZERO);
    }

    /// Orders and their returns carry opposite balance signs.
    #[test]
    fn prop_returns_invert_order_sign(total in arb_amount()) {
        prop_assert_eq!(
            LedgerEngine::balance_effect(TransactionType::PurchaseOrder, total),
            -LedgerEngine::balance_effect(TransactionType::PurchaseReturn, total)
        );
        prop_assert_eq!(
            LedgerEngine::balance_effect(TransactionType::SalesOrder, total),
            -LedgerEngine::balance_effect(TransactionType::SalesReturn, total)
        );
    }
}
