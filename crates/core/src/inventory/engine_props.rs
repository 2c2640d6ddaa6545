//! Property-based tests for the inventory engine.

use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::inventory::engine::InventoryEngine;
use crate::inventory::types::{MovementRecord, StockSnapshot};
use crate::workflow::types::{LineItem, TransactionType};

fn arb_type() -> impl Strategy<Value = TransactionType> {
    prop_oneof![
        Just(TransactionType::SalesOrder),
        Just(TransactionType::PurchaseOrder),
        Just(TransactionType::SalesReturn),
        Just(TransactionType::PurchaseReturn),
    ]
}

fn arb_qty() -> impl Strategy<Value = Decimal> {
    (0i64..100_000).prop_map(Decimal::from)
}

fn arb_amount() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn make_item(qty: Decimal, rate: Decimal) -> LineItem {
    LineItem {
        item_id: Uuid::from_u128(1),
        item_code: "X".to_string(),
        description: "x".to_string(),
        qty,
        rate: Some(rate),
        price: None,
        vat_percent: Decimal::ZERO,
        vat_amount: Decimal::ZERO,
        line_total: rate,
        grand_total: rate,
        package: Decimal::ZERO,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Purchases and sales of the same quantity are exact opposites.
    #[test]
    fn prop_quantity_change_signs_are_opposite(qty in arb_qty()) {
        let purchase = InventoryEngine::quantity_change(TransactionType::PurchaseOrder, qty);
        let sale = InventoryEngine::quantity_change(TransactionType::SalesOrder, qty);
        prop_assert_eq!(purchase, -sale);

        let sales_return = InventoryEngine::quantity_change(TransactionType::SalesReturn, qty);
        let purchase_return = InventoryEngine::quantity_change(TransactionType::PurchaseReturn, qty);
        prop_assert_eq!(sales_return, -purchase_return);
    }

    /// A movement followed by its reversal restores the stock level exactly.
    #[test]
    fn prop_reversal_restores_stock(
        ty in arb_type(),
        qty in arb_qty(),
        rate in arb_amount(),
        start in -50_000i64..50_000,
    ) {
        let start = Decimal::from(start);
        let stock = StockSnapshot {
            item_id: Uuid::from_u128(2),
            current_stock: start,
            purchase_price: Decimal::ONE,
            batch_number: None,
            expiry_date: None,
        };
        let plan = InventoryEngine::plan_movement(ty, &make_item(qty, rate), &stock, "DOC-1");
        prop_assert_eq!(plan.new_stock - plan.previous_stock, plan.quantity);

        let original = MovementRecord {
            id: Uuid::from_u128(3),
            item_id: plan.item_id,
            quantity: plan.quantity,
            unit_cost: plan.unit_cost,
            event_type: plan.event_type,
            notes: plan.notes.clone(),
            batch_number: None,
            expiry_date: None,
        };
        let reversal = InventoryEngine::plan_reversal(&original, plan.new_stock, "DOC-1");
        prop_assert_eq!(reversal.movement.new_stock, start);
        prop_assert_eq!(reversal.movement.quantity, -plan.quantity);
    }

    /// The weighted-average denominator guard never panics and yields the
    /// old cost whenever the combined quantity is not positive.
    #[test]
    fn prop_weighted_average_guard(
        old_cost in arb_amount(),
        old_stock in -10_000i64..10_000,
        value in arb_amount(),
        qty in arb_qty(),
    ) {
        let old_stock = Decimal::from(old_stock);
        let cost = InventoryEngine::weighted_average_cost(old_cost, old_stock, value, qty);
        if old_stock + qty <= Decimal::ZERO {
            prop_assert_eq!(cost, old_cost);
        } else {
            prop_assert!(cost.scale() <= 2);
        }
    }
}
