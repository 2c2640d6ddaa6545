//! Stock delta and cost math.

use rust_decimal::Decimal;

use super::types::{MovementEvent, MovementPlan, MovementRecord, ReversalPlan, StockSnapshot};
use crate::workflow::service::round2;
use crate::workflow::types::{LineItem, TransactionType};

/// Stateless inventory effect engine.
///
/// Stock is updated unconditionally; a sales order may drive it
/// negative. Ordering ahead of confirmed stock is allowed.
pub struct InventoryEngine;

impl InventoryEngine {
    /// Signed quantity delta for a transaction type.
    #[must_use]
    pub fn quantity_change(transaction_type: TransactionType, qty: Decimal) -> Decimal {
        match transaction_type {
            TransactionType::PurchaseOrder | TransactionType::SalesReturn => qty,
            TransactionType::SalesOrder | TransactionType::PurchaseReturn => -qty,
        }
    }

    /// Event label for a transaction type.
    #[must_use]
    pub fn event_type(transaction_type: TransactionType) -> MovementEvent {
        match transaction_type {
            TransactionType::PurchaseOrder => MovementEvent::PurchaseReceive,
            TransactionType::SalesOrder => MovementEvent::SalesDispatch,
            TransactionType::PurchaseReturn => MovementEvent::PurchaseReturn,
            TransactionType::SalesReturn => MovementEvent::SalesReturn,
        }
    }

    /// Weighted-average cost after receiving `line_value` worth of `qty`.
    ///
    /// `new = (old_cost * old_stock + line_value) / (old_stock + qty)`,
    /// keeping the old cost when the resulting quantity is not positive.
    #[must_use]
    pub fn weighted_average_cost(
        old_cost: Decimal,
        old_stock: Decimal,
        line_value: Decimal,
        qty: Decimal,
    ) -> Decimal {
        let total_quantity = old_stock + qty;
        if total_quantity <= Decimal::ZERO {
            return old_cost;
        }
        round2((old_cost * old_stock + line_value) / total_quantity)
    }

    /// Plans the movement for one line item.
    ///
    /// The line's `rate` is its value; the per-unit cost is `rate / qty`
    /// (a zero quantity divides by one instead). Purchase orders also
    /// reprice the stock via the weighted average.
    #[must_use]
    pub fn plan_movement(
        transaction_type: TransactionType,
        item: &LineItem,
        stock: &StockSnapshot,
        transaction_no: &str,
    ) -> MovementPlan {
        let quantity = Self::quantity_change(transaction_type, item.qty);
        let new_stock = stock.current_stock + quantity;
        let event_type = Self::event_type(transaction_type);

        let line_value = item.rate.unwrap_or(Decimal::ZERO);
        let unit_cost = if line_value == Decimal::ZERO {
            Decimal::ZERO
        } else {
            let divisor = if item.qty == Decimal::ZERO {
                Decimal::ONE
            } else {
                item.qty
            };
            line_value / divisor
        };

        let cost_update = (transaction_type == TransactionType::PurchaseOrder).then(|| {
            Self::weighted_average_cost(
                stock.purchase_price,
                stock.current_stock,
                line_value,
                item.qty,
            )
        });

        MovementPlan {
            item_id: stock.item_id,
            quantity,
            previous_stock: stock.current_stock,
            new_stock,
            cost_update,
            event_type,
            reference_number: transaction_no.to_string(),
            unit_cost,
            total_value: quantity.abs() * unit_cost,
            notes: format!("{} - {}", event_type, item.description),
            batch_number: stock.batch_number.clone(),
            expiry_date: stock.expiry_date,
        }
    }

    /// Plans the offsetting movement for a stored one.
    ///
    /// The reversal negates the original quantity against the item's
    /// *current* stock and references `REV-<transactionNo>`; the original
    /// record is only ever flagged, never edited.
    #[must_use]
    pub fn plan_reversal(
        original: &MovementRecord,
        current_stock: Decimal,
        transaction_no: &str,
    ) -> ReversalPlan {
        let quantity = -original.quantity;
        ReversalPlan {
            original_id: original.id,
            movement: MovementPlan {
                item_id: original.item_id,
                quantity,
                previous_stock: current_stock,
                new_stock: current_stock + quantity,
                cost_update: None,
                event_type: original.event_type,
                reference_number: format!("REV-{transaction_no}"),
                unit_cost: original.unit_cost,
                total_value: quantity.abs() * original.unit_cost,
                notes: format!("Reversal of {}", original.notes),
                batch_number: original.batch_number.clone(),
                expiry_date: original.expiry_date,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn make_stock(current: Decimal, price: Decimal) -> StockSnapshot {
        StockSnapshot {
            item_id: Uuid::new_v4(),
            current_stock: current,
            purchase_price: price,
            batch_number: Some("B-7".to_string()),
            expiry_date: None,
        }
    }

    fn make_item(qty: Decimal, rate: Decimal) -> LineItem {
        LineItem {
            item_id: Uuid::new_v4(),
            item_code: "WID-1".to_string(),
            description: "Widget".to_string(),
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

    #[test]
    fn test_quantity_change_signs() {
        let qty = dec!(10);
        assert_eq!(
            InventoryEngine::quantity_change(TransactionType::PurchaseOrder, qty),
            dec!(10)
        );
        assert_eq!(
            InventoryEngine::quantity_change(TransactionType::SalesOrder, qty),
            dec!(-10)
        );
        assert_eq!(
            InventoryEngine::quantity_change(TransactionType::PurchaseReturn, qty),
            dec!(-10)
        );
        assert_eq!(
            InventoryEngine::quantity_change(TransactionType::SalesReturn, qty),
            dec!(10)
        );
    }

    #[test]
    fn test_event_types() {
        assert_eq!(
            InventoryEngine::event_type(TransactionType::PurchaseOrder).as_str(),
            "PURCHASE_RECEIVE"
        );
        assert_eq!(
            InventoryEngine::event_type(TransactionType::SalesOrder).as_str(),
            "SALES_DISPATCH"
        );
        assert_eq!(
            InventoryEngine::event_type(TransactionType::PurchaseReturn).as_str(),
            "PURCHASE_RETURN"
        );
        assert_eq!(
            InventoryEngine::event_type(TransactionType::SalesReturn).as_str(),
            "SALES_RETURN"
        );
    }

    #[test]
    fn test_weighted_average_cost() {
        // 10 on hand at 2.00, receive 10 worth 30.00 -> (20 + 30) / 20 = 2.50
        assert_eq!(
            InventoryEngine::weighted_average_cost(dec!(2), dec!(10), dec!(30), dec!(10)),
            dec!(2.50)
        );
    }

    #[test]
    fn test_weighted_average_cost_zero_denominator_keeps_old() {
        assert_eq!(
            InventoryEngine::weighted_average_cost(dec!(4), dec!(-5), dec!(30), dec!(5)),
            dec!(4)
        );
        assert_eq!(
            InventoryEngine::weighted_average_cost(dec!(4), dec!(0), dec!(0), dec!(0)),
            dec!(4)
        );
    }

    #[test]
    fn test_weighted_average_cost_from_empty_stock() {
        // 0 on hand, receive 10 worth 30 -> 3.00
        assert_eq!(
            InventoryEngine::weighted_average_cost(dec!(0), dec!(0), dec!(30), dec!(10)),
            dec!(3.00)
        );
    }

    #[test]
    fn test_plan_movement_purchase_order() {
        let stock = make_stock(dec!(0), dec!(0));
        let item = make_item(dec!(10), dec!(30));
        let plan = InventoryEngine::plan_movement(
            TransactionType::PurchaseOrder,
            &item,
            &stock,
            "PO202501-00001",
        );

        assert_eq!(plan.quantity, dec!(10));
        assert_eq!(plan.previous_stock, dec!(0));
        assert_eq!(plan.new_stock, dec!(10));
        assert_eq!(plan.cost_update, Some(dec!(3.00)));
        assert_eq!(plan.unit_cost, dec!(3));
        assert_eq!(plan.total_value, dec!(30));
        assert_eq!(plan.reference_number, "PO202501-00001");
        assert_eq!(plan.event_type, MovementEvent::PurchaseReceive);
        assert_eq!(plan.notes, "PURCHASE_RECEIVE - Widget");
        assert_eq!(plan.batch_number.as_deref(), Some("B-7"));
    }

    #[test]
    fn test_plan_movement_sales_order_allows_negative_stock() {
        let stock = make_stock(dec!(3), dec!(5));
        let item = make_item(dec!(10), dec!(80));
        let plan = InventoryEngine::plan_movement(
            TransactionType::SalesOrder,
            &item,
            &stock,
            "SO202501-00001",
        );

        assert_eq!(plan.quantity, dec!(-10));
        assert_eq!(plan.new_stock, dec!(-7));
        // Sales do not reprice the stock
        assert_eq!(plan.cost_update, None);
    }

    #[test]
    fn test_plan_movement_zero_qty_unit_cost() {
        let stock = make_stock(dec!(5), dec!(2));
        let item = make_item(dec!(0), dec!(12));
        let plan = InventoryEngine::plan_movement(
            TransactionType::SalesOrder,
            &item,
            &stock,
            "SO202501-00002",
        );
        // rate / 1 when qty is zero
        assert_eq!(plan.unit_cost, dec!(12));
        assert_eq!(plan.total_value, dec!(0));
    }

    #[test]
    fn test_plan_movement_missing_rate() {
        let stock = make_stock(dec!(5), dec!(2));
        let mut item = make_item(dec!(2), dec!(0));
        item.rate = None;
        let plan = InventoryEngine::plan_movement(
            TransactionType::SalesOrder,
            &item,
            &stock,
            "SO202501-00003",
        );
        assert_eq!(plan.unit_cost, dec!(0));
    }

    #[test]
    fn test_plan_reversal_negates_quantity() {
        let original = MovementRecord {
            id: Uuid::new_v4(),
            item_id: Uuid::new_v4(),
            quantity: dec!(10),
            unit_cost: dec!(3),
            event_type: MovementEvent::PurchaseReceive,
            notes: "PURCHASE_RECEIVE - Widget".to_string(),
            batch_number: None,
            expiry_date: None,
        };

        let plan = InventoryEngine::plan_reversal(&original, dec!(10), "PO202501-00001");

        assert_eq!(plan.original_id, original.id);
        assert_eq!(plan.movement.quantity, dec!(-10));
        assert_eq!(plan.movement.previous_stock, dec!(10));
        assert_eq!(plan.movement.new_stock, dec!(0));
        assert_eq!(plan.movement.reference_number, "REV-PO202501-00001");
        assert_eq!(plan.movement.notes, "Reversal of PURCHASE_RECEIVE - Widget");
        assert_eq!(plan.movement.unit_cost, dec!(3));
        assert_eq!(plan.movement.total_value, dec!(30));
        assert_eq!(plan.movement.cost_update, None);
    }
}
