//! Lifecycle validation and line-item calculation.
//!
//! The orchestrating repository composes these checks around its
//! database transaction; everything here is pure.

use rust_decimal::{Decimal, RoundingStrategy};

use super::error::WorkflowError;
use super::types::{
    LineItem, LineItemInput, ProcessAction, TransactionStatus, TransactionType,
};

/// Type-specific flags set alongside `APPROVED`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApprovalFlags {
    /// Goods received note generated (purchase orders).
    pub grn_generated: bool,
    /// Invoice generated (sales orders).
    pub invoice_generated: bool,
    /// Credit note issued (sales returns).
    pub credit_note_issued: bool,
}

/// Stateless service for lifecycle validation and item math.
pub struct WorkflowService;

impl WorkflowService {
    /// Validate that a transaction can still be modified.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::AlreadyProcessed` once the status left `Draft`.
    pub fn validate_can_modify(status: TransactionStatus) -> Result<(), WorkflowError> {
        if status.is_processed() {
            return Err(WorkflowError::AlreadyProcessed(status));
        }
        Ok(())
    }

    /// Validate a requested action against the current status.
    ///
    /// Approve and reject only apply to drafts. Cancel additionally
    /// applies to approved transactions, which then go through the
    /// reversal path.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::InvalidAction` for unrecognized action names
    /// and `WorkflowError::AlreadyProcessed` for statuses the action does
    /// not apply to.
    pub fn validate_action(
        status: TransactionStatus,
        action: &str,
    ) -> Result<ProcessAction, WorkflowError> {
        let action = ProcessAction::parse(action)
            .ok_or_else(|| WorkflowError::InvalidAction(action.to_string()))?;
        match action {
            ProcessAction::Approve | ProcessAction::Reject => Self::validate_can_modify(status)?,
            ProcessAction::Cancel => {
                if !matches!(
                    status,
                    TransactionStatus::Draft | TransactionStatus::Approved
                ) {
                    return Err(WorkflowError::AlreadyProcessed(status));
                }
            }
        }
        Ok(action)
    }

    /// Validate that the line items of a new transaction are present.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::EmptyItems` for an empty item list.
    pub fn validate_items(items: &[LineItemInput]) -> Result<(), WorkflowError> {
        if items.is_empty() {
            return Err(WorkflowError::EmptyItems);
        }
        Ok(())
    }

    /// The status a recognized action transitions to.
    #[must_use]
    pub fn status_for_action(action: ProcessAction) -> TransactionStatus {
        match action {
            ProcessAction::Approve => TransactionStatus::Approved,
            ProcessAction::Reject => TransactionStatus::Rejected,
            ProcessAction::Cancel => TransactionStatus::Cancelled,
        }
    }

    /// Type-specific flags to set when a transaction is approved.
    #[must_use]
    pub fn approval_flags(transaction_type: TransactionType) -> ApprovalFlags {
        match transaction_type {
            TransactionType::PurchaseOrder => ApprovalFlags {
                grn_generated: true,
                ..ApprovalFlags::default()
            },
            TransactionType::SalesOrder => ApprovalFlags {
                invoice_generated: true,
                ..ApprovalFlags::default()
            },
            TransactionType::SalesReturn => ApprovalFlags {
                credit_note_issued: true,
                ..ApprovalFlags::default()
            },
            TransactionType::PurchaseReturn => ApprovalFlags::default(),
        }
    }

    /// Calculate VAT-inclusive line items and their sum.
    ///
    /// `price` wins over `rate` as the unit price; both missing means a
    /// zero-value line. VAT amount and line total are rounded to 2dp,
    /// midpoint away from zero. The caller's `grand_total` override is
    /// honored, defaulting to the computed line total.
    #[must_use]
    pub fn calculate_line_items(items: &[LineItemInput]) -> (Vec<LineItem>, Decimal) {
        let processed: Vec<LineItem> = items.iter().map(Self::calculate_line_item).collect();
        let total = processed.iter().map(|i| i.line_total).sum();
        (processed, total)
    }

    fn calculate_line_item(item: &LineItemInput) -> LineItem {
        let unit_price = item.price.or(item.rate).unwrap_or(Decimal::ZERO);
        let line_value = item.qty * unit_price;
        let vat_percent = item.vat_percent.unwrap_or(Decimal::ZERO);
        let vat_amount = round2(line_value * vat_percent / Decimal::ONE_HUNDRED);
        let line_total = round2(line_value + vat_amount);

        let item_code = item
            .item_code
            .clone()
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| item.item_id.to_string());

        LineItem {
            item_id: item.item_id,
            item_code,
            description: item.description.clone(),
            qty: item.qty,
            rate: item.rate,
            price: item.price,
            vat_percent,
            vat_amount,
            line_total,
            grand_total: item.grand_total.unwrap_or(line_total),
            package: item.package.unwrap_or(Decimal::ZERO),
        }
    }
}

/// Round to 2 decimal places, midpoint away from zero.
pub(crate) fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn make_input(qty: Decimal, price: Decimal, vat_percent: Decimal) -> LineItemInput {
        LineItemInput {
            item_id: Uuid::new_v4(),
            item_code: Some("WID-1".to_string()),
            description: "Widget".to_string(),
            qty,
            rate: None,
            price: Some(price),
            vat_percent: Some(vat_percent),
            package: None,
            grand_total: None,
        }
    }

    #[test]
    fn test_calculate_line_items_vat_inclusive() {
        let items = vec![make_input(dec!(10), dec!(5), dec!(15))];
        let (processed, total) = WorkflowService::calculate_line_items(&items);

        assert_eq!(processed.len(), 1);
        // 10 * 5 = 50, VAT 15% = 7.50, total 57.50
        assert_eq!(processed[0].vat_amount, dec!(7.50));
        assert_eq!(processed[0].line_total, dec!(57.50));
        assert_eq!(processed[0].grand_total, dec!(57.50));
        assert_eq!(total, dec!(57.50));
    }

    #[test]
    fn test_calculate_line_items_rate_fallback() {
        let mut input = make_input(dec!(3), dec!(0), dec!(0));
        input.price = None;
        input.rate = Some(dec!(7));

        let (processed, total) = WorkflowService::calculate_line_items(&[input]);
        assert_eq!(processed[0].line_total, dec!(21));
        assert_eq!(total, dec!(21));
    }

    #[test]
    fn test_calculate_line_items_price_wins_over_rate() {
        let mut input = make_input(dec!(2), dec!(10), dec!(0));
        input.rate = Some(dec!(99));

        let (processed, _) = WorkflowService::calculate_line_items(&[input]);
        assert_eq!(processed[0].line_total, dec!(20));
    }

    #[test]
    fn test_calculate_line_items_rounding() {
        // 3 * 3.333 = 9.999, VAT 5% = 0.49995 -> 0.50, total 10.50
        let items = vec![make_input(dec!(3), dec!(3.333), dec!(5))];
        let (processed, _) = WorkflowService::calculate_line_items(&items);
        assert_eq!(processed[0].vat_amount, dec!(0.50));
        assert_eq!(processed[0].line_total, dec!(10.50));
    }

    #[test]
    fn test_calculate_line_items_missing_prices() {
        let mut input = make_input(dec!(4), dec!(0), dec!(20));
        input.price = None;
        input.rate = None;

        let (processed, total) = WorkflowService::calculate_line_items(&[input]);
        assert_eq!(processed[0].line_total, Decimal::ZERO);
        assert_eq!(total, Decimal::ZERO);
    }

    #[test]
    fn test_item_code_falls_back_to_item_id() {
        let mut input = make_input(dec!(1), dec!(1), dec!(0));
        input.item_code = None;
        let (processed, _) = WorkflowService::calculate_line_items(&[input.clone()]);
        assert_eq!(processed[0].item_code, input.item_id.to_string());
    }

    #[test]
    fn test_grand_total_override() {
        let mut input = make_input(dec!(1), dec!(100), dec!(0));
        input.grand_total = Some(dec!(95));
        let (processed, _) = WorkflowService::calculate_line_items(&[input]);
        assert_eq!(processed[0].grand_total, dec!(95));
        assert_eq!(processed[0].line_total, dec!(100));
    }

    #[test]
    fn test_validate_items_empty() {
        assert!(matches!(
            WorkflowService::validate_items(&[]),
            Err(WorkflowError::EmptyItems)
        ));
    }

    #[test]
    fn test_validate_action_valid() {
        let action = WorkflowService::validate_action(TransactionStatus::Draft, "approve");
        assert_eq!(action.unwrap(), ProcessAction::Approve);
    }

    #[test]
    fn test_validate_action_unknown_name() {
        assert!(matches!(
            WorkflowService::validate_action(TransactionStatus::Draft, "void"),
            Err(WorkflowError::InvalidAction(_))
        ));
    }

    #[test]
    fn test_validate_action_already_processed() {
        for status in [
            TransactionStatus::Approved,
            TransactionStatus::Rejected,
            TransactionStatus::Cancelled,
            TransactionStatus::Paid,
            TransactionStatus::Partial,
        ] {
            assert!(matches!(
                WorkflowService::validate_action(status, "approve"),
                Err(WorkflowError::AlreadyProcessed(_))
            ));
            assert!(matches!(
                WorkflowService::validate_action(status, "reject"),
                Err(WorkflowError::AlreadyProcessed(_))
            ));
        }
    }

    #[test]
    fn test_cancel_allowed_on_approved() {
        assert_eq!(
            WorkflowService::validate_action(TransactionStatus::Approved, "cancel").unwrap(),
            ProcessAction::Cancel
        );
        for status in [
            TransactionStatus::Rejected,
            TransactionStatus::Cancelled,
            TransactionStatus::Paid,
            TransactionStatus::Partial,
        ] {
            assert!(matches!(
                WorkflowService::validate_action(status, "cancel"),
                Err(WorkflowError::AlreadyProcessed(_))
            ));
        }
    }

    #[test]
    fn test_status_for_action() {
        assert_eq!(
            WorkflowService::status_for_action(ProcessAction::Approve),
            TransactionStatus::Approved
        );
        assert_eq!(
            WorkflowService::status_for_action(ProcessAction::Reject),
            TransactionStatus::Rejected
        );
        assert_eq!(
            WorkflowService::status_for_action(ProcessAction::Cancel),
            TransactionStatus::Cancelled
        );
    }

    #[test]
    fn test_approval_flags_by_type() {
        assert!(WorkflowService::approval_flags(TransactionType::PurchaseOrder).grn_generated);
        assert!(WorkflowService::approval_flags(TransactionType::SalesOrder).invoice_generated);
        assert!(WorkflowService::approval_flags(TransactionType::SalesReturn).credit_note_issued);
        assert_eq!(
            WorkflowService::approval_flags(TransactionType::PurchaseReturn),
            ApprovalFlags::default()
        );
    }
}
