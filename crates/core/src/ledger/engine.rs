//! Balance effect math and reversal.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::types::{EntryStatus, LedgerContext, LedgerEffect, LedgerEntryDraft};
use crate::workflow::types::TransactionType;

/// Stateless party ledger engine.
///
/// Entries are append-only; a reversal appends a compensating entry and
/// never touches the original.
pub struct LedgerEngine;

impl LedgerEngine {
    /// Signed balance delta a transaction applies to its party.
    ///
    /// A purchase order raises what we owe the vendor; a sales order
    /// raises what the customer owes us, carried as a negative delta on
    /// the customer balance. Returns invert their order's sign.
    #[must_use]
    pub fn balance_effect(transaction_type: TransactionType, total: Decimal) -> Decimal {
        match transaction_type {
            TransactionType::PurchaseOrder | TransactionType::SalesReturn => total,
            TransactionType::SalesOrder | TransactionType::PurchaseReturn => -total,
        }
    }

    /// Applies a transaction's effect to the party's current balance.
    ///
    /// Returns the new balance and the UNPAID entry recording it.
    #[must_use]
    pub fn apply(ctx: &LedgerContext, current_balance: Decimal) -> LedgerEffect {
        let amount = Self::balance_effect(ctx.transaction_type, ctx.total_amount);
        let new_balance = current_balance + amount;

        LedgerEffect {
            new_balance,
            entry: LedgerEntryDraft {
                party_id: ctx.party_id,
                party_kind: ctx.party_kind,
                event_type: ctx.transaction_type,
                date: ctx.date,
                document_no: ctx.transaction_no.clone(),
                amount,
                paid: Decimal::ZERO,
                balance: new_balance,
                reference: ctx.transaction_id.to_string(),
                status: EntryStatus::Unpaid,
            },
        }
    }

    /// Reverses a previously applied effect against the current balance.
    ///
    /// The compensating amount is the exact negation of the original
    /// effect; the entry carries status REVERSED and a synthesized
    /// `REV-<originalId>` reference.
    #[must_use]
    pub fn reverse(ctx: &LedgerContext, current_balance: Decimal, on: NaiveDate) -> LedgerEffect {
        let amount = -Self::balance_effect(ctx.transaction_type, ctx.total_amount);
        let new_balance = current_balance + amount;

        LedgerEffect {
            new_balance,
            entry: LedgerEntryDraft {
                party_id: ctx.party_id,
                party_kind: ctx.party_kind,
                event_type: ctx.transaction_type,
                date: on,
                document_no: ctx.transaction_no.clone(),
                amount,
                paid: Decimal::ZERO,
                balance: new_balance,
                reference: format!("REV-{}", ctx.transaction_id),
                status: EntryStatus::Reversed,
            },
        }
    }
}
