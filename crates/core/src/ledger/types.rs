//! Party ledger entry types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::workflow::types::{PartyKind, TransactionType};

/// Settlement status of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntryStatus {
    /// Not yet settled.
    Unpaid,
    /// Partially settled.
    Partial,
    /// Fully settled.
    Paid,
    /// Compensating entry for a reversed effect.
    Reversed,
}

impl EntryStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unpaid => "UNPAID",
            Self::Partial => "PARTIAL",
            Self::Paid => "PAID",
            Self::Reversed => "REVERSED",
        }
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The slice of a transaction the ledger engine needs.
#[derive(Debug, Clone)]
pub struct LedgerContext {
    /// The transaction id (referenced weakly for traceability).
    pub transaction_id: Uuid,
    /// Document type driving the balance sign.
    pub transaction_type: TransactionType,
    /// The counterparty.
    pub party_id: Uuid,
    /// Customer or vendor; picks the log the entry lands in.
    pub party_kind: PartyKind,
    /// Document number shown on the ledger.
    pub transaction_no: String,
    /// The transaction total.
    pub total_amount: Decimal,
    /// Document date.
    pub date: NaiveDate,
}

/// Draft of one immutable ledger entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntryDraft {
    /// The counterparty.
    pub party_id: Uuid,
    /// Customer or vendor.
    pub party_kind: PartyKind,
    /// The event this entry records.
    pub event_type: TransactionType,
    /// Entry date.
    pub date: NaiveDate,
    /// Document number.
    pub document_no: String,
    /// Signed amount applied to the balance.
    pub amount: Decimal,
    /// Amount already settled (always zero at creation).
    pub paid: Decimal,
    /// Running balance immediately after this entry.
    pub balance: Decimal,
    /// Source reference: transaction id, or `REV-<id>` for reversals.
    pub reference: String,
    /// Settlement status.
    pub status: EntryStatus,
}

/// Balance update plus the entry that records it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEffect {
    /// The party's balance after the effect.
    pub new_balance: Decimal,
    /// The entry to append.
    pub entry: LedgerEntryDraft,
}
