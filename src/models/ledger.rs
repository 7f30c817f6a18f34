//! Cash register (시재) ledger entry model
//!
//! One entry per cash-settled financial event. Entries are derived from
//! source records by the reconciliation engine and are never created
//! directly by a user action.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::LedgerEntryId;
use super::money::Amount;
use super::payment::SourceRef;

/// Direction of a cash movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Cash received (수입)
    Income,
    /// Cash paid out (지출)
    Expense,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "수입"),
            Self::Expense => write!(f, "지출"),
        }
    }
}

/// A single cash register record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Unique identifier
    pub id: LedgerEntryId,

    /// The clinic civil day of the cash movement, anchored to clinic
    /// midnight in UTC
    pub date: DateTime<Utc>,

    /// Income or expense
    pub kind: EntryKind,

    /// Always stored positive; direction is implied by `kind`
    pub amount: Amount,

    /// Human-readable label, e.g. "김민준 현금결제"
    pub description: String,

    /// The payment instance this entry derives from, if any
    pub source: Option<SourceRef>,

    /// Entry has been confirmed during a register count
    #[serde(default)]
    pub completed: bool,

    /// Entry has been folded into a grouped register line
    #[serde(default)]
    pub grouped: bool,

    /// Entry belongs to a closed (reconciled, locked) day; terminal state
    #[serde(default)]
    pub closed: bool,

    /// When the entry was created
    pub created_at: DateTime<Utc>,

    /// When the entry was last modified
    pub updated_at: DateTime<Utc>,
}

impl LedgerEntry {
    /// Create a new open ledger entry
    pub fn new(
        date: DateTime<Utc>,
        kind: EntryKind,
        amount: Amount,
        description: impl Into<String>,
        source: Option<SourceRef>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: LedgerEntryId::new(),
            date,
            kind,
            amount,
            description: description.into(),
            source,
            completed: false,
            grouped: false,
            closed: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether this entry may still be mutated
    pub fn is_locked(&self) -> bool {
        self.closed
    }

    /// Signed amount: positive for income, negative for expense
    pub fn signed_amount(&self) -> Amount {
        match self.kind {
            EntryKind::Income => self.amount,
            EntryKind::Expense => -self.amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ids::TransactionId;
    use crate::models::payment::PaymentSlot;

    fn sample_entry() -> LedgerEntry {
        LedgerEntry::new(
            Utc::now(),
            EntryKind::Income,
            Amount::from_won(50000),
            "김민준 현금결제",
            Some(SourceRef::Transaction {
                id: TransactionId::new(),
                slot: PaymentSlot::Flat,
            }),
        )
    }

    #[test]
    fn test_new_entry_is_open() {
        let entry = sample_entry();
        assert!(!entry.completed);
        assert!(!entry.grouped);
        assert!(!entry.closed);
        assert!(!entry.is_locked());
    }

    #[test]
    fn test_signed_amount() {
        let mut entry = sample_entry();
        assert_eq!(entry.signed_amount().won(), 50000);
        entry.kind = EntryKind::Expense;
        assert_eq!(entry.signed_amount().won(), -50000);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(EntryKind::Income.to_string(), "수입");
        assert_eq!(EntryKind::Expense.to_string(), "지출");
    }

    #[test]
    fn test_serialization_roundtrip() {
        let entry = sample_entry();
        let json = serde_json::to_string(&entry).unwrap();
        let back: LedgerEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, entry.id);
        assert_eq!(back.amount, entry.amount);
        assert_eq!(back.source, entry.source);
    }
}
