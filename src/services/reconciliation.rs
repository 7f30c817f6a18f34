//! Cash register reconciliation
//!
//! Keeps the derived cash ledger consistent with the primary transaction and
//! expense records. Every source-record mutation is followed by a
//! reconciliation pass that diffs the old and new payment lines and applies
//! the minimal set of ledger inserts, updates, and deletes.
//!
//! Two rules shape everything here:
//!
//! 1. A ledger entry whose day has been closed is immutable. Attempts to
//!    touch it fail with a closed-period error.
//! 2. The engine never throws past its boundary. Failures are collected into
//!    a [`ReconciliationOutcome`] and the caller decides whether to log and
//!    continue (transaction paths) or propagate (expense deletion).

use std::collections::BTreeSet;
use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::clock::ClinicClock;
use crate::error::{ChairsideError, ChairsideResult};
use crate::models::{
    Amount, EntryKind, Expense, LedgerEntry, PaymentLine, PaymentSlot, SourceRef, Transaction,
};
use crate::storage::CashLedgerStore;

/// Result of a reconciliation pass
///
/// A pass over a multi-line transaction applies each line independently;
/// failures on one line never roll back another. `Ok` means every line
/// applied cleanly.
#[derive(Debug, Default)]
pub struct ReconciliationOutcome {
    failures: Vec<ReconciliationFailure>,
}

/// A single payment instance the engine could not reconcile
#[derive(Debug)]
pub struct ReconciliationFailure {
    /// The payment instance that failed
    pub source: SourceRef,
    /// Amount involved, for operator context
    pub amount: Amount,
    /// Ledger description involved, for operator context
    pub description: String,
    /// Why it failed: closed period or persistence
    pub error: ChairsideError,
}

impl ReconciliationOutcome {
    /// Whether every ledger operation applied cleanly
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }

    /// The failures collected during the pass
    pub fn failures(&self) -> &[ReconciliationFailure] {
        &self.failures
    }

    /// Convert to a `Result`, surfacing the first failure
    ///
    /// Used by the expense-deletion path, which aborts on ledger failure.
    pub fn into_result(mut self) -> ChairsideResult<()> {
        if self.failures.is_empty() {
            Ok(())
        } else {
            Err(self.failures.remove(0).error)
        }
    }

    /// Emit a warning per failure and carry on
    ///
    /// Used by the transaction paths, where the source write has already
    /// committed and reconciliation drift is left for the ledger audit.
    pub fn log_failures(&self, operation: &str) {
        for failure in &self.failures {
            tracing::warn!(
                source = %failure.source,
                amount = %failure.amount,
                description = %failure.description,
                error = %failure.error,
                "cash ledger reconciliation failed during {}",
                operation
            );
        }
    }

    fn record(
        &mut self,
        source: SourceRef,
        amount: Amount,
        description: &str,
        error: ChairsideError,
    ) {
        self.failures.push(ReconciliationFailure {
            source,
            amount,
            description: description.to_string(),
            error,
        });
    }
}

/// The cash register reconciliation engine
///
/// Borrows the ledger store behind the [`CashLedgerStore`] trait so tests
/// can substitute failing doubles.
pub struct CashReconciler<'a> {
    ledger: &'a dyn CashLedgerStore,
    clock: ClinicClock,
}

impl<'a> CashReconciler<'a> {
    /// Create a reconciler over a ledger store with the production clock
    pub fn new(ledger: &'a dyn CashLedgerStore) -> Self {
        Self {
            ledger,
            clock: ClinicClock::kst(),
        }
    }

    /// Create a reconciler with an explicit clock (used by tests)
    pub fn with_clock(ledger: &'a dyn CashLedgerStore, clock: ClinicClock) -> Self {
        Self { ledger, clock }
    }

    /// Reconcile the ledger against a transaction mutation
    ///
    /// Pass `(None, Some)` for create, `(Some, Some)` for update and
    /// `(Some, None)` for delete. Old and new payment lines are paired by
    /// slot; each pair is reconciled independently and failures are
    /// collected rather than short-circuiting.
    pub fn reconcile_transaction(
        &self,
        old: Option<&Transaction>,
        new: Option<&Transaction>,
    ) -> ReconciliationOutcome {
        let mut outcome = ReconciliationOutcome::default();

        let Some(record) = new.or(old) else {
            return outcome;
        };
        let id = record.id;
        let description = record.cash_description();

        let old_lines: HashMap<PaymentSlot, PaymentLine> =
            old.map(|t| t.payment_lines().into_iter().collect()).unwrap_or_default();
        let new_lines: HashMap<PaymentSlot, PaymentLine> =
            new.map(|t| t.payment_lines().into_iter().collect()).unwrap_or_default();

        let slots: BTreeSet<PaymentSlot> =
            old_lines.keys().chain(new_lines.keys()).copied().collect();

        for slot in slots {
            let source = SourceRef::Transaction { id, slot };
            let old_line = old_lines.get(&slot);
            let new_line = new_lines.get(&slot);

            if let Err(error) =
                self.reconcile_line(source, EntryKind::Income, old_line, new_line, &description)
            {
                let amount = new_line
                    .or(old_line)
                    .map(|l| l.amount)
                    .unwrap_or_else(Amount::zero);
                outcome.record(source, amount, &description, error);
            }
        }

        outcome
    }

    /// Reconcile the ledger against an expense mutation
    ///
    /// An expense is a single payment instance, so the pass is one line.
    pub fn reconcile_expense(
        &self,
        old: Option<&Expense>,
        new: Option<&Expense>,
    ) -> ReconciliationOutcome {
        let mut outcome = ReconciliationOutcome::default();

        let Some(record) = new.or(old) else {
            return outcome;
        };
        let source = record.source_ref();
        let description = record.description.clone();

        let old_line = old.map(|e| e.payment_line());
        let new_line = new.map(|e| e.payment_line());

        if let Err(error) = self.reconcile_line(
            source,
            EntryKind::Expense,
            old_line.as_ref(),
            new_line.as_ref(),
            &description,
        ) {
            let amount = new_line
                .or(old_line)
                .map(|l| l.amount)
                .unwrap_or_else(Amount::zero);
            outcome.record(source, amount, &description, error);
        }

        outcome
    }

    /// Whether the civil day containing `instant` has been closed
    ///
    /// Fail-open: a lookup failure reports the day as open, so a transient
    /// read error never blocks legitimate edits. The ledger tolerates
    /// eventual consistency; the source records do not.
    pub fn is_closed(&self, instant: DateTime<Utc>) -> bool {
        let (start, end) = self.clock.day_window(instant);
        self.ledger.any_closed_in_range(start, end).unwrap_or(false)
    }

    /// Apply the payment-method transition for one payment instance
    fn reconcile_line(
        &self,
        source: SourceRef,
        kind: EntryKind,
        old: Option<&PaymentLine>,
        new: Option<&PaymentLine>,
        description: &str,
    ) -> ChairsideResult<()> {
        let old_cash = old.filter(|l| l.method.is_cash());
        let new_cash = new.filter(|l| l.method.is_cash());

        match (old_cash, new_cash) {
            // Never was cash, still isn't: nothing to reconcile.
            (None, None) => Ok(()),

            // Became cash: a fresh entry, no guard needed since no prior
            // entry can exist for this instance.
            (None, Some(line)) => self.insert_entry(source, kind, line, description),

            // Stopped being cash (method switch or record deletion): the
            // entry goes away, unless its day is already closed.
            (Some(_), None) => {
                if let Some(entry) = self.ledger.find_by_source(&source)? {
                    self.guard(&entry)?;
                    self.ledger.delete(entry.id)?;
                }
                Ok(())
            }

            // Cash both before and after: diff amount and date.
            (Some(_), Some(new_line)) => {
                let Some(entry) = self.ledger.find_by_source(&source)? else {
                    // The entry drifted away; rebuild it from the
                    // authoritative source record.
                    return self.insert_entry(source, kind, new_line, description);
                };

                let new_date = self.clock.day_start(new_line.date);

                if entry.date == new_date {
                    if entry.amount == new_line.amount {
                        // Idempotent no-op.
                        return Ok(());
                    }
                    self.guard(&entry)?;
                    self.ledger.update_amount(entry.id, new_line.amount)
                } else {
                    // A date change is an entry replacement, never an
                    // in-place date edit: each day's register stays
                    // append-only.
                    self.guard(&entry)?;
                    self.ledger.delete(entry.id)?;
                    self.insert_entry(source, kind, new_line, description)
                }
            }
        }
    }

    fn insert_entry(
        &self,
        source: SourceRef,
        kind: EntryKind,
        line: &PaymentLine,
        description: &str,
    ) -> ChairsideResult<()> {
        let entry = LedgerEntry::new(
            self.clock.day_start(line.date),
            kind,
            line.amount,
            description,
            Some(source),
        );
        self.ledger.insert(entry)
    }

    fn guard(&self, entry: &LedgerEntry) -> ChairsideResult<()> {
        if self.is_closed(entry.date) {
            Err(ChairsideError::ClosedPeriod {
                date: self.clock.civil_date(entry.date),
            })
        } else {
            Ok(())
        }
    }
}
