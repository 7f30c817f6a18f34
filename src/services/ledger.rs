//! Cash register operator service
//!
//! Day-level operations an operator performs at the end of business:
//! reviewing the register and closing the day. A closed day's entries are
//! immutable; reconciliation refuses to touch them until the day is
//! reopened.

use chrono::NaiveDate;

use crate::clock::ClinicClock;
use crate::error::ChairsideResult;
use crate::models::{Amount, EntryKind, LedgerEntry};
use crate::storage::ledger::CashLedgerStore;
use crate::storage::Storage;

/// Totals for one register day
#[derive(Debug, Clone, Copy, Default)]
pub struct DayTotals {
    pub income: Amount,
    pub expense: Amount,
}

impl DayTotals {
    /// Net cash movement for the day
    pub fn net(&self) -> Amount {
        self.income - self.expense
    }
}

/// Service for cash register operations
pub struct LedgerService<'a> {
    storage: &'a Storage,
    clock: ClinicClock,
}

impl<'a> LedgerService<'a> {
    /// Create a new ledger service
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            clock: ClinicClock::kst(),
        }
    }

    /// List register entries for one civil day, oldest first
    pub fn list_day(&self, day: NaiveDate) -> ChairsideResult<Vec<LedgerEntry>> {
        self.storage
            .ledger
            .entries_in_range(self.clock.day_start(day), self.clock.day_end(day))
    }

    /// List register entries for an inclusive civil-date range
    pub fn list_range(&self, start: NaiveDate, end: NaiveDate) -> ChairsideResult<Vec<LedgerEntry>> {
        self.storage
            .ledger
            .entries_in_range(self.clock.day_start(start), self.clock.day_end(end))
    }

    /// Income/expense totals for one civil day
    pub fn day_totals(&self, day: NaiveDate) -> ChairsideResult<DayTotals> {
        let mut totals = DayTotals::default();
        for entry in self.list_day(day)? {
            match entry.kind {
                EntryKind::Income => totals.income += entry.amount,
                EntryKind::Expense => totals.expense += entry.amount,
            }
        }
        Ok(totals)
    }

    /// Close a register day, locking every entry on it
    ///
    /// Returns the number of entries locked. A day with no entries cannot
    /// be closed (there is nothing to lock), so the count may be zero.
    pub fn close_day(&self, day: NaiveDate) -> ChairsideResult<usize> {
        let count = self.storage.ledger.set_closed_in_range(
            self.clock.day_start(day),
            self.clock.day_end(day),
            true,
        )?;
        if count > 0 {
            tracing::info!(%day, entries = count, "cash register day closed");
        }
        Ok(count)
    }

    /// Reopen a previously closed register day
    pub fn reopen_day(&self, day: NaiveDate) -> ChairsideResult<usize> {
        let count = self.storage.ledger.set_closed_in_range(
            self.clock.day_start(day),
            self.clock.day_end(day),
            false,
        )?;
        if count > 0 {
            tracing::info!(%day, entries = count, "cash register day reopened");
        }
        Ok(count)
    }

    /// Whether the given day is closed
    pub fn is_closed(&self, day: NaiveDate) -> ChairsideResult<bool> {
        self.storage
            .ledger
            .any_closed_in_range(self.clock.day_start(day), self.clock.day_end(day))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::ChairsidePaths;
    use crate::models::LedgerEntry;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = ChairsidePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn seed_entry(storage: &Storage, day: NaiveDate, kind: EntryKind, amount: i64) {
        use crate::storage::CashLedgerStore;
        let clock = ClinicClock::kst();
        storage
            .ledger
            .insert(LedgerEntry::new(
                clock.day_start(day),
                kind,
                Amount::from_won(amount),
                "테스트",
                None,
            ))
            .unwrap();
    }

    #[test]
    fn test_close_and_reopen() {
        let (_temp_dir, storage) = create_test_storage();
        let service = LedgerService::new(&storage);

        seed_entry(&storage, date(10), EntryKind::Income, 100000);
        seed_entry(&storage, date(10), EntryKind::Expense, 30000);
        seed_entry(&storage, date(11), EntryKind::Income, 50000);

        assert_eq!(service.close_day(date(10)).unwrap(), 2);
        assert!(service.is_closed(date(10)).unwrap());
        assert!(!service.is_closed(date(11)).unwrap());

        assert_eq!(service.reopen_day(date(10)).unwrap(), 2);
        assert!(!service.is_closed(date(10)).unwrap());
    }

    #[test]
    fn test_closing_empty_day_locks_nothing() {
        let (_temp_dir, storage) = create_test_storage();
        let service = LedgerService::new(&storage);

        assert_eq!(service.close_day(date(10)).unwrap(), 0);
        assert!(!service.is_closed(date(10)).unwrap());
    }

    #[test]
    fn test_day_totals() {
        let (_temp_dir, storage) = create_test_storage();
        let service = LedgerService::new(&storage);

        seed_entry(&storage, date(10), EntryKind::Income, 100000);
        seed_entry(&storage, date(10), EntryKind::Income, 50000);
        seed_entry(&storage, date(10), EntryKind::Expense, 30000);

        let totals = service.day_totals(date(10)).unwrap();
        assert_eq!(totals.income.won(), 150000);
        assert_eq!(totals.expense.won(), 30000);
        assert_eq!(totals.net().won(), 120000);
    }

    #[test]
    fn test_list_range_spans_days() {
        let (_temp_dir, storage) = create_test_storage();
        let service = LedgerService::new(&storage);

        seed_entry(&storage, date(10), EntryKind::Income, 1);
        seed_entry(&storage, date(12), EntryKind::Income, 2);
        seed_entry(&storage, date(15), EntryKind::Income, 3);

        let entries = service.list_range(date(10), date(12)).unwrap();
        assert_eq!(entries.len(), 2);
    }
}
