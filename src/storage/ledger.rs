//! Cash register ledger repository
//!
//! Persists ledger entries to ledger.json with an in-memory index by source
//! reference. Unlike the source-record repositories, every mutation here is
//! written through to disk immediately: the reconciliation engine must see a
//! persistence failure at the call that caused it, because its caller keeps
//! going when the ledger fails.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::{DateTime, Utc};

use crate::error::{ChairsideError, ChairsideResult};
use crate::models::{Amount, LedgerEntry, LedgerEntryId, SourceRef};

use super::file_io::{read_json, write_json_atomic};

/// The operations the reconciliation engine needs from the ledger
///
/// The production implementation is [`LedgerRepository`]; tests substitute
/// failing doubles to exercise the engine's failure isolation.
pub trait CashLedgerStore {
    /// Create a new entry; at most one entry may exist per source
    fn insert(&self, entry: LedgerEntry) -> ChairsideResult<()>;

    /// Look up the entry derived from a payment instance
    fn find_by_source(&self, source: &SourceRef) -> ChairsideResult<Option<LedgerEntry>>;

    /// Partial update touching only `amount` and `updated_at`
    fn update_amount(&self, id: LedgerEntryId, amount: Amount) -> ChairsideResult<()>;

    /// Remove an entry; returns whether it existed
    fn delete(&self, id: LedgerEntryId) -> ChairsideResult<bool>;

    /// Whether any entry in the inclusive window is marked closed
    fn any_closed_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ChairsideResult<bool>;
}

/// Serializable ledger file structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct LedgerData {
    entries: Vec<LedgerEntry>,
}

/// Repository for cash register entries
pub struct LedgerRepository {
    path: PathBuf,
    data: RwLock<HashMap<LedgerEntryId, LedgerEntry>>,
    /// Index: source -> entry id
    by_source: RwLock<HashMap<SourceRef, LedgerEntryId>>,
}

impl LedgerRepository {
    /// Create a new ledger repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_source: RwLock::new(HashMap::new()),
        }
    }

    /// Load entries from disk and build the source index
    pub fn load(&self) -> ChairsideResult<()> {
        let file_data: LedgerData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| ChairsideError::Persistence(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_source = self
            .by_source
            .write()
            .map_err(|e| ChairsideError::Persistence(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        by_source.clear();

        for entry in file_data.entries {
            if let Some(source) = entry.source {
                by_source.insert(source, entry.id);
            }
            data.insert(entry.id, entry);
        }

        Ok(())
    }

    /// Save entries to disk
    pub fn save(&self) -> ChairsideResult<()> {
        let data = self
            .data
            .read()
            .map_err(|e| ChairsideError::Persistence(format!("Failed to acquire read lock: {}", e)))?;

        let mut entries: Vec<_> = data.values().cloned().collect();
        entries.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));

        write_json_atomic(&self.path, &LedgerData { entries })
            .map_err(|e| ChairsideError::Persistence(e.to_string()))
    }

    /// Get an entry by ID
    pub fn get(&self, id: LedgerEntryId) -> ChairsideResult<Option<LedgerEntry>> {
        let data = self
            .data
            .read()
            .map_err(|e| ChairsideError::Persistence(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get all entries, newest first
    pub fn get_all(&self) -> ChairsideResult<Vec<LedgerEntry>> {
        let data = self
            .data
            .read()
            .map_err(|e| ChairsideError::Persistence(format!("Failed to acquire read lock: {}", e)))?;

        let mut entries: Vec<_> = data.values().cloned().collect();
        entries.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        Ok(entries)
    }

    /// Get entries whose date falls in the inclusive window, oldest first
    pub fn entries_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ChairsideResult<Vec<LedgerEntry>> {
        let data = self
            .data
            .read()
            .map_err(|e| ChairsideError::Persistence(format!("Failed to acquire read lock: {}", e)))?;

        let mut entries: Vec<_> = data
            .values()
            .filter(|e| e.date >= start && e.date <= end)
            .cloned()
            .collect();
        entries.sort_by(|a, b| a.date.cmp(&b.date).then(a.created_at.cmp(&b.created_at)));
        Ok(entries)
    }

    /// Set the `closed` flag on every entry in the inclusive window
    ///
    /// Returns the number of entries touched. Persists immediately.
    pub fn set_closed_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        closed: bool,
    ) -> ChairsideResult<usize> {
        let count = {
            let mut data = self.data.write().map_err(|e| {
                ChairsideError::Persistence(format!("Failed to acquire write lock: {}", e))
            })?;

            let now = Utc::now();
            let mut count = 0;
            for entry in data.values_mut() {
                if entry.date >= start && entry.date <= end && entry.closed != closed {
                    entry.closed = closed;
                    entry.updated_at = now;
                    count += 1;
                }
            }
            count
        };

        if count > 0 {
            self.save()?;
        }
        Ok(count)
    }

    /// Count entries
    pub fn count(&self) -> ChairsideResult<usize> {
        let data = self
            .data
            .read()
            .map_err(|e| ChairsideError::Persistence(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}

impl CashLedgerStore for LedgerRepository {
    fn insert(&self, entry: LedgerEntry) -> ChairsideResult<()> {
        {
            let mut data = self.data.write().map_err(|e| {
                ChairsideError::Persistence(format!("Failed to acquire write lock: {}", e))
            })?;
            let mut by_source = self.by_source.write().map_err(|e| {
                ChairsideError::Persistence(format!("Failed to acquire write lock: {}", e))
            })?;

            if let Some(source) = entry.source {
                if by_source.contains_key(&source) {
                    return Err(ChairsideError::Persistence(format!(
                        "A ledger entry already exists for source {}",
                        source
                    )));
                }
                by_source.insert(source, entry.id);
            }
            data.insert(entry.id, entry);
        }

        self.save()
    }

    fn find_by_source(&self, source: &SourceRef) -> ChairsideResult<Option<LedgerEntry>> {
        let data = self
            .data
            .read()
            .map_err(|e| ChairsideError::Persistence(format!("Failed to acquire read lock: {}", e)))?;
        let by_source = self
            .by_source
            .read()
            .map_err(|e| ChairsideError::Persistence(format!("Failed to acquire read lock: {}", e)))?;

        Ok(by_source.get(source).and_then(|id| data.get(id)).cloned())
    }

    fn update_amount(&self, id: LedgerEntryId, amount: Amount) -> ChairsideResult<()> {
        {
            let mut data = self.data.write().map_err(|e| {
                ChairsideError::Persistence(format!("Failed to acquire write lock: {}", e))
            })?;

            let entry = data
                .get_mut(&id)
                .ok_or_else(|| ChairsideError::ledger_entry_not_found(id.to_string()))?;
            entry.amount = amount;
            entry.updated_at = Utc::now();
        }

        self.save()
    }

    fn delete(&self, id: LedgerEntryId) -> ChairsideResult<bool> {
        let removed = {
            let mut data = self.data.write().map_err(|e| {
                ChairsideError::Persistence(format!("Failed to acquire write lock: {}", e))
            })?;
            let mut by_source = self.by_source.write().map_err(|e| {
                ChairsideError::Persistence(format!("Failed to acquire write lock: {}", e))
            })?;

            match data.remove(&id) {
                Some(entry) => {
                    if let Some(source) = entry.source {
                        by_source.remove(&source);
                    }
                    true
                }
                None => false,
            }
        };

        if removed {
            self.save()?;
        }
        Ok(removed)
    }

    fn any_closed_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ChairsideResult<bool> {
        let data = self
            .data
            .read()
            .map_err(|e| ChairsideError::Persistence(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data
            .values()
            .any(|e| e.closed && e.date >= start && e.date <= end))
    }
}
