//! Storage layer for chairside
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation. Each collection lives in its own file under the data
//! directory, mirroring the document-per-collection layout of the clinic's
//! original database.

pub mod consultations;
pub mod expenses;
pub mod file_io;
pub mod ledger;
pub mod transactions;

pub use consultations::ConsultationRepository;
pub use expenses::ExpenseRepository;
pub use file_io::{read_json, write_json_atomic};
pub use ledger::{CashLedgerStore, LedgerRepository};
pub use transactions::TransactionRepository;

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::ChairsidePaths;
use crate::error::ChairsideResult;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: ChairsidePaths,
    audit: AuditLogger,
    pub transactions: TransactionRepository,
    pub expenses: ExpenseRepository,
    pub consultations: ConsultationRepository,
    pub ledger: LedgerRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: ChairsidePaths) -> ChairsideResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            audit: AuditLogger::new(paths.audit_log()),
            transactions: TransactionRepository::new(paths.transactions_file()),
            expenses: ExpenseRepository::new(paths.expenses_file()),
            consultations: ConsultationRepository::new(paths.consultations_file()),
            ledger: LedgerRepository::new(paths.ledger_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &ChairsidePaths {
        &self.paths
    }

    /// Get the audit logger
    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> ChairsideResult<()> {
        self.transactions.load()?;
        self.expenses.load()?;
        self.consultations.load()?;
        self.ledger.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> ChairsideResult<()> {
        self.transactions.save()?;
        self.expenses.save()?;
        self.consultations.save()?;
        self.ledger.save()?;
        Ok(())
    }

    /// Record a create operation in the audit log
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> ChairsideResult<()> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    /// Record an update operation in the audit log
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        summary: Option<String>,
    ) -> ChairsideResult<()> {
        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            summary,
        ))
    }

    /// Record a delete operation in the audit log
    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> ChairsideResult<()> {
        self.audit
            .log(&AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ChairsidePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        storage.load_all().unwrap();
        storage.save_all().unwrap();

        assert!(temp_dir.path().join("data").join("ledger.json").exists());
    }
}
