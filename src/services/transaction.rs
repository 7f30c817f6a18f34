//! Transaction service
//!
//! CRUD for patient visit records. Every mutation commits the visit record
//! first and then runs a best-effort cash reconciliation pass: a ledger
//! failure is logged and the call still succeeds. Operators find any
//! resulting drift through the ledger audit, not through these calls.

use chrono::NaiveDate;

use crate::audit::EntityType;
use crate::error::{ChairsideError, ChairsideResult};
use crate::models::{Amount, Payment, PaymentMethod, Transaction, TransactionId};
use crate::services::reconciliation::CashReconciler;
use crate::storage::{CashLedgerStore, Storage};

/// Service for visit record management
pub struct TransactionService<'a> {
    storage: &'a Storage,
    ledger: &'a dyn CashLedgerStore,
}

/// Input for creating a new visit record
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    pub patient_name: String,
    pub date: NaiveDate,
    pub payment_method: Option<PaymentMethod>,
    pub payment_amount: Option<Amount>,
    pub payments: Vec<Payment>,
    pub memo: String,
}

impl<'a> TransactionService<'a> {
    /// Create a new transaction service over the production ledger
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            ledger: &storage.ledger,
        }
    }

    /// Create a service with an explicit ledger store (used by tests)
    pub fn with_ledger(storage: &'a Storage, ledger: &'a dyn CashLedgerStore) -> Self {
        Self { storage, ledger }
    }

    /// Create a new visit record
    pub fn create(&self, input: CreateTransactionInput) -> ChairsideResult<Transaction> {
        let mut txn = Transaction::new(input.patient_name, input.date);
        txn.payment_method = input.payment_method;
        txn.payment_amount = input.payment_amount;
        txn.payments = input.payments;
        txn.memo = input.memo;

        txn.validate()
            .map_err(|e| ChairsideError::Validation(e.to_string()))?;

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        self.storage.log_create(
            EntityType::Transaction,
            txn.id.to_string(),
            Some(txn.patient_name.clone()),
            &txn,
        )?;

        // The visit record is committed at this point; ledger trouble is
        // reported, never fatal.
        self.reconciler()
            .reconcile_transaction(None, Some(&txn))
            .log_failures("transaction create");

        Ok(txn)
    }

    /// Update the visit record identified by `id` via the provided mutator
    ///
    /// The full prior record is loaded first so the reconciliation pass can
    /// diff old against new payment lines.
    pub fn update<F>(&self, id: TransactionId, mutate: F) -> ChairsideResult<Transaction>
    where
        F: FnOnce(&mut Transaction),
    {
        let old = self
            .storage
            .transactions
            .get(id)?
            .ok_or_else(|| ChairsideError::transaction_not_found(id.to_string()))?;

        let mut updated = old.clone();
        mutate(&mut updated);
        updated.touch();

        updated
            .validate()
            .map_err(|e| ChairsideError::Validation(e.to_string()))?;

        self.storage.transactions.upsert(updated.clone())?;
        self.storage.transactions.save()?;

        self.storage.log_update(
            EntityType::Transaction,
            updated.id.to_string(),
            Some(updated.patient_name.clone()),
            &old,
            &updated,
            None,
        )?;

        self.reconciler()
            .reconcile_transaction(Some(&old), Some(&updated))
            .log_failures("transaction update");

        Ok(updated)
    }

    /// Delete a visit record, returning the removed instance
    pub fn delete(&self, id: TransactionId) -> ChairsideResult<Transaction> {
        let old = self
            .storage
            .transactions
            .get(id)?
            .ok_or_else(|| ChairsideError::transaction_not_found(id.to_string()))?;

        self.storage.transactions.delete(id)?;
        self.storage.transactions.save()?;

        self.storage.log_delete(
            EntityType::Transaction,
            old.id.to_string(),
            Some(old.patient_name.clone()),
            &old,
        )?;

        self.reconciler()
            .reconcile_transaction(Some(&old), None)
            .log_failures("transaction delete");

        Ok(old)
    }

    /// Get a visit record by ID
    pub fn get(&self, id: TransactionId) -> ChairsideResult<Option<Transaction>> {
        self.storage.transactions.get(id)
    }

    /// List all visit records, newest first
    pub fn list(&self) -> ChairsideResult<Vec<Transaction>> {
        self.storage.transactions.get_all()
    }

    /// List visit records in an inclusive civil-date range
    pub fn list_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ChairsideResult<Vec<Transaction>> {
        self.storage.transactions.get_by_date_range(start, end)
    }

    fn reconciler(&self) -> CashReconciler<'_> {
        CashReconciler::new(self.ledger)
    }
}
