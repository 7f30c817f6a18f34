//! Expense service
//!
//! CRUD for clinic expenditures. Create and update follow the same
//! commit-first, reconcile-best-effort policy as visits. Deletion is the one
//! asymmetric path in the system: the cash register entry is removed first,
//! and if that fails the expense record is kept and the error is surfaced to
//! the operator. This is long-standing clinic policy, not an accident.

use chrono::NaiveDate;

use crate::audit::EntityType;
use crate::error::{ChairsideError, ChairsideResult};
use crate::models::{Amount, Expense, ExpenseId, PaymentMethod};
use crate::services::reconciliation::CashReconciler;
use crate::storage::{CashLedgerStore, Storage};

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
    ledger: &'a dyn CashLedgerStore,
}

/// Input for creating a new expense
#[derive(Debug, Clone)]
pub struct CreateExpenseInput {
    pub method: PaymentMethod,
    pub amount: Amount,
    pub description: String,
    pub date: NaiveDate,
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service over the production ledger
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

    /// Create a new expense
    pub fn create(&self, input: CreateExpenseInput) -> ChairsideResult<Expense> {
        let expense = Expense::new(input.method, input.amount, input.description, input.date);

        expense
            .validate()
            .map_err(|e| ChairsideError::Validation(e.to_string()))?;

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;

        self.storage.log_create(
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.description.clone()),
            &expense,
        )?;

        self.reconciler()
            .reconcile_expense(None, Some(&expense))
            .log_failures("expense create");

        Ok(expense)
    }

    /// Update the expense identified by `id` via the provided mutator
    pub fn update<F>(&self, id: ExpenseId, mutate: F) -> ChairsideResult<Expense>
    where
        F: FnOnce(&mut Expense),
    {
        let old = self
            .storage
            .expenses
            .get(id)?
            .ok_or_else(|| ChairsideError::expense_not_found(id.to_string()))?;

        let mut updated = old.clone();
        mutate(&mut updated);
        updated.touch();

        updated
            .validate()
            .map_err(|e| ChairsideError::Validation(e.to_string()))?;

        self.storage.expenses.upsert(updated.clone())?;
        self.storage.expenses.save()?;

        self.storage.log_update(
            EntityType::Expense,
            updated.id.to_string(),
            Some(updated.description.clone()),
            &old,
            &updated,
            None,
        )?;

        self.reconciler()
            .reconcile_expense(Some(&old), Some(&updated))
            .log_failures("expense update");

        Ok(updated)
    }

    /// Delete an expense, returning the removed instance
    ///
    /// The cash register entry is removed before the expense record. If the
    /// register refuses (closed day) or fails, the expense survives and the
    /// error propagates to the operator.
    pub fn delete(&self, id: ExpenseId) -> ChairsideResult<Expense> {
        let old = self
            .storage
            .expenses
            .get(id)?
            .ok_or_else(|| ChairsideError::expense_not_found(id.to_string()))?;

        self.reconciler()
            .reconcile_expense(Some(&old), None)
            .into_result()?;

        self.storage.expenses.delete(id)?;
        self.storage.expenses.save()?;

        self.storage.log_delete(
            EntityType::Expense,
            old.id.to_string(),
            Some(old.description.clone()),
            &old,
        )?;

        Ok(old)
    }

    /// Get an expense by ID
    pub fn get(&self, id: ExpenseId) -> ChairsideResult<Option<Expense>> {
        self.storage.expenses.get(id)
    }

    /// List all expenses, newest first
    pub fn list(&self) -> ChairsideResult<Vec<Expense>> {
        self.storage.expenses.get_all()
    }

    /// List expenses in an inclusive civil-date range
    pub fn list_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ChairsideResult<Vec<Expense>> {
        self.storage.expenses.get_by_date_range(start, end)
    }

    fn reconciler(&self) -> CashReconciler<'_> {
        CashReconciler::new(self.ledger)
    }
}
