//! Expense model
//!
//! A clinic expenditure: supplies, lab fees, utilities. Cash expenses
//! produce a matching cash register entry via reconciliation.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ExpenseId;
use super::money::Amount;
use super::payment::{PaymentLine, PaymentMethod, SourceRef};

/// A clinic expenditure record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,

    /// How the expense was paid
    pub method: PaymentMethod,

    /// Always non-negative
    pub amount: Amount,

    /// What the money was spent on
    pub description: String,

    /// Clinic civil date of the expenditure
    pub date: NaiveDate,

    /// When the record was created
    pub created_at: DateTime<Utc>,

    /// When the record was last modified
    pub updated_at: DateTime<Utc>,
}

impl Expense {
    /// Create a new expense record
    pub fn new(
        method: PaymentMethod,
        amount: Amount,
        description: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ExpenseId::new(),
            method,
            amount,
            description: description.into(),
            date,
            created_at: now,
            updated_at: now,
        }
    }

    /// The single payment instance this expense represents
    pub fn payment_line(&self) -> PaymentLine {
        PaymentLine {
            method: self.method,
            amount: self.amount,
            date: self.date,
        }
    }

    /// Ledger back-reference for this expense
    pub fn source_ref(&self) -> SourceRef {
        SourceRef::Expense { id: self.id }
    }

    /// Update the modification timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Validate the record
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.description.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyDescription);
        }
        if self.amount.is_negative() {
            return Err(ExpenseValidationError::NegativeAmount(self.amount));
        }
        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.description,
            self.amount
        )
    }
}

/// Validation errors for expense records
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyDescription,
    NegativeAmount(Amount),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "Expense description must not be empty"),
            Self::NegativeAmount(amount) => {
                write!(f, "Expense amount must not be negative (got {})", amount)
            }
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_line_mirrors_record() {
        let expense = Expense::new(
            PaymentMethod::Cash,
            Amount::from_won(80000),
            "임플란트 재료",
            NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
        );

        let line = expense.payment_line();
        assert!(line.method.is_cash());
        assert_eq!(line.amount.won(), 80000);
        assert_eq!(line.date, expense.date);
        assert_eq!(expense.source_ref(), SourceRef::Expense { id: expense.id });
    }

    #[test]
    fn test_validate() {
        let good = Expense::new(
            PaymentMethod::Card,
            Amount::from_won(10000),
            "소모품",
            NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
        );
        assert!(good.validate().is_ok());

        let mut bad = good.clone();
        bad.description = " ".into();
        assert_eq!(bad.validate(), Err(ExpenseValidationError::EmptyDescription));

        let mut bad = good;
        bad.amount = Amount::from_won(-5);
        assert!(matches!(
            bad.validate(),
            Err(ExpenseValidationError::NegativeAmount(_))
        ));
    }
}
