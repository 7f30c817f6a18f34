//! Custom error types for chairside
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for chairside operations
#[derive(Error, Debug)]
pub enum ChairsideError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Cash ledger mutation targets a day that has already been closed
    #[error("Cash register for {date} is closed and cannot be modified")]
    ClosedPeriod { date: NaiveDate },

    /// Storage-layer failure during a cash ledger insert/update/delete
    #[error("Cash ledger persistence error: {0}")]
    Persistence(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ChairsideError {
    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for consultations
    pub fn consultation_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Consultation",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for ledger entries
    pub fn ledger_entry_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "LedgerEntry",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a closed-period refusal
    pub fn is_closed_period(&self) -> bool {
        matches!(self, Self::ClosedPeriod { .. })
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for ChairsideError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ChairsideError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for chairside operations
pub type ChairsideResult<T> = Result<T, ChairsideError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ChairsideError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = ChairsideError::transaction_not_found("txn-1234");
        assert_eq!(err.to_string(), "Transaction not found: txn-1234");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_closed_period_error() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let err = ChairsideError::ClosedPeriod { date };
        assert_eq!(
            err.to_string(),
            "Cash register for 2024-03-01 is closed and cannot be modified"
        );
        assert!(err.is_closed_period());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ChairsideError = io_err.into();
        assert!(matches!(err, ChairsideError::Io(_)));
    }
}
