//! Transaction (patient visit) model
//!
//! A visit record carries the patient's payments. The payment shape evolved
//! over time: older records hold a single flat `payment_method` and
//! `payment_amount` pair, newer ones a `payments` array, and some carry
//! both. `payment_lines` normalizes every shape to slot-keyed lines so the
//! reconciliation engine only ever sees one form.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::TransactionId;
use super::money::Amount;
use super::payment::{PaymentLine, PaymentMethod, PaymentSlot};

/// One element of the `payments` array
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub method: PaymentMethod,

    pub amount: Amount,

    /// Settlement date; defaults to the visit date when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl Payment {
    pub fn new(method: PaymentMethod, amount: Amount) -> Self {
        Self {
            method,
            amount,
            date: None,
        }
    }

    pub fn on_date(method: PaymentMethod, amount: Amount, date: NaiveDate) -> Self {
        Self {
            method,
            amount,
            date: Some(date),
        }
    }
}

/// A patient visit record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Patient name as entered at the front desk
    pub patient_name: String,

    /// Visit date (clinic civil date)
    pub date: NaiveDate,

    /// Legacy flat payment method
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,

    /// Legacy flat payment amount
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_amount: Option<Amount>,

    /// Itemized payments
    #[serde(default)]
    pub payments: Vec<Payment>,

    /// Treatment memo
    #[serde(default)]
    pub memo: String,

    /// When the record was created
    pub created_at: DateTime<Utc>,

    /// When the record was last modified
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new visit record with no payments
    pub fn new(patient_name: impl Into<String>, date: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: TransactionId::new(),
            patient_name: patient_name.into(),
            date,
            payment_method: None,
            payment_amount: None,
            payments: Vec::new(),
            memo: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a visit record with a legacy flat payment
    pub fn with_flat_payment(
        patient_name: impl Into<String>,
        date: NaiveDate,
        method: PaymentMethod,
        amount: Amount,
    ) -> Self {
        let mut txn = Self::new(patient_name, date);
        txn.payment_method = Some(method);
        txn.payment_amount = Some(amount);
        txn
    }

    /// Normalize every payment shape to slot-keyed lines
    ///
    /// The flat pair contributes a line only when both method and amount are
    /// present; each `payments` element contributes one line, dated by its
    /// own date or the visit date.
    pub fn payment_lines(&self) -> Vec<(PaymentSlot, PaymentLine)> {
        let mut lines = Vec::with_capacity(self.payments.len() + 1);

        if let (Some(method), Some(amount)) = (self.payment_method, self.payment_amount) {
            lines.push((
                PaymentSlot::Flat,
                PaymentLine {
                    method,
                    amount,
                    date: self.date,
                },
            ));
        }

        for (i, payment) in self.payments.iter().enumerate() {
            lines.push((
                PaymentSlot::Line(i as u32),
                PaymentLine {
                    method: payment.method,
                    amount: payment.amount,
                    date: payment.date.unwrap_or(self.date),
                },
            ));
        }

        lines
    }

    /// Ledger label for this visit's cash payments
    pub fn cash_description(&self) -> String {
        format!("{} 현금결제", self.patient_name)
    }

    /// Update the modification timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Validate the record
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.patient_name.trim().is_empty() {
            return Err(TransactionValidationError::EmptyPatientName);
        }
        if let Some(amount) = self.payment_amount {
            if amount.is_negative() {
                return Err(TransactionValidationError::NegativeAmount(amount));
            }
        }
        for payment in &self.payments {
            if payment.amount.is_negative() {
                return Err(TransactionValidationError::NegativeAmount(payment.amount));
            }
        }
        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({} payments)",
            self.date.format("%Y-%m-%d"),
            self.patient_name,
            self.payment_lines().len()
        )
    }
}

/// Validation errors for visit records
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    EmptyPatientName,
    NegativeAmount(Amount),
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPatientName => write!(f, "Patient name must not be empty"),
            Self::NegativeAmount(amount) => {
                write!(f, "Payment amounts must not be negative (got {})", amount)
            }
        }
    }
}

impl std::error::Error for TransactionValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_flat_payment_yields_flat_slot() {
        let txn = Transaction::with_flat_payment(
            "김민준",
            date(2024, 6, 10),
            PaymentMethod::Cash,
            Amount::from_won(100000),
        );

        let lines = txn.payment_lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].0, PaymentSlot::Flat);
        assert_eq!(lines[0].1.amount.won(), 100000);
        assert_eq!(lines[0].1.date, date(2024, 6, 10));
    }

    #[test]
    fn test_itemized_payments_keep_their_indices() {
        let mut txn = Transaction::new("이서연", date(2024, 3, 1));
        txn.payments.push(Payment::new(PaymentMethod::Cash, Amount::from_won(30000)));
        txn.payments.push(Payment::on_date(
            PaymentMethod::Card,
            Amount::from_won(70000),
            date(2024, 3, 5),
        ));

        let lines = txn.payment_lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].0, PaymentSlot::Line(0));
        assert_eq!(lines[0].1.date, date(2024, 3, 1)); // inherits visit date
        assert_eq!(lines[1].0, PaymentSlot::Line(1));
        assert_eq!(lines[1].1.date, date(2024, 3, 5)); // keeps its own date
    }

    #[test]
    fn test_mixed_shapes_yield_both() {
        let mut txn = Transaction::with_flat_payment(
            "박지훈",
            date(2024, 3, 1),
            PaymentMethod::Cash,
            Amount::from_won(50000),
        );
        txn.payments.push(Payment::new(PaymentMethod::Cash, Amount::from_won(20000)));

        let slots: Vec<_> = txn.payment_lines().into_iter().map(|(s, _)| s).collect();
        assert_eq!(slots, vec![PaymentSlot::Flat, PaymentSlot::Line(0)]);
    }

    #[test]
    fn test_method_without_amount_yields_no_flat_line() {
        let mut txn = Transaction::new("최수아", date(2024, 3, 1));
        txn.payment_method = Some(PaymentMethod::Cash);

        assert!(txn.payment_lines().is_empty());
    }

    #[test]
    fn test_cash_description() {
        let txn = Transaction::new("김민준", date(2024, 6, 10));
        assert_eq!(txn.cash_description(), "김민준 현금결제");
    }

    #[test]
    fn test_validate_rejects_negative_amounts() {
        let txn = Transaction::with_flat_payment(
            "김민준",
            date(2024, 6, 10),
            PaymentMethod::Cash,
            Amount::from_won(-1),
        );
        assert_eq!(
            txn.validate(),
            Err(TransactionValidationError::NegativeAmount(Amount::from_won(-1)))
        );
    }

    #[test]
    fn test_validate_rejects_empty_patient_name() {
        let txn = Transaction::new("  ", date(2024, 6, 10));
        assert_eq!(
            txn.validate(),
            Err(TransactionValidationError::EmptyPatientName)
        );
    }

    #[test]
    fn test_serialization_roundtrip() {
        let mut txn = Transaction::with_flat_payment(
            "이서연",
            date(2024, 3, 1),
            PaymentMethod::Transfer,
            Amount::from_won(120000),
        );
        txn.payments.push(Payment::new(PaymentMethod::Cash, Amount::from_won(5000)));

        let json = serde_json::to_string(&txn).unwrap();
        assert!(json.contains("계좌이체"));

        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, txn.id);
        assert_eq!(back.payment_lines().len(), 2);
    }
}
