//! Payment vocabulary shared by source records and the cash ledger
//!
//! Source records arrive with the front-office wire strings for payment
//! methods ("현금"/"카드"/"계좌이체"); serialization preserves them so stored
//! documents stay compatible with the existing data.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{ExpenseId, TransactionId};
use super::money::Amount;

/// How a payment was settled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Cash (현금), the only method that reaches the cash register
    #[serde(rename = "현금")]
    Cash,
    /// Card (카드)
    #[serde(rename = "카드")]
    Card,
    /// Bank transfer (계좌이체)
    #[serde(rename = "계좌이체")]
    Transfer,
}

impl PaymentMethod {
    /// Whether this method settles through the cash register
    pub fn is_cash(&self) -> bool {
        matches!(self, Self::Cash)
    }

    /// Parse a method from user or wire input
    ///
    /// Accepts the Korean wire strings and English aliases.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "현금" | "cash" => Some(Self::Cash),
            "카드" | "card" => Some(Self::Card),
            "계좌이체" | "transfer" => Some(Self::Transfer),
            _ => None,
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cash => write!(f, "현금"),
            Self::Card => write!(f, "카드"),
            Self::Transfer => write!(f, "계좌이체"),
        }
    }
}

/// One individually settleable payment: the unit the reconciliation
/// engine diffs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentLine {
    pub method: PaymentMethod,
    pub amount: Amount,
    /// Clinic civil date the payment is recognized on
    pub date: NaiveDate,
}

/// Which payment instance of a transaction a ledger entry derives from
///
/// Transactions evolved from a single flat payment to a `payments` array;
/// both shapes coexist, so the flat payment and each array element get
/// their own slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentSlot {
    /// The legacy flat `payment_method`/`payment_amount` pair
    Flat,
    /// Index into the `payments` array
    Line(u32),
}

impl fmt::Display for PaymentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flat => write!(f, "flat"),
            Self::Line(i) => write!(f, "#{}", i),
        }
    }
}

/// Weak back-reference from a ledger entry to the payment instance it
/// derives from
///
/// Not ownership: used only for lookup. Exactly one ledger entry exists per
/// cash-settled source at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceRef {
    Transaction { id: TransactionId, slot: PaymentSlot },
    Expense { id: ExpenseId },
}

impl fmt::Display for SourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transaction { id, slot } => write!(f, "{}/{}", id, slot),
            Self::Expense { id } => write!(f, "{}", id),
        }
    }
}
