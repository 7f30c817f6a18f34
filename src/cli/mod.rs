//! CLI command handlers for chairside

pub mod consultation;
pub mod expense;
pub mod ledger;
pub mod transaction;

pub use consultation::{handle_consultation_command, ConsultationCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use ledger::{handle_ledger_command, LedgerCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use std::str::FromStr;

use chrono::NaiveDate;

use crate::error::{ChairsideError, ChairsideResult};
use crate::models::{Amount, PaymentMethod};

/// Parse a civil date argument (`YYYY-MM-DD`)
pub(crate) fn parse_date(s: &str) -> ChairsideResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        ChairsideError::Validation(format!("Invalid date: '{}'. Use YYYY-MM-DD", s))
    })
}

/// Parse an amount argument
pub(crate) fn parse_amount(s: &str) -> ChairsideResult<Amount> {
    Amount::parse(s).map_err(|e| ChairsideError::Validation(e.to_string()))
}

/// Parse a payment method argument
pub(crate) fn parse_method(s: &str) -> ChairsideResult<PaymentMethod> {
    PaymentMethod::parse(s).ok_or_else(|| {
        ChairsideError::Validation(format!(
            "Invalid payment method: '{}'. Valid methods: 현금/cash, 카드/card, 계좌이체/transfer",
            s
        ))
    })
}

/// Parse an entity ID argument
pub(crate) fn parse_id<T>(s: &str, entity: &'static str) -> ChairsideResult<T>
where
    T: FromStr<Err = uuid::Error>,
{
    s.parse().map_err(|_| ChairsideError::NotFound {
        entity_type: entity,
        identifier: s.to_string(),
    })
}
