//! Transaction CLI commands

use clap::Subcommand;

use crate::display::transaction::{format_transaction_details, format_transaction_list};
use crate::error::{ChairsideError, ChairsideResult};
use crate::models::{Payment, TransactionId};
use crate::services::{CreateTransactionInput, TransactionService};
use crate::storage::Storage;

use super::{parse_amount, parse_date, parse_id, parse_method};

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record a patient visit
    Add {
        /// Patient name
        patient: String,
        /// Visit date (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,
        /// Payment method (현금/카드/계좌이체)
        #[arg(short, long)]
        method: Option<String>,
        /// Payment amount (e.g. "50000" or "50,000")
        #[arg(short, long)]
        amount: Option<String>,
        /// Additional itemized payment, repeatable: METHOD:AMOUNT[:DATE]
        #[arg(long = "pay")]
        pays: Vec<String>,
        /// Treatment memo
        #[arg(long)]
        memo: Option<String>,
    },
    /// Edit a visit
    Edit {
        /// Transaction ID
        id: String,
        /// New patient name
        #[arg(long)]
        patient: Option<String>,
        /// New visit date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// New payment method
        #[arg(short, long)]
        method: Option<String>,
        /// New payment amount
        #[arg(short, long)]
        amount: Option<String>,
    },
    /// Delete a visit
    Delete {
        /// Transaction ID
        id: String,
    },
    /// List visits
    List {
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },
    /// Show visit details
    Show {
        /// Transaction ID
        id: String,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(storage: &Storage, cmd: TransactionCommands) -> ChairsideResult<()> {
    let service = TransactionService::new(storage);

    match cmd {
        TransactionCommands::Add {
            patient,
            date,
            method,
            amount,
            pays,
            memo,
        } => {
            let date = parse_date(&date)?;
            let payment_method = method.as_deref().map(parse_method).transpose()?;
            let payment_amount = amount.as_deref().map(parse_amount).transpose()?;

            let mut payments = Vec::new();
            for spec in &pays {
                payments.push(parse_payment_spec(spec)?);
            }

            let txn = service.create(CreateTransactionInput {
                patient_name: patient,
                date,
                payment_method,
                payment_amount,
                payments,
                memo: memo.unwrap_or_default(),
            })?;

            println!("Recorded visit: {}", txn.patient_name);
            println!("  Date: {}", txn.date.format("%Y-%m-%d"));
            for (slot, line) in txn.payment_lines() {
                println!("  Payment {}: {} {}", slot, line.method, line.amount);
            }
            println!("  ID: {}", txn.id);
        }

        TransactionCommands::Edit {
            id,
            patient,
            date,
            method,
            amount,
        } => {
            let id: TransactionId = parse_id(&id, "Transaction")?;

            if patient.is_none() && date.is_none() && method.is_none() && amount.is_none() {
                println!("No changes specified.");
                return Ok(());
            }

            let new_date = date.as_deref().map(parse_date).transpose()?;
            let new_method = method.as_deref().map(parse_method).transpose()?;
            let new_amount = amount.as_deref().map(parse_amount).transpose()?;

            let updated = service.update(id, |txn| {
                if let Some(patient) = patient {
                    txn.patient_name = patient;
                }
                if let Some(date) = new_date {
                    txn.date = date;
                }
                if let Some(method) = new_method {
                    txn.payment_method = Some(method);
                }
                if let Some(amount) = new_amount {
                    txn.payment_amount = Some(amount);
                }
            })?;

            println!("Updated visit: {}", updated.patient_name);
        }

        TransactionCommands::Delete { id } => {
            let id: TransactionId = parse_id(&id, "Transaction")?;
            let removed = service.delete(id)?;
            println!("Deleted visit: {} ({})", removed.patient_name, removed.id);
        }

        TransactionCommands::List { from, to } => {
            let transactions = match (from, to) {
                (Some(from), Some(to)) => {
                    service.list_by_date_range(parse_date(&from)?, parse_date(&to)?)?
                }
                (None, None) => service.list()?,
                _ => {
                    return Err(ChairsideError::Validation(
                        "Specify both --from and --to, or neither".into(),
                    ))
                }
            };
            print!("{}", format_transaction_list(&transactions));
        }

        TransactionCommands::Show { id } => {
            let id: TransactionId = parse_id(&id, "Transaction")?;
            let txn = service
                .get(id)?
                .ok_or_else(|| ChairsideError::transaction_not_found(id.to_string()))?;
            print!("{}", format_transaction_details(&txn));
        }
    }

    Ok(())
}

/// Parse a `METHOD:AMOUNT[:DATE]` payment spec
fn parse_payment_spec(spec: &str) -> ChairsideResult<Payment> {
    let parts: Vec<&str> = spec.splitn(3, ':').collect();
    if parts.len() < 2 {
        return Err(ChairsideError::Validation(format!(
            "Invalid payment spec: '{}'. Use METHOD:AMOUNT[:DATE]",
            spec
        )));
    }

    let method = parse_method(parts[0])?;
    let amount = parse_amount(parts[1])?;
    let date = parts.get(2).map(|s| parse_date(s)).transpose()?;

    Ok(Payment {
        method,
        amount,
        date,
    })
}
