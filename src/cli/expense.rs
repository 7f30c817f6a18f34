//! Expense CLI commands

use clap::Subcommand;

use crate::display::expense::format_expense_list;
use crate::error::{ChairsideError, ChairsideResult};
use crate::models::ExpenseId;
use crate::services::{CreateExpenseInput, ExpenseService};
use crate::storage::Storage;

use super::{parse_amount, parse_date, parse_id, parse_method};

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record an expense
    Add {
        /// What the money was spent on
        description: String,
        /// Amount (e.g. "80000" or "80,000")
        amount: String,
        /// Expense date (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,
        /// Payment method (현금/카드/계좌이체)
        #[arg(short, long, default_value = "현금")]
        method: String,
    },
    /// Edit an expense
    Edit {
        /// Expense ID
        id: String,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// New payment method
        #[arg(short, long)]
        method: Option<String>,
    },
    /// Delete an expense
    ///
    /// Fails if the expense's cash register day has been closed.
    Delete {
        /// Expense ID
        id: String,
    },
    /// List expenses
    List {
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },
}

/// Handle an expense command
pub fn handle_expense_command(storage: &Storage, cmd: ExpenseCommands) -> ChairsideResult<()> {
    let service = ExpenseService::new(storage);

    match cmd {
        ExpenseCommands::Add {
            description,
            amount,
            date,
            method,
        } => {
            let expense = service.create(CreateExpenseInput {
                method: parse_method(&method)?,
                amount: parse_amount(&amount)?,
                description,
                date: parse_date(&date)?,
            })?;

            println!("Recorded expense: {}", expense.description);
            println!("  {} {} on {}", expense.method, expense.amount, expense.date);
            println!("  ID: {}", expense.id);
        }

        ExpenseCommands::Edit {
            id,
            description,
            amount,
            date,
            method,
        } => {
            let id: ExpenseId = parse_id(&id, "Expense")?;

            if description.is_none() && amount.is_none() && date.is_none() && method.is_none() {
                println!("No changes specified.");
                return Ok(());
            }

            let new_amount = amount.as_deref().map(parse_amount).transpose()?;
            let new_date = date.as_deref().map(parse_date).transpose()?;
            let new_method = method.as_deref().map(parse_method).transpose()?;

            let updated = service.update(id, |expense| {
                if let Some(description) = description {
                    expense.description = description;
                }
                if let Some(amount) = new_amount {
                    expense.amount = amount;
                }
                if let Some(date) = new_date {
                    expense.date = date;
                }
                if let Some(method) = new_method {
                    expense.method = method;
                }
            })?;

            println!("Updated expense: {}", updated.description);
        }

        ExpenseCommands::Delete { id } => {
            let id: ExpenseId = parse_id(&id, "Expense")?;
            let removed = service.delete(id)?;
            println!("Deleted expense: {} ({})", removed.description, removed.id);
        }

        ExpenseCommands::List { from, to } => {
            let expenses = match (from, to) {
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
            print!("{}", format_expense_list(&expenses));
        }
    }

    Ok(())
}
