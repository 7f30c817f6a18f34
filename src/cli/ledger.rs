//! Cash register CLI commands

use chrono::Utc;
use clap::Subcommand;

use crate::clock::{ClinicClock, DateInput};
use crate::display::ledger::{format_ledger_day, format_ledger_row};
use crate::error::ChairsideResult;
use crate::services::LedgerService;
use crate::storage::Storage;

use super::parse_date;

/// Cash register subcommands
#[derive(Subcommand)]
pub enum LedgerCommands {
    /// Show the register for a day or a month
    List {
        /// Day (YYYY-MM-DD) or month (YYYY-MM) to show; defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Close a register day, locking its entries
    Close {
        /// Day to close (YYYY-MM-DD)
        date: String,
    },
    /// Reopen a previously closed register day
    Reopen {
        /// Day to reopen (YYYY-MM-DD)
        date: String,
    },
}

/// Handle a cash register command
pub fn handle_ledger_command(storage: &Storage, cmd: LedgerCommands) -> ChairsideResult<()> {
    let service = LedgerService::new(storage);
    let clock = ClinicClock::kst();

    match cmd {
        LedgerCommands::List { date } => {
            let input = match date {
                Some(date) => date.parse::<DateInput>()?,
                None => DateInput::Day(clock.civil_date(Utc::now())),
            };

            match input {
                DateInput::Day(day) => {
                    let entries = service.list_day(day)?;
                    let totals = service.day_totals(day)?;
                    print!("{}", format_ledger_day(day, &entries, &totals));
                }
                DateInput::Month(first) => {
                    let last = clock.civil_date(input.range_end(&clock));
                    let entries = service.list_range(first, last)?;

                    println!("Cash register {}", first.format("%Y-%m"));
                    println!("{}", "-".repeat(60));
                    if entries.is_empty() {
                        println!("No entries.");
                    }
                    for entry in &entries {
                        println!("{}", format_ledger_row(entry));
                    }
                }
            }
        }

        LedgerCommands::Close { date } => {
            let day = parse_date(&date)?;
            let count = service.close_day(day)?;
            if count == 0 {
                println!("No register entries on {}; nothing to close.", day);
            } else {
                println!("Closed {}: {} entries locked.", day, count);
            }
        }

        LedgerCommands::Reopen { date } => {
            let day = parse_date(&date)?;
            let count = service.reopen_day(day)?;
            if count == 0 {
                println!("No closed entries on {}.", day);
            } else {
                println!("Reopened {}: {} entries unlocked.", day, count);
            }
        }
    }

    Ok(())
}
