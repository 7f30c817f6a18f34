//! Cash register display formatting

use chrono::NaiveDate;

use crate::clock::ClinicClock;
use crate::models::LedgerEntry;
use crate::services::DayTotals;

/// Format a single register entry
pub fn format_ledger_row(entry: &LedgerEntry) -> String {
    let lock = if entry.closed { "🔒" } else { "  " };
    let clock = ClinicClock::kst();

    format!(
        "{} {} {:12} {:4} {:>12} {}",
        lock,
        clock.civil_date(entry.date).format("%Y-%m-%d"),
        entry.id.to_string(),
        entry.kind.to_string(),
        entry.amount.to_string(),
        entry.description
    )
}

/// Format one register day with totals
pub fn format_ledger_day(day: NaiveDate, entries: &[LedgerEntry], totals: &DayTotals) -> String {
    let mut output = format!("Cash register {}\n", day.format("%Y-%m-%d"));
    output.push_str(&"-".repeat(60));
    output.push('\n');

    if entries.is_empty() {
        output.push_str("No entries.\n");
        return output;
    }

    for entry in entries {
        output.push_str(&format_ledger_row(entry));
        output.push('\n');
    }

    output.push_str(&"-".repeat(60));
    output.push('\n');
    output.push_str(&format!(
        "수입 {}   지출 {}   잔액 {}\n",
        totals.income, totals.expense, totals.net()
    ));

    output
}
