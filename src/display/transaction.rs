//! Transaction display formatting

use crate::models::Transaction;

/// Format a single visit for display (register row)
pub fn format_transaction_row(txn: &Transaction) -> String {
    let payments = txn
        .payment_lines()
        .iter()
        .map(|(_, line)| format!("{} {}", line.method, line.amount))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "{} {:12} {:20} {}",
        txn.date.format("%Y-%m-%d"),
        txn.id.to_string(),
        truncate(&txn.patient_name, 20),
        if payments.is_empty() { "(no payment)".to_string() } else { payments }
    )
}

/// Format a list of visits
pub fn format_transaction_list(transactions: &[Transaction]) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:10} {:12} {:20} {}\n",
        "Date", "ID", "Patient", "Payments"
    ));
    output.push_str(&"-".repeat(60));
    output.push('\n');

    for txn in transactions {
        output.push_str(&format_transaction_row(txn));
        output.push('\n');
    }

    output
}

/// Format visit details for display
pub fn format_transaction_details(txn: &Transaction) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Patient:     {}\n", txn.patient_name));
    output.push_str(&format!("Date:        {}\n", txn.date.format("%Y-%m-%d")));

    for (slot, line) in txn.payment_lines() {
        output.push_str(&format!(
            "Payment {:4} {} {} on {}\n",
            slot.to_string(),
            line.method,
            line.amount,
            line.date.format("%Y-%m-%d")
        ));
    }

    if !txn.memo.is_empty() {
        output.push_str(&format!("Memo:        {}\n", txn.memo));
    }

    output
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Amount, PaymentMethod};
    use chrono::NaiveDate;

    #[test]
    fn test_row_includes_patient_and_payment() {
        let txn = Transaction::with_flat_payment(
            "김민준",
            NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
            PaymentMethod::Cash,
            Amount::from_won(100000),
        );

        let row = format_transaction_row(&txn);
        assert!(row.contains("2024-06-10"));
        assert!(row.contains("김민준"));
        assert!(row.contains("현금 ₩100,000"));
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(format_transaction_list(&[]), "No transactions found.\n");
    }

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        assert_eq!(truncate("가나다라", 10), "가나다라");
        assert_eq!(truncate("가나다라마바사아자차카", 5), "가나다라…");
    }
}
