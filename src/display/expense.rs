//! Expense display formatting

use crate::models::Expense;

/// Format a single expense for display
pub fn format_expense_row(expense: &Expense) -> String {
    format!(
        "{} {:12} {:6} {:>12} {}",
        expense.date.format("%Y-%m-%d"),
        expense.id.to_string(),
        expense.method.to_string(),
        expense.amount.to_string(),
        expense.description
    )
}

/// Format a list of expenses
pub fn format_expense_list(expenses: &[Expense]) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:10} {:12} {:6} {:>12} {}\n",
        "Date", "ID", "Method", "Amount", "Description"
    ));
    output.push_str(&"-".repeat(60));
    output.push('\n');

    for expense in expenses {
        output.push_str(&format_expense_row(expense));
        output.push('\n');
    }

    output
}
