//! CSV Export functionality
//!
//! Exports expenses and budgets to spreadsheet-compatible CSV.

use std::io::Write;

use serde::Serialize;

use crate::error::TrackerResult;
use crate::storage::LedgerData;

#[derive(Serialize)]
struct ExpenseRecord<'a> {
    id: String,
    date: String,
    category: &'a str,
    amount: String,
    description: &'a str,
}

#[derive(Serialize)]
struct BudgetRecord<'a> {
    period: String,
    category: &'a str,
    limit: String,
}

/// Export all expenses to CSV, oldest first
///
/// Returns the number of expenses written.
pub fn export_expenses_csv<W: Write>(ledger: &LedgerData, writer: W) -> TrackerResult<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for expense in &ledger.expenses {
        csv_writer.serialize(ExpenseRecord {
            id: expense.id.as_uuid().to_string(),
            date: expense.date.to_string(),
            category: &expense.category,
            amount: expense.amount.to_decimal_string(),
            description: expense.description.as_deref().unwrap_or(""),
        })?;
    }

    csv_writer.flush()?;
    Ok(ledger.expenses.len())
}

/// Export category budgets to CSV
///
/// Overall budgets are written with an empty category.
pub fn export_budgets_csv<W: Write>(ledger: &LedgerData, writer: W) -> TrackerResult<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for overall in &ledger.overall_budgets {
        csv_writer.serialize(BudgetRecord {
            period: overall.period.to_string(),
            category: "",
            limit: overall.limit.to_decimal_string(),
        })?;
    }
    for budget in &ledger.budgets {
        csv_writer.serialize(BudgetRecord {
            period: budget.period.to_string(),
            category: &budget.category,
            limit: budget.limit.to_decimal_string(),
        })?;
    }

    csv_writer.flush()?;
    Ok(ledger.overall_budgets.len() + ledger.budgets.len())
}
