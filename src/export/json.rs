//! JSON Export functionality
//!
//! Exports the complete ledger to JSON with export metadata.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::TrackerResult;
use crate::models::{Budget, Expense, Money, OverallBudget};
use crate::storage::LedgerData;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full ledger export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub expenses: Vec<Expense>,
    pub budgets: Vec<Budget>,
    pub overall_budgets: Vec<OverallBudget>,

    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub expense_count: usize,
    pub budget_count: usize,
    pub total_spent: Money,
    pub earliest_expense: Option<NaiveDate>,
    pub latest_expense: Option<NaiveDate>,
}

impl FullExport {
    /// Build an export from a ledger snapshot
    pub fn from_ledger(ledger: &LedgerData) -> Self {
        let metadata = ExportMetadata {
            expense_count: ledger.expenses.len(),
            budget_count: ledger.budgets.len() + ledger.overall_budgets.len(),
            total_spent: ledger.expenses.iter().map(|e| e.amount).sum(),
            earliest_expense: ledger.expenses.iter().map(|e| e.date).min(),
            latest_expense: ledger.expenses.iter().map(|e| e.date).max(),
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            expenses: ledger.expenses.clone(),
            budgets: ledger.budgets.clone(),
            overall_budgets: ledger.overall_budgets.clone(),
            metadata,
        }
    }
}

/// Export the full ledger as pretty-printed JSON
pub fn export_full_json<W: Write>(ledger: &LedgerData, writer: &mut W) -> TrackerResult<()> {
    let export = FullExport::from_ledger(ledger);
    serde_json::to_writer_pretty(&mut *writer, &export)?;
    writeln!(writer)?;
    Ok(())
}
