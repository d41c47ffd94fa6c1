//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod budget;
pub mod expense;
pub mod export;
pub mod history;
pub mod report;

pub use budget::{handle_budget_command, BudgetCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use export::{handle_export_command, ExportCommands};
pub use history::handle_history_command;
pub use report::{handle_report_command, ReportCommands};

use chrono::{Local, NaiveDate};

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Money, Period};

/// Today's date in the local timezone
pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Resolve a period argument ("2024-01", "current", "last"), defaulting to
/// the current month
pub(crate) fn resolve_period(text: Option<&str>) -> TrackerResult<Period> {
    Period::resolve(text, today()).map_err(|e| TrackerError::Validation(e.to_string()))
}

pub(crate) fn parse_amount(text: &str) -> TrackerResult<Money> {
    Money::parse(text).map_err(|e| TrackerError::Validation(e.to_string()))
}
