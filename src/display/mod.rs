//! Display formatting for terminal output
//!
//! Provides utilities for formatting expenses, budgets and reports for
//! terminal display.

pub mod budget;
pub mod expense;
pub mod report;

pub use budget::format_budget_table;
pub use expense::{format_expense_details, format_expense_table};
pub use report::{format_alerts, format_category_chart, format_monthly_chart};
