//! Export module for the expense tracker
//!
//! - CSV: expenses and budgets (spreadsheet-compatible)
//! - JSON: the full ledger with export metadata

pub mod csv;
pub mod json;

pub use self::csv::{export_budgets_csv, export_expenses_csv};
pub use json::{export_full_json, FullExport, EXPORT_SCHEMA_VERSION};
