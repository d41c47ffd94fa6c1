//! Service layer for the expense tracker
//!
//! The service layer provides business logic on top of the storage layer:
//! input validation, category normalization and audit logging.

pub mod budget;
pub mod expense;

pub use budget::BudgetService;
pub use expense::{CreateExpenseInput, ExpenseFilter, ExpenseService};
