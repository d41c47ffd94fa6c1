//! Core data models for the expense tracker
//!
//! Expenses, category and overall budgets, and the value types they are
//! built from.

pub mod budget;
pub mod category;
pub mod expense;
pub mod ids;
pub mod money;
pub mod period;

pub use budget::{Budget, BudgetValidationError, OverallBudget};
pub use category::{CategoryError, CategoryPolicy};
pub use expense::{parse_date, Expense, ExpenseValidationError};
pub use ids::ExpenseId;
pub use money::{Money, MoneyParseError, MAX_AMOUNT};
pub use period::{Period, PeriodParseError};
