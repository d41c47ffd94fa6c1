//! Reports for the expense tracker
//!
//! Pure aggregation over ledger snapshots: category and monthly totals,
//! budget status, monthly summaries and budget alerts.

pub mod aggregate;
pub mod alerts;
pub mod budget_status;
pub mod summary;

pub use aggregate::{
    category_breakdown, monthly_spending, total_by_category, total_by_month, CategoryShare,
};
pub use alerts::{alert_level, budget_alerts, AlertLevel, BudgetAlert};
pub use budget_status::{budget_status, BudgetStatus, BudgetStatusReport};
pub use summary::MonthlySummary;
