//! Monthly summary report
//!
//! Totals for one month alongside the overall budget and the per-category
//! budget status.

use crate::models::{Money, Period};
use crate::storage::LedgerData;

use super::aggregate::{category_breakdown, monthly_spending, CategoryShare};
use super::budget_status::{budget_status, BudgetStatusReport};

/// Summary of a month's spending
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySummary {
    pub period: Period,
    /// Total spent across all categories
    pub total_spent: Money,
    pub expense_count: usize,
    /// Overall limit for the month, if one is set
    pub overall_limit: Option<Money>,
    /// Overall limit minus total spent
    pub overall_remaining: Option<Money>,
    /// Per-category breakdown, largest first
    pub categories: Vec<CategoryShare>,
    pub status: BudgetStatusReport,
}

impl MonthlySummary {
    /// Generate the summary for a period from a ledger snapshot
    pub fn generate(snapshot: &LedgerData, period: Period) -> Self {
        let expenses = &snapshot.expenses;
        let total_spent = monthly_spending(expenses, period, None);
        let overall_limit = snapshot.overall_budget_for(period).map(|b| b.limit);

        Self {
            period,
            total_spent,
            expense_count: expenses.iter().filter(|e| period.contains(e.date)).count(),
            overall_limit,
            overall_remaining: overall_limit.map(|limit| limit - total_spent),
            categories: category_breakdown(expenses, period),
            status: budget_status(expenses, &snapshot.budgets, period),
        }
    }

    pub fn is_over_overall(&self) -> bool {
        self.overall_limit
            .map_or(false, |limit| self.total_spent > limit)
    }

    /// Format for terminal display
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Summary - {}\n", self.period.friendly_name()));
        output.push_str(&"=".repeat(64));
        output.push('\n');
        output.push_str(&format!(
            "Total spent:    {}\n",
            self.total_spent.format_with_symbol(currency_symbol)
        ));
        output.push_str(&format!("Expenses:       {}\n", self.expense_count));

        match (self.overall_limit, self.overall_remaining) {
            (Some(limit), Some(remaining)) => {
                output.push_str(&format!(
                    "Monthly budget: {}\n",
                    limit.format_with_symbol(currency_symbol)
                ));
                output.push_str(&format!(
                    "Remaining:      {}{}\n",
                    remaining.format_with_symbol(currency_symbol),
                    if self.is_over_overall() { " (over budget)" } else { "" }
                ));
            }
            _ => output.push_str("Monthly budget: not set\n"),
        }

        if let Some(top) = self.categories.first() {
            output.push_str(&format!(
                "Top category:   {} ({:.1}%)\n",
                top.category, top.percentage
            ));
        }

        output.push('\n');
        output.push_str(&self.status.format_terminal(currency_symbol));
        output
    }
}
