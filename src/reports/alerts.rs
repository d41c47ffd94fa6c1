//! Budget alerts
//!
//! Checked after an expense is recorded: warns when a category budget or the
//! overall monthly budget is nearly used up, and flags it once exceeded.

use std::fmt;

use crate::models::{Budget, Expense, Money, OverallBudget, Period};

use super::aggregate::monthly_spending;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AlertLevel {
    /// Spending reached the warning threshold
    Warning,
    /// Spending is over the limit
    Exceeded,
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertLevel::Warning => write!(f, "WARNING"),
            AlertLevel::Exceeded => write!(f, "EXCEEDED"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BudgetAlert {
    pub level: AlertLevel,
    /// The budgeted category, or None for the overall budget
    pub category: Option<String>,
    pub period: Period,
    pub spent: Money,
    pub limit: Money,
}

impl BudgetAlert {
    pub fn percent_used(&self) -> f64 {
        self.spent.percent_of(self.limit)
    }

    /// Human-readable message using the given currency symbol
    pub fn message(&self, currency_symbol: &str) -> String {
        let subject = match &self.category {
            Some(category) => format!("'{}' budget", category),
            None => "Overall budget".to_string(),
        };

        match self.level {
            AlertLevel::Exceeded => format!(
                "{} exceeded for {}: spent {} of {} ({} over)",
                subject,
                self.period,
                self.spent.format_with_symbol(currency_symbol),
                self.limit.format_with_symbol(currency_symbol),
                (self.spent - self.limit).format_with_symbol(currency_symbol),
            ),
            AlertLevel::Warning => format!(
                "{} at {:.0}% for {}: spent {} of {}",
                subject,
                self.percent_used(),
                self.period,
                self.spent.format_with_symbol(currency_symbol),
                self.limit.format_with_symbol(currency_symbol),
            ),
        }
    }
}

/// Classify spending against a limit
///
/// `threshold_percent` is the share of the limit at which a warning starts.
pub fn alert_level(spent: Money, limit: Money, threshold_percent: u8) -> Option<AlertLevel> {
    if spent > limit {
        Some(AlertLevel::Exceeded)
    } else if spent.cents() as i128 * 100 >= limit.cents() as i128 * threshold_percent as i128 {
        Some(AlertLevel::Warning)
    } else {
        None
    }
}

/// Alerts for one category's budget and for the overall budget in a month
///
/// The category alert comes first when both apply.
pub fn budget_alerts(
    expenses: &[Expense],
    budgets: &[Budget],
    overall: Option<&OverallBudget>,
    period: Period,
    category: &str,
    threshold_percent: u8,
) -> Vec<BudgetAlert> {
    let mut alerts = Vec::new();

    if let Some(budget) = budgets.iter().find(|b| b.is_for(category, period)) {
        let spent = monthly_spending(expenses, period, Some(category));
        if let Some(level) = alert_level(spent, budget.limit, threshold_percent) {
            alerts.push(BudgetAlert {
                level,
                category: Some(budget.category.clone()),
                period,
                spent,
                limit: budget.limit,
            });
        }
    }

    if let Some(overall) = overall.filter(|o| o.period == period) {
        let spent = monthly_spending(expenses, period, None);
        if let Some(level) = alert_level(spent, overall.limit, threshold_percent) {
            alerts.push(BudgetAlert {
                level,
                category: None,
                period,
                spent,
                limit: overall.limit,
            });
        }
    }

    alerts
}
