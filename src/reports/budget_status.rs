//! Budget status report
//!
//! Compares each budget in a month against what was actually spent in its
//! category, and lists spending that has no budget at all.

use crate::models::{Budget, Expense, Money, Period};

use super::aggregate::total_by_category;

/// Width of the category column in the terminal report
const CATEGORY_WIDTH: usize = 24;

/// Spending in one category against its limit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetStatus {
    pub category: String,
    pub spent: Money,
    /// None for categories with spending but no budget
    pub limit: Option<Money>,
    /// `limit - spent`; negative once over budget
    pub remaining: Option<Money>,
    pub over_budget: bool,
}

impl BudgetStatus {
    fn budgeted(category: String, spent: Money, limit: Money) -> Self {
        Self {
            category,
            spent,
            limit: Some(limit),
            remaining: Some(limit - spent),
            over_budget: spent > limit,
        }
    }

    fn unbudgeted(category: String, spent: Money) -> Self {
        Self {
            category,
            spent,
            limit: None,
            remaining: None,
            over_budget: false,
        }
    }

    /// Spent as a percentage of the limit
    pub fn percent_used(&self) -> Option<f64> {
        self.limit.map(|limit| self.spent.percent_of(limit))
    }
}

/// Budget status for one month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetStatusReport {
    pub period: Period,
    /// One entry per budget in the period, ordered by category
    pub budgeted: Vec<BudgetStatus>,
    /// Categories with spending but no budget, ordered by category
    pub unbudgeted: Vec<BudgetStatus>,
}

impl BudgetStatusReport {
    pub fn total_limit(&self) -> Money {
        self.budgeted.iter().filter_map(|s| s.limit).sum()
    }

    pub fn total_budgeted_spent(&self) -> Money {
        self.budgeted.iter().map(|s| s.spent).sum()
    }

    pub fn over_budget_count(&self) -> usize {
        self.budgeted.iter().filter(|s| s.over_budget).count()
    }

    pub fn is_empty(&self) -> bool {
        self.budgeted.is_empty() && self.unbudgeted.is_empty()
    }

    /// Format for terminal display
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Budget Status - {}\n",
            self.period.friendly_name()
        ));
        output.push_str(&"=".repeat(64));
        output.push('\n');

        if self.is_empty() {
            output.push_str("No budgets or spending for this period.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<24} {:>12} {:>12} {:>12}\n",
            "Category", "Spent", "Limit", "Remaining"
        ));
        output.push_str(&"-".repeat(64));
        output.push('\n');

        let money = |m: Option<Money>| {
            m.map(|m| m.format_with_symbol(currency_symbol))
                .unwrap_or_default()
        };

        for status in &self.budgeted {
            output.push_str(&format!(
                "{:<24} {:>12} {:>12} {:>12}{}\n",
                column_label(&status.category),
                status.spent.format_with_symbol(currency_symbol),
                money(status.limit),
                money(status.remaining),
                if status.over_budget { " OVER" } else { "" }
            ));
        }

        if !self.unbudgeted.is_empty() {
            output.push_str("\nUnbudgeted spending:\n");
            for status in &self.unbudgeted {
                output.push_str(&format!(
                    "{:<24} {:>12}\n",
                    column_label(&status.category),
                    status.spent.format_with_symbol(currency_symbol)
                ));
            }
        }

        output
    }
}

/// Category label cut to fit the report's first column
fn column_label(category: &str) -> String {
    if category.chars().count() <= CATEGORY_WIDTH {
        return category.to_string();
    }
    let kept: String = category.chars().take(CATEGORY_WIDTH - 3).collect();
    format!("{}...", kept)
}

/// Compare a month's budgets against its spending
///
/// Every budget for the period gets an entry. The store keeps one budget per
/// (category, period), but a slice holding two for the same category still
/// reports the full category spending against each of them.
pub fn budget_status(expenses: &[Expense], budgets: &[Budget], period: Period) -> BudgetStatusReport {
    let mut totals = total_by_category(expenses, period);

    let mut budgeted: Vec<BudgetStatus> = budgets
        .iter()
        .filter(|b| b.period == period)
        .map(|b| {
            let spent = totals.get(&b.category).copied().unwrap_or_default();
            BudgetStatus::budgeted(b.category.clone(), spent, b.limit)
        })
        .collect();
    budgeted.sort_by(|a, b| a.category.cmp(&b.category));

    for status in &budgeted {
        totals.remove(&status.category);
    }

    // BTreeMap keeps the unbudgeted categories sorted
    let unbudgeted = totals
        .into_iter()
        .map(|(category, spent)| BudgetStatus::unbudgeted(category, spent))
        .collect();

    BudgetStatusReport {
        period,
        budgeted,
        unbudgeted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn expense(units: i64, category: &str, day: u32) -> Expense {
        Expense::new(
            Money::from_units(units),
            category,
            NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            None,
        )
    }

    fn jan() -> Period {
        Period::new(2024, 1).unwrap()
    }

    #[test]
    fn test_food_over_budget_example() {
        let expenses = vec![expense(50, "Food", 5), expense(30, "Food", 20)];
        let budgets = vec![Budget::new("Food", jan(), Money::from_units(60))];

        let report = budget_status(&expenses, &budgets, jan());

        assert_eq!(
            report.budgeted,
            vec![BudgetStatus {
                category: "Food".into(),
                spent: Money::from_units(80),
                limit: Some(Money::from_units(60)),
                remaining: Some(Money::from_units(-20)),
                over_budget: true,
            }]
        );
        assert!(report.unbudgeted.is_empty());
        assert_eq!(report.over_budget_count(), 1);
    }

    #[test]
    fn test_budget_without_spending() {
        let budgets = vec![Budget::new("Books", jan(), Money::from_units(40))];
        let report = budget_status(&[], &budgets, jan());

        let status = &report.budgeted[0];
        assert_eq!(status.spent, Money::zero());
        assert_eq!(status.remaining, Some(Money::from_units(40)));
        assert!(!status.over_budget);
    }

    #[test]
    fn test_spending_exactly_at_limit_is_not_over() {
        let expenses = vec![expense(60, "Food", 5)];
        let budgets = vec![Budget::new("Food", jan(), Money::from_units(60))];

        let status = &budget_status(&expenses, &budgets, jan()).budgeted[0];
        assert_eq!(status.remaining, Some(Money::zero()));
        assert!(!status.over_budget);
        assert_eq!(status.percent_used(), Some(100.0));
    }

    #[test]
    fn test_unbudgeted_categories_reported_separately() {
        let expenses = vec![
            expense(50, "Food", 5),
            expense(12, "Transport", 6),
            expense(8, "Books", 7),
        ];
        let budgets = vec![Budget::new("Food", jan(), Money::from_units(60))];

        let report = budget_status(&expenses, &budgets, jan());
        let unbudgeted: Vec<_> = report
            .unbudgeted
            .iter()
            .map(|s| (s.category.as_str(), s.limit, s.over_budget))
            .collect();
        assert_eq!(
            unbudgeted,
            vec![("Books", None, false), ("Transport", None, false)]
        );
    }

    #[test]
    fn test_only_budgets_for_the_period_count() {
        let expenses = vec![expense(50, "Food", 5)];
        let budgets = vec![
            Budget::new("Food", jan().next(), Money::from_units(10)),
            Budget::new("Rent", jan(), Money::from_units(900)),
        ];

        let report = budget_status(&expenses, &budgets, jan());
        assert_eq!(report.budgeted.len(), 1);
        assert_eq!(report.budgeted[0].category, "Rent");
        assert_eq!(report.unbudgeted[0].category, "Food");
        assert_eq!(report.total_limit(), Money::from_units(900));
    }

    #[test]
    fn test_remaining_is_limit_minus_spent() {
        let expenses = vec![
            expense(50, "Food", 5),
            expense(25, "Transport", 6),
            expense(700, "Rent", 1),
        ];
        let budgets = vec![
            Budget::new("Food", jan(), Money::from_units(60)),
            Budget::new("Transport", jan(), Money::from_units(20)),
            Budget::new("Rent", jan(), Money::from_units(700)),
        ];

        for status in budget_status(&expenses, &budgets, jan()).budgeted {
            let limit = status.limit.unwrap();
            assert_eq!(status.remaining, Some(limit - status.spent));
            assert_eq!(status.over_budget, status.spent > limit);
        }
    }

    #[test]
    fn test_format_terminal() {
        let expenses = vec![expense(80, "Food", 5), expense(5, "Coffee", 6)];
        let budgets = vec![Budget::new("Food", jan(), Money::from_units(60))];

        let output = budget_status(&expenses, &budgets, jan()).format_terminal("$");
        assert!(output.contains("January 2024"));
        assert!(output.contains("-$20.00"));
        assert!(output.contains("OVER"));
        assert!(output.contains("Unbudgeted spending:"));
        assert!(output.contains("Coffee"));
    }

    #[test]
    fn test_duplicate_budgets_each_see_full_spending() {
        let expenses = vec![expense(50, "Food", 5), expense(30, "Food", 20)];
        let budgets = vec![
            Budget::new("Food", jan(), Money::from_units(60)),
            Budget::new("Food", jan(), Money::from_units(100)),
        ];

        let report = budget_status(&expenses, &budgets, jan());
        let spent: Vec<_> = report.budgeted.iter().map(|s| s.spent).collect();
        assert_eq!(spent, vec![Money::from_units(80), Money::from_units(80)]);
        assert_eq!(report.over_budget_count(), 1);
        assert!(report.unbudgeted.is_empty());
    }

    #[test]
    fn test_long_category_cut_to_column() {
        let long = "Subscriptions and memberships";
        let expenses = vec![expense(10, long, 5)];
        let budgets = vec![Budget::new(long, jan(), Money::from_units(20))];

        let output = budget_status(&expenses, &budgets, jan()).format_terminal("$");
        assert!(output.contains("Subscriptions and mem..."));
        assert!(!output.contains(long));
        assert_eq!(column_label("Food"), "Food");
        assert_eq!(column_label(&"é".repeat(30)).chars().count(), CATEGORY_WIDTH);
    }
}
