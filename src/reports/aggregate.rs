//! Spending aggregation
//!
//! Pure functions that group expense amounts by category and by month.
//! Categories are grouped exactly as stored; they were normalized when the
//! expenses were recorded.

use std::collections::BTreeMap;

use crate::models::{Expense, Money, Period};

/// Sum expense amounts per category for one month
///
/// Categories with no expenses in the month are absent from the result.
pub fn total_by_category(expenses: &[Expense], period: Period) -> BTreeMap<String, Money> {
    let mut totals: BTreeMap<String, Money> = BTreeMap::new();
    for expense in expenses.iter().filter(|e| period.contains(e.date)) {
        *totals.entry(expense.category.clone()).or_default() += expense.amount;
    }
    totals
}

/// Sum expense amounts per calendar month, across all categories
///
/// Iteration order is chronological.
pub fn total_by_month(expenses: &[Expense]) -> BTreeMap<Period, Money> {
    let mut totals: BTreeMap<Period, Money> = BTreeMap::new();
    for expense in expenses {
        *totals.entry(Period::of(expense.date)).or_default() += expense.amount;
    }
    totals
}

/// Total spent in a month, optionally restricted to one category
pub fn monthly_spending(expenses: &[Expense], period: Period, category: Option<&str>) -> Money {
    expenses
        .iter()
        .filter(|e| period.contains(e.date))
        .filter(|e| category.map_or(true, |c| e.category == c))
        .map(|e| e.amount)
        .sum()
}

/// One category's slice of a month's spending
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub category: String,
    pub total: Money,
    pub expense_count: usize,
    /// Share of the month's total spending, 0-100
    pub percentage: f64,
}

/// Per-category totals with their share of the month's spending
///
/// Sorted by total, largest first; ties by category name.
pub fn category_breakdown(expenses: &[Expense], period: Period) -> Vec<CategoryShare> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for expense in expenses.iter().filter(|e| period.contains(e.date)) {
        *counts.entry(expense.category.as_str()).or_default() += 1;
    }

    let totals = total_by_category(expenses, period);
    let grand_total: Money = totals.values().sum();

    let mut shares: Vec<CategoryShare> = totals
        .into_iter()
        .map(|(category, total)| CategoryShare {
            expense_count: counts.get(category.as_str()).copied().unwrap_or(0),
            percentage: total.percent_of(grand_total),
            category,
            total,
        })
        .collect();

    shares.sort_by(|a, b| b.total.cmp(&a.total).then(a.category.cmp(&b.category)));
    shares
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn expense(units: i64, category: &str, y: i32, m: u32, d: u32) -> Expense {
        Expense::new(
            Money::from_units(units),
            category,
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            None,
        )
    }

    fn jan() -> Period {
        Period::new(2024, 1).unwrap()
    }

    #[test]
    fn test_total_by_category_example() {
        let expenses = vec![
            expense(50, "Food", 2024, 1, 5),
            expense(30, "Food", 2024, 1, 20),
        ];

        let totals = total_by_category(&expenses, jan());
        assert_eq!(totals.len(), 1);
        assert_eq!(totals["Food"], Money::from_units(80));
    }

    #[test]
    fn test_total_by_category_only_counts_the_month() {
        let expenses = vec![
            expense(50, "Food", 2024, 1, 31),
            expense(99, "Food", 2024, 2, 1),
            expense(15, "Transport", 2023, 1, 10),
        ];

        let totals = total_by_category(&expenses, jan());
        assert_eq!(totals["Food"], Money::from_units(50));
        assert!(!totals.contains_key("Transport"));
    }

    #[test]
    fn test_total_by_category_is_case_sensitive() {
        let expenses = vec![expense(1, "Food", 2024, 1, 5), expense(2, "food", 2024, 1, 6)];
        assert_eq!(total_by_category(&expenses, jan()).len(), 2);
    }

    #[test]
    fn test_total_by_category_is_additive() {
        let first = vec![
            expense(50, "Food", 2024, 1, 5),
            expense(12, "Transport", 2024, 1, 7),
        ];
        let second = vec![
            expense(30, "Food", 2024, 1, 20),
            expense(8, "Books", 2024, 1, 21),
        ];

        let mut merged = first.clone();
        merged.extend(second.iter().cloned());
        let combined = total_by_category(&merged, jan());

        let mut summed = total_by_category(&first, jan());
        for (category, total) in total_by_category(&second, jan()) {
            *summed.entry(category).or_default() += total;
        }

        assert_eq!(combined, summed);
    }

    #[test]
    fn test_total_by_month_chronological() {
        let expenses = vec![
            expense(10, "Food", 2024, 3, 1),
            expense(20, "Rent", 2023, 12, 31),
            expense(5, "Food", 2024, 3, 15),
        ];

        let totals: Vec<_> = total_by_month(&expenses)
            .into_iter()
            .map(|(period, total)| (period.to_string(), total.cents()))
            .collect();
        assert_eq!(
            totals,
            vec![("2023-12".to_string(), 2000), ("2024-03".to_string(), 1500)]
        );
    }

    #[test]
    fn test_monthly_spending() {
        let expenses = vec![
            expense(50, "Food", 2024, 1, 5),
            expense(12, "Transport", 2024, 1, 7),
            expense(99, "Food", 2024, 2, 1),
        ];

        assert_eq!(monthly_spending(&expenses, jan(), None), Money::from_units(62));
        assert_eq!(
            monthly_spending(&expenses, jan(), Some("Food")),
            Money::from_units(50)
        );
        assert_eq!(monthly_spending(&[], jan(), None), Money::zero());
    }

    #[test]
    fn test_category_breakdown() {
        let expenses = vec![
            expense(25, "Transport", 2024, 1, 2),
            expense(50, "Food", 2024, 1, 5),
            expense(25, "Food", 2024, 1, 6),
        ];

        let shares = category_breakdown(&expenses, jan());
        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].category, "Food");
        assert_eq!(shares[0].expense_count, 2);
        assert_eq!(shares[0].percentage, 75.0);
        assert_eq!(shares[1].percentage, 25.0);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(total_by_category(&[], jan()).is_empty());
        assert!(total_by_month(&[]).is_empty());
        assert!(category_breakdown(&[], jan()).is_empty());
    }
}
