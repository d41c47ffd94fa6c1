//! Report formatting utilities for terminal output
//!
//! Bar charts for category breakdowns and monthly totals, plus the small
//! text helpers they share.

use std::collections::BTreeMap;

use crate::models::{Money, Period};
use crate::reports::{BudgetAlert, CategoryShare};

const BAR_WIDTH: usize = 30;

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct < 0.1 && pct > 0.0 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        "...".chars().take(max_len).collect()
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}

/// Category breakdown as a bar chart, one row per category
pub fn format_category_chart(
    period: Period,
    shares: &[CategoryShare],
    currency_symbol: &str,
) -> String {
    let mut output = String::new();
    output.push_str(&format!("Spending by Category - {}\n", period.friendly_name()));
    output.push_str(&separator(72));
    output.push('\n');

    if shares.is_empty() {
        output.push_str("No expenses for this period.\n");
        return output;
    }

    let max = shares
        .iter()
        .map(|s| s.total.cents())
        .max()
        .unwrap_or(0) as f64;

    for share in shares {
        output.push_str(&format!(
            "{:<16} {:>12} {:>6} {}\n",
            truncate(&share.category, 16),
            share.total.format_with_symbol(currency_symbol),
            format_percentage(share.percentage),
            format_bar(share.total.cents() as f64, max, BAR_WIDTH)
        ));
    }

    let total: Money = shares.iter().map(|s| s.total).sum();
    output.push_str(&separator(72));
    output.push('\n');
    output.push_str(&format!(
        "{:<16} {:>12}\n",
        "Total",
        total.format_with_symbol(currency_symbol)
    ));
    output
}

/// Monthly totals as a bar chart, oldest month first
pub fn format_monthly_chart(totals: &BTreeMap<Period, Money>, currency_symbol: &str) -> String {
    let mut output = String::new();
    output.push_str("Monthly Spending\n");
    output.push_str(&separator(56));
    output.push('\n');

    if totals.is_empty() {
        output.push_str("No expenses recorded.\n");
        return output;
    }

    let max = totals.values().map(|m| m.cents()).max().unwrap_or(0) as f64;
    for (period, total) in totals {
        output.push_str(&format!(
            "{:<8} {:>12} {}\n",
            period.to_string(),
            total.format_with_symbol(currency_symbol),
            format_bar(total.cents() as f64, max, BAR_WIDTH)
        ));
    }
    output
}

/// One line per alert, most severe first
pub fn format_alerts(alerts: &[BudgetAlert], currency_symbol: &str) -> String {
    let mut sorted: Vec<&BudgetAlert> = alerts.iter().collect();
    sorted.sort_by(|a, b| b.level.cmp(&a.level));

    let mut output = String::new();
    for alert in sorted {
        output.push_str(&format!("[{}] {}\n", alert.level, alert.message(currency_symbol)));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::AlertLevel;

    fn jan() -> Period {
        Period::new(2024, 1).unwrap()
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.05), "0.05%");
        assert_eq!(format_percentage(5.5), "5.5%");
        assert_eq!(format_percentage(50.0), "50%");
    }

    #[test]
    fn test_format_bar() {
        let bar = format_bar(50.0, 100.0, 10);
        assert_eq!(bar.chars().filter(|c| *c == '█').count(), 5);
        assert_eq!(format_bar(0.0, 100.0, 4), "    ");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello World", 5), "He...");
        assert_eq!(truncate("Hi", 5), "Hi");
        assert_eq!(truncate("Café au lait", 6), "Caf...");
    }

    #[test]
    fn test_category_chart() {
        let shares = vec![
            CategoryShare {
                category: "Food".into(),
                total: Money::from_units(75),
                expense_count: 2,
                percentage: 75.0,
            },
            CategoryShare {
                category: "Transport".into(),
                total: Money::from_units(25),
                expense_count: 1,
                percentage: 25.0,
            },
        ];

        let output = format_category_chart(jan(), &shares, "$");
        assert!(output.contains("January 2024"));
        assert!(output.contains("75%"));
        assert!(output.contains("$100.00"));
        assert!(format_category_chart(jan(), &[], "$").contains("No expenses"));
    }

    #[test]
    fn test_monthly_chart() {
        let mut totals = BTreeMap::new();
        totals.insert(jan().next(), Money::from_units(10));
        totals.insert(jan(), Money::from_units(20));

        let output = format_monthly_chart(&totals, "€");
        let jan_pos = output.find("2024-01").unwrap();
        let feb_pos = output.find("2024-02").unwrap();
        assert!(jan_pos < feb_pos);
        assert!(output.contains("€20.00"));
    }

    #[test]
    fn test_alerts_most_severe_first() {
        let alerts = vec![
            BudgetAlert {
                level: AlertLevel::Warning,
                category: None,
                period: jan(),
                spent: Money::from_units(85),
                limit: Money::from_units(100),
            },
            BudgetAlert {
                level: AlertLevel::Exceeded,
                category: Some("Food".into()),
                period: jan(),
                spent: Money::from_units(80),
                limit: Money::from_units(60),
            },
        ];

        let output = format_alerts(&alerts, "$");
        assert!(output.starts_with("[EXCEEDED] 'Food' budget"));
        assert!(output.contains("[WARNING] Overall budget at 85%"));
    }
}
