//! Budget display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Budget, OverallBudget};

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "Period")]
    period: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Limit")]
    limit: String,
}

/// Format category budgets and overall budgets as one table
///
/// Overall budgets are listed under the category "(all)".
pub fn format_budget_table(
    budgets: &[Budget],
    overall: &[OverallBudget],
    currency_symbol: &str,
) -> String {
    if budgets.is_empty() && overall.is_empty() {
        return "No budgets set.".to_string();
    }

    let mut rows: Vec<BudgetRow> = overall
        .iter()
        .map(|o| BudgetRow {
            period: o.period.to_string(),
            category: "(all)".to_string(),
            limit: o.limit.format_with_symbol(currency_symbol),
        })
        .chain(budgets.iter().map(|b| BudgetRow {
            period: b.period.to_string(),
            category: b.category.clone(),
            limit: b.limit.format_with_symbol(currency_symbol),
        }))
        .collect();
    rows.sort_by(|a, b| a.period.cmp(&b.period));

    Table::new(rows).with(Style::rounded()).to_string()
}
