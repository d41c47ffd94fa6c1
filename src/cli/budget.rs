//! Budget CLI commands
//!
//! Setting and removing category and overall monthly budgets, and showing
//! how a month's spending compares to them.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::format_budget_table;
use crate::error::TrackerResult;
use crate::reports::budget_status;
use crate::services::BudgetService;
use crate::storage::Storage;

use super::{parse_amount, resolve_period};

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Set the limit for a category in a month
    Set {
        /// Category name
        category: String,
        /// Limit (e.g., "300" or "300.00")
        #[arg(allow_hyphen_values = true)]
        limit: String,
        /// Budget period (e.g., "2025-01", "current", "last")
        #[arg(short, long)]
        period: Option<String>,
    },

    /// Remove a category budget
    Delete {
        /// Category name
        category: String,
        /// Budget period
        #[arg(short, long)]
        period: Option<String>,
    },

    /// List budgets
    List {
        /// Only budgets for this period
        #[arg(short, long)]
        period: Option<String>,
    },

    /// Set the overall limit across all categories for a month
    Total {
        /// Limit
        #[arg(allow_hyphen_values = true)]
        limit: String,
        /// Budget period
        #[arg(short, long)]
        period: Option<String>,
    },

    /// Remove the overall limit for a month
    ClearTotal {
        /// Budget period
        #[arg(short, long)]
        period: Option<String>,
    },

    /// Compare spending against budgets
    Status {
        /// Budget period
        #[arg(short, long)]
        period: Option<String>,
    },
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BudgetCommands,
) -> TrackerResult<()> {
    let service = BudgetService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        BudgetCommands::Set {
            category,
            limit,
            period,
        } => {
            let period = resolve_period(period.as_deref())?;
            let budget = service.upsert(&category, period, parse_amount(&limit)?)?;
            println!(
                "Budget for '{}' in {} set to {}",
                budget.category,
                period.friendly_name(),
                budget.limit.format_with_symbol(symbol)
            );
        }

        BudgetCommands::Delete { category, period } => {
            let period = resolve_period(period.as_deref())?;
            let removed = service.delete(&category, period)?;
            println!(
                "Removed budget for '{}' in {}",
                removed.category,
                period.friendly_name()
            );
        }

        BudgetCommands::List { period } => {
            let (budgets, overall) = match period {
                Some(text) => {
                    let period = resolve_period(Some(&text))?;
                    (
                        service.list(Some(period))?,
                        service.get_overall(period)?.into_iter().collect::<Vec<_>>(),
                    )
                }
                None => (service.list(None)?, service.list_overall()?),
            };
            println!("{}", format_budget_table(&budgets, &overall, symbol));
        }

        BudgetCommands::Total { limit, period } => {
            let period = resolve_period(period.as_deref())?;
            let overall = service.upsert_overall(period, parse_amount(&limit)?)?;
            println!(
                "Overall budget for {} set to {}",
                period.friendly_name(),
                overall.limit.format_with_symbol(symbol)
            );
        }

        BudgetCommands::ClearTotal { period } => {
            let period = resolve_period(period.as_deref())?;
            service.delete_overall(period)?;
            println!("Removed overall budget for {}", period.friendly_name());
        }

        BudgetCommands::Status { period } => {
            let period = resolve_period(period.as_deref())?;
            let snapshot = storage.ledger.snapshot()?;
            let report = budget_status(&snapshot.expenses, &snapshot.budgets, period);
            print!("{}", report.format_terminal(symbol));
        }
    }

    Ok(())
}
