//! Expense CLI commands
//!
//! Recording, listing and deleting expenses.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_alerts, format_expense_details, format_expense_table};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{parse_date, Period};
use crate::reports::budget_alerts;
use crate::services::{CreateExpenseInput, ExpenseFilter, ExpenseService};
use crate::storage::Storage;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// Amount (e.g., "12.50" or "$1,200")
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Category
        category: String,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Description
        #[arg(short = 'm', long)]
        description: Option<String>,
    },

    /// List expenses, oldest first
    #[command(alias = "ls")]
    List {
        /// Only this category
        #[arg(short, long)]
        category: Option<String>,
        /// Earliest date (YYYY-MM-DD, inclusive)
        #[arg(long)]
        from: Option<String>,
        /// Latest date (YYYY-MM-DD, inclusive)
        #[arg(long)]
        to: Option<String>,
        /// Show only the most recent N expenses
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Show one expense
    Show {
        /// Expense ID (full, "exp-" form, or unique prefix)
        id: String,
    },

    /// Delete an expense
    #[command(alias = "rm")]
    Delete {
        /// Expense ID (full, "exp-" form, or unique prefix)
        id: String,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> TrackerResult<()> {
    let service = ExpenseService::new(storage);

    match cmd {
        ExpenseCommands::Add {
            amount,
            category,
            date,
            description,
        } => {
            let input = CreateExpenseInput::from_text(
                &amount,
                &category,
                date.as_deref(),
                description,
                super::today(),
            )?;
            let id = service.add(input)?;
            let expense = service
                .get(id)?
                .ok_or_else(|| TrackerError::expense_not_found(id.to_string()))?;

            println!(
                "Added expense {}: {} in {} on {}",
                expense.id,
                expense.amount.format_with_symbol(&settings.currency_symbol),
                expense.category,
                expense.date.format(&settings.date_format)
            );

            let period = Period::of(expense.date);
            let snapshot = storage.ledger.snapshot()?;
            let alerts = budget_alerts(
                &snapshot.expenses,
                &snapshot.budgets,
                snapshot.overall_budget_for(period),
                period,
                &expense.category,
                settings.alert_threshold_percent,
            );
            if !alerts.is_empty() {
                print!("{}", format_alerts(&alerts, &settings.currency_symbol));
            }
        }

        ExpenseCommands::List {
            category,
            from,
            to,
            limit,
        } => {
            let mut filter = ExpenseFilter::new();
            if let Some(category) = category {
                filter = filter.category(category);
            }
            if let Some(from) = from {
                filter = filter.from_date(parse_cli_date(&from)?);
            }
            if let Some(to) = to {
                filter = filter.to_date(parse_cli_date(&to)?);
            }
            if let Some(limit) = limit {
                filter = filter.limit(limit);
            }

            let expenses = service.list(&filter)?;
            println!(
                "{}",
                format_expense_table(&expenses, &settings.currency_symbol, &settings.date_format)
            );
        }

        ExpenseCommands::Show { id } => {
            let id = service.resolve_id(&id)?;
            let expense = service
                .get(id)?
                .ok_or_else(|| TrackerError::expense_not_found(id.to_string()))?;
            print!(
                "{}",
                format_expense_details(&expense, &settings.currency_symbol, &settings.date_format)
            );
        }

        ExpenseCommands::Delete { id } => {
            let id = service.resolve_id(&id)?;
            let removed = service.delete(id)?;
            println!(
                "Deleted expense {}: {} in {} on {}",
                removed.id,
                removed.amount.format_with_symbol(&settings.currency_symbol),
                removed.category,
                removed.date.format(&settings.date_format)
            );
        }
    }

    Ok(())
}

fn parse_cli_date(text: &str) -> TrackerResult<chrono::NaiveDate> {
    parse_date(text).map_err(|e| TrackerError::Validation(e.to_string()))
}
