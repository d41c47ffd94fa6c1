//! Report CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_category_chart, format_monthly_chart};
use crate::error::TrackerResult;
use crate::reports::{category_breakdown, total_by_month, MonthlySummary};
use crate::storage::Storage;

use super::resolve_period;

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Spending by category for a month, with a bar chart
    Categories {
        /// Report period (e.g., "2025-01", "current", "last")
        #[arg(short, long)]
        period: Option<String>,
    },

    /// Total spending per month
    Monthly,

    /// Totals, overall budget and budget status for a month
    Summary {
        /// Report period
        #[arg(short, long)]
        period: Option<String>,
    },
}

/// Handle a report command
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> TrackerResult<()> {
    let snapshot = storage.ledger.snapshot()?;
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ReportCommands::Categories { period } => {
            let period = resolve_period(period.as_deref())?;
            let shares = category_breakdown(&snapshot.expenses, period);
            print!("{}", format_category_chart(period, &shares, symbol));
        }
        ReportCommands::Monthly => {
            let totals = total_by_month(&snapshot.expenses);
            print!("{}", format_monthly_chart(&totals, symbol));
        }
        ReportCommands::Summary { period } => {
            let period = resolve_period(period.as_deref())?;
            let summary = MonthlySummary::generate(&snapshot, period);
            print!("{}", summary.format_terminal(symbol));
        }
    }

    Ok(())
}
