//! CLI commands for data export

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::Subcommand;

use crate::error::{TrackerError, TrackerResult};
use crate::export::{export_budgets_csv, export_expenses_csv, export_full_json};
use crate::storage::Storage;

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export all expenses to CSV
    Expenses {
        /// Output file path
        output: PathBuf,
    },

    /// Export category and overall budgets to CSV
    Budgets {
        /// Output file path
        output: PathBuf,
    },

    /// Export the full ledger to JSON
    All {
        /// Output file path
        output: PathBuf,
    },
}

/// Handle an export command
pub fn handle_export_command(storage: &Storage, cmd: ExportCommands) -> TrackerResult<()> {
    let snapshot = storage.ledger.snapshot()?;

    match cmd {
        ExportCommands::Expenses { output } => {
            let mut writer = create_output(&output)?;
            let count = export_expenses_csv(&snapshot, &mut writer)?;
            println!("Exported {} expenses to: {}", count, output.display());
        }
        ExportCommands::Budgets { output } => {
            let mut writer = create_output(&output)?;
            let count = export_budgets_csv(&snapshot, &mut writer)?;
            println!("Exported {} budgets to: {}", count, output.display());
        }
        ExportCommands::All { output } => {
            let mut writer = create_output(&output)?;
            export_full_json(&snapshot, &mut writer)?;
            writer.flush()?;
            println!(
                "Exported {} expenses and {} budgets to: {}",
                snapshot.expenses.len(),
                snapshot.budgets.len() + snapshot.overall_budgets.len(),
                output.display()
            );
        }
    }

    Ok(())
}

fn create_output(path: &Path) -> TrackerResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        TrackerError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}
