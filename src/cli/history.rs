//! Audit history command

use crate::error::TrackerResult;
use crate::storage::Storage;

/// Print the most recent audit log entries, oldest first
pub fn handle_history_command(storage: &Storage, count: usize) -> TrackerResult<()> {
    let entries = storage.audit().read_recent(count)?;

    if entries.is_empty() {
        println!("No changes recorded yet.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }

    Ok(())
}
