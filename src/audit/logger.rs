//! Audit log file
//!
//! One JSON entry per line, appended through `storage::file_io`. The history
//! command usually wants only the last few changes, so reads can stop short
//! of parsing the whole file.

use std::path::{Path, PathBuf};

use crate::error::{TrackerError, TrackerResult};
use crate::storage::file_io;

use super::entry::AuditEntry;

/// The audit log at a fixed path
pub struct AuditLogger {
    path: PathBuf,
}

impl AuditLogger {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Append an entry
    pub fn log(&self, entry: &AuditEntry) -> TrackerResult<()> {
        let line = serde_json::to_string(entry)
            .map_err(|e| TrackerError::Json(format!("audit entry not serializable: {}", e)))?;
        file_io::append_line(&self.path, &line)
    }

    /// Every entry, oldest first
    pub fn read_all(&self) -> TrackerResult<Vec<AuditEntry>> {
        file_io::read_lines(&self.path)?
            .into_iter()
            .map(|(number, line)| self.parse_line(number, &line))
            .collect()
    }

    /// The last `count` entries, oldest first
    ///
    /// Only those lines are parsed, so a damaged entry earlier in the file
    /// does not hide recent history.
    pub fn read_recent(&self, count: usize) -> TrackerResult<Vec<AuditEntry>> {
        file_io::read_last_lines(&self.path, count)?
            .into_iter()
            .map(|(number, line)| self.parse_line(number, &line))
            .collect()
    }

    /// Number of entries, counted without parsing them
    pub fn entry_count(&self) -> TrackerResult<usize> {
        file_io::count_lines(&self.path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse_line(&self, number: usize, line: &str) -> TrackerResult<AuditEntry> {
        serde_json::from_str(line).map_err(|e| {
            TrackerError::Json(format!(
                "{} line {} is not an audit entry: {}",
                self.path.display(),
                number,
                e
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::entry::{EntityType, Operation};
    use serde_json::json;
    use tempfile::TempDir;

    fn logger_in(temp_dir: &TempDir) -> AuditLogger {
        AuditLogger::new(temp_dir.path().join("audit.log"))
    }

    fn created(id: &str) -> AuditEntry {
        AuditEntry::create(EntityType::Expense, id, None, &json!({"amount": 100}))
    }

    fn ids(entries: &[AuditEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.entity_id.as_str()).collect()
    }

    #[test]
    fn test_log_appends_one_line_per_entry() {
        let temp_dir = TempDir::new().unwrap();
        let logger = logger_in(&temp_dir);
        logger.log(&created("exp-1")).unwrap();
        logger.log(&created("exp-2")).unwrap();

        let raw = std::fs::read_to_string(logger.path()).unwrap();
        assert_eq!(raw.lines().count(), 2);

        let entries = logger.read_all().unwrap();
        assert_eq!(ids(&entries), ["exp-1", "exp-2"]);
        assert_eq!(entries[0].operation, Operation::Create);
        assert_eq!(entries[0].entity_type, EntityType::Expense);
    }

    #[test]
    fn test_read_recent_returns_tail_in_order() {
        let temp_dir = TempDir::new().unwrap();
        let logger = logger_in(&temp_dir);
        for i in 0..10 {
            logger.log(&created(&format!("exp-{}", i))).unwrap();
        }

        assert_eq!(ids(&logger.read_recent(3).unwrap()), ["exp-7", "exp-8", "exp-9"]);
        assert_eq!(logger.read_recent(50).unwrap().len(), 10);
        assert!(logger.read_recent(0).unwrap().is_empty());
        assert_eq!(logger.entry_count().unwrap(), 10);
    }

    #[test]
    fn test_read_recent_skips_damaged_older_lines() {
        let temp_dir = TempDir::new().unwrap();
        let logger = logger_in(&temp_dir);
        std::fs::write(logger.path(), "{ truncated\n").unwrap();
        logger.log(&created("exp-1")).unwrap();
        logger.log(&created("exp-2")).unwrap();

        assert_eq!(ids(&logger.read_recent(2).unwrap()), ["exp-1", "exp-2"]);

        let err = logger.read_all().unwrap_err();
        assert!(err.to_string().contains("line 1"));
        assert!(logger.read_recent(3).is_err());
    }

    #[test]
    fn test_missing_log_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let logger = logger_in(&temp_dir);

        assert_eq!(logger.entry_count().unwrap(), 0);
        assert!(logger.read_all().unwrap().is_empty());
        assert!(logger.read_recent(5).unwrap().is_empty());
        assert!(!logger.path().exists());
    }

    #[test]
    fn test_blank_lines_are_not_entries() {
        let temp_dir = TempDir::new().unwrap();
        let logger = logger_in(&temp_dir);
        logger.log(&created("exp-1")).unwrap();
        file_io::append_line(logger.path(), "").unwrap();
        logger.log(&created("exp-2")).unwrap();

        assert_eq!(logger.entry_count().unwrap(), 2);
        assert_eq!(ids(&logger.read_recent(2).unwrap()), ["exp-1", "exp-2"]);
    }

    #[test]
    fn test_entries_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        logger_in(&temp_dir).log(&created("exp-1")).unwrap();

        assert_eq!(ids(&logger_in(&temp_dir).read_all().unwrap()), ["exp-1"]);
    }
}
