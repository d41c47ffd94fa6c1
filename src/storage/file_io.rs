//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't corrupt data on failure: whole
//! JSON documents are replaced atomically, and line-oriented logs are only
//! ever appended to.

use std::collections::VecDeque;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::TrackerError;

/// Read JSON from a file, returning a default value if the file doesn't exist
pub fn read_json<T, P>(path: P) -> Result<T, TrackerError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        tracing::debug!(path = %path.display(), "file missing, using defaults");
        return Ok(T::default());
    }

    let file = File::open(path)
        .map_err(|e| TrackerError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| TrackerError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Write JSON to a file atomically (write to temp, sync, then rename)
///
/// The target is either completely replaced or left untouched.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), TrackerError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            TrackerError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let temp_path = path.with_extension("json.tmp");

    let result = write_temp(&temp_path, data).and_then(|()| {
        fs::rename(&temp_path, path)
            .map_err(|e| TrackerError::Storage(format!("Failed to rename temp file: {}", e)))
    });

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    } else {
        tracing::debug!(path = %path.display(), "wrote file");
    }

    result
}

fn write_temp<T: Serialize>(temp_path: &Path, data: &T) -> Result<(), TrackerError> {
    let file = File::create(temp_path)
        .map_err(|e| TrackerError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| TrackerError::Storage(format!("Failed to serialize data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| TrackerError::Storage(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| TrackerError::Storage(format!("Failed to sync data: {}", e)))
}

/// Append one line to a text file, creating the file and its directory if needed
///
/// The line and its newline go out in a single write.
pub fn append_line<P: AsRef<Path>>(path: P, line: &str) -> Result<(), TrackerError> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            TrackerError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| TrackerError::Storage(format!("Cannot append to {}: {}", path.display(), e)))?;

    let mut buf = String::with_capacity(line.len() + 1);
    buf.push_str(line);
    buf.push('\n');

    file.write_all(buf.as_bytes())
        .and_then(|()| file.flush())
        .map_err(|e| TrackerError::Storage(format!("Cannot append to {}: {}", path.display(), e)))
}

/// Read the last `count` non-blank lines of a text file, oldest first
///
/// Each line comes with its 1-based line number. At most `count` lines are
/// held in memory while the file is scanned. A missing file has no lines.
pub fn read_last_lines<P: AsRef<Path>>(
    path: P,
    count: usize,
) -> Result<Vec<(usize, String)>, TrackerError> {
    let mut tail = VecDeque::new();
    if count == 0 {
        return Ok(Vec::new());
    }

    for_each_line(path.as_ref(), |number, line| {
        if tail.len() == count {
            tail.pop_front();
        }
        tail.push_back((number, line));
    })?;

    Ok(tail.into())
}

/// Read every non-blank line of a text file with its 1-based line number
pub fn read_lines<P: AsRef<Path>>(path: P) -> Result<Vec<(usize, String)>, TrackerError> {
    let mut lines = Vec::new();
    for_each_line(path.as_ref(), |number, line| lines.push((number, line)))?;
    Ok(lines)
}

/// Count the non-blank lines of a text file without keeping them
pub fn count_lines<P: AsRef<Path>>(path: P) -> Result<usize, TrackerError> {
    let mut count = 0;
    for_each_line(path.as_ref(), |_, _| count += 1)?;
    Ok(count)
}

fn for_each_line(
    path: &Path,
    mut visit: impl FnMut(usize, String),
) -> Result<(), TrackerError> {
    if !path.exists() {
        return Ok(());
    }

    let file = File::open(path)
        .map_err(|e| TrackerError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| {
            TrackerError::Storage(format!(
                "Failed to read {} at line {}: {}",
                path.display(),
                index + 1,
                e
            ))
        })?;
        if !line.trim().is_empty() {
            visit(index + 1, line);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
    struct TestData {
        name: String,
        value: i32,
    }

    fn sample() -> TestData {
        TestData {
            name: "test".to_string(),
            value: 42,
        }
    }

    #[test]
    fn test_read_nonexistent_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let data: TestData = read_json(temp_dir.path().join("missing.json")).unwrap();
        assert_eq!(data, TestData::default());
    }

    #[test]
    fn test_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.json");

        write_json_atomic(&path, &sample()).unwrap();
        let loaded: TestData = read_json(&path).unwrap();
        assert_eq!(loaded, sample());
        assert!(!temp_dir.path().join("test.json.tmp").exists());
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("test.json");

        write_json_atomic(&path, &sample()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_invalid_json_is_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "not json at all").unwrap();

        let err = read_json::<TestData, _>(&path).unwrap_err();
        assert!(err.is_storage());
    }

    #[test]
    fn test_failed_rename_keeps_target_and_cleans_temp() {
        let temp_dir = TempDir::new().unwrap();
        // A non-empty directory in the target's place makes the rename fail
        let path = temp_dir.path().join("blocked.json");
        fs::create_dir_all(path.join("inner")).unwrap();

        let err = write_json_atomic(&path, &sample()).unwrap_err();
        assert!(err.is_storage());
        assert!(path.is_dir());
        assert!(!temp_dir.path().join("blocked.json.tmp").exists());
    }

    #[test]
    fn test_append_line_creates_and_appends() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("logs").join("events.log");

        append_line(&path, "first").unwrap();
        append_line(&path, "second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn test_read_last_lines_keeps_tail_with_line_numbers() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("events.log");
        fs::write(&path, "a\n\nb\nc\n  \nd\n").unwrap();

        assert_eq!(
            read_last_lines(&path, 2).unwrap(),
            vec![(4, "c".to_string()), (6, "d".to_string())]
        );
        assert_eq!(read_last_lines(&path, 10).unwrap().len(), 4);
        assert!(read_last_lines(&path, 0).unwrap().is_empty());
        assert_eq!(count_lines(&path).unwrap(), 4);
        assert_eq!(read_lines(&path).unwrap()[1], (3, "b".to_string()));
    }

    #[test]
    fn test_line_helpers_on_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.log");

        assert!(read_lines(&path).unwrap().is_empty());
        assert!(read_last_lines(&path, 3).unwrap().is_empty());
        assert_eq!(count_lines(&path).unwrap(), 0);
    }
}
