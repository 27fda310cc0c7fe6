//! Debug operation logging.
//!
//! When `debug_logging` is enabled in the project config, every store
//! operation run from the command line is appended as a JSONL line to the
//! configured log file. This allows inspecting exactly what was requested
//! and what each batch item did.

use crate::chapters::Outcome;
use crate::config::ProjectConfig;
use crate::error::Error;
use serde_json::Value;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Appends operation events to a JSONL file, or does nothing when disabled.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    path: Option<PathBuf>,
}

impl EventLog {
    /// An event log that never writes.
    #[must_use]
    pub const fn disabled() -> Self {
        Self { path: None }
    }

    /// An event log that writes to the given file.
    #[must_use]
    pub fn to_file(path: impl Into<PathBuf>) -> Self {
        Self { path: Some(path.into()) }
    }

    /// Build the event log described by a project config.
    #[must_use]
    pub fn from_config(config: &ProjectConfig, base_dir: &Path) -> Self {
        if config.debug_logging {
            Self::to_file(config.log_path(base_dir))
        } else {
            Self::disabled()
        }
    }

    /// Check whether events are written anywhere.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.path.is_some()
    }

    /// Record an operation that completed with per-item outcomes.
    pub fn record_outcomes(&self, operation: &str, arguments: Value, outcomes: &[Outcome]) {
        let value = serde_json::to_value(outcomes).unwrap_or_default();
        self.record(operation, arguments, "outcomes", value);
    }

    /// Record an operation that was aborted by a persistence error.
    pub fn record_error(&self, operation: &str, arguments: Value, error: &Error) {
        self.record(operation, arguments, "error", Value::String(error.to_string()));
    }

    fn record(&self, operation: &str, arguments: Value, key: &str, result: Value) {
        let Some(path) = &self.path else {
            return;
        };

        let mut entry = serde_json::json!({
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "operation": operation,
            "arguments": arguments,
        });
        entry[key] = result;

        write_event(path, &entry);
    }
}

/// Append one entry to the log file.
///
/// Errors are silently ignored; logging never changes an operation's result.
fn write_event(path: &Path, entry: &Value) {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if std::fs::create_dir_all(parent).is_err() {
            return;
        }
    }

    let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) else {
        return;
    };

    let _ = writeln!(file, "{entry}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn read_log_lines(path: &Path) -> Vec<Value> {
        if !path.exists() {
            return vec![];
        }
        let content = std::fs::read_to_string(path).unwrap();
        content
            .lines()
            .filter(|l| !l.is_empty())
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_record_outcomes_when_enabled() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("events.jsonl");
        let log = EventLog::to_file(&path);

        log.record_outcomes(
            "add_chapters",
            json!({"names": ["A", "A"]}),
            &[
                Outcome::ChapterAdded { name: "A".to_string() },
                Outcome::ChapterExists { name: "A".to_string() },
            ],
        );

        let lines = read_log_lines(&path);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["operation"], "add_chapters");
        assert_eq!(lines[0]["arguments"]["names"][1], "A");
        assert_eq!(lines[0]["outcomes"][0]["outcome"], "chapter_added");
        assert_eq!(lines[0]["outcomes"][1]["outcome"], "chapter_exists");
    }

    #[test]
    fn test_record_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("events.jsonl");
        let log = EventLog::to_file(&path);

        let error = Error::Database(rusqlite::Error::QueryReturnedNoRows);
        log.record_error("list_all", json!({}), &error);

        let lines = read_log_lines(&path);
        assert_eq!(lines.len(), 1);
        assert!(lines[0]["error"].as_str().unwrap().starts_with("Database error"));
        assert!(lines[0].get("outcomes").is_none());
    }

    #[test]
    fn test_disabled_log_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let config = ProjectConfig::default();
        let log = EventLog::from_config(&config, dir.path());

        assert!(!log.is_enabled());
        log.record_outcomes("add_chapters", json!({}), &[]);
        assert!(!config.log_path(dir.path()).exists());
    }

    #[test]
    fn test_from_config_enabled() {
        let dir = TempDir::new().unwrap();
        let config = ProjectConfig { debug_logging: true, ..Default::default() };
        let log = EventLog::from_config(&config, dir.path());

        assert!(log.is_enabled());
        log.record_outcomes("list_all", json!({}), &[]);
        log.record_outcomes("list_all", json!({}), &[]);
        assert_eq!(read_log_lines(&config.log_path(dir.path())).len(), 2);
    }

    #[test]
    fn test_write_event_creates_parent_dir() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("logs").join("events.jsonl");

        write_event(&path, &json!({"operation": "test"}));

        assert_eq!(read_log_lines(&path).len(), 1);
    }

    #[test]
    fn test_write_event_file_open_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("events.jsonl");
        std::fs::create_dir(&path).unwrap();

        // Should not panic, just silently skip
        write_event(&path, &json!({"operation": "test"}));
    }

    #[test]
    fn test_entry_timestamp_is_rfc3339() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("events.jsonl");
        EventLog::to_file(&path).record_outcomes("list_all", json!({}), &[]);

        let lines = read_log_lines(&path);
        let ts = lines[0]["timestamp"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(ts).is_ok());
    }
}
