//! Command execution for the CLI.
//!
//! This module runs a single [`Command`] against a store and produces output
//! lines. The interactive menu and the one-shot subcommands share it.

use crate::chapters::{split_names, ChapterStore, Outcome, SqliteChapterStore};
use crate::cli::Command;
use crate::config::ProjectConfig;
use crate::error::Result;
use crate::event_logging::EventLog;
use crate::render;
use crate::traits::{AllowAll, Confirm, DenyAll};
use serde_json::{json, Value};
use std::path::Path;
use std::process::ExitCode;

/// Shown when a chapter batch has no usable names.
const CHAPTER_NAMES_EMPTY: &str = "Chapter names cannot be empty.";

/// Shown when a task command is missing its chapter or task names.
const TASK_ARGS_EMPTY: &str = "Chapter name and task names cannot be empty.";

/// Output from running the CLI, with separate stdout and stderr messages.
#[derive(Debug)]
pub struct CliOutput {
    /// Exit code for the process.
    pub exit_code: ExitCode,
    /// Messages to print to stdout.
    pub stdout: Vec<String>,
    /// Messages to print to stderr.
    pub stderr: Vec<String>,
}

/// Load the project config and open the store and event log it describes.
///
/// `db` overrides the configured database path.
///
/// # Errors
///
/// Returns an error if the config cannot be parsed or the database cannot be
/// opened.
pub fn open_session(db: Option<&Path>, base_dir: &Path) -> Result<(SqliteChapterStore, EventLog)> {
    let config = ProjectConfig::load_or_default(base_dir)?;
    let db_path = db.map_or_else(|| config.database_path(base_dir), Path::to_path_buf);
    let store = SqliteChapterStore::open(db_path)?;
    Ok((store, EventLog::from_config(&config, base_dir)))
}

/// Run a one-shot command.
///
/// Per-item rejections still exit successfully; only a persistence error
/// exits with status 1.
pub fn run(command: &Command, store: &mut dyn ChapterStore, log: &EventLog) -> CliOutput {
    let result = if matches!(command, Command::DeleteChapters { yes: true, .. }) {
        execute(command, store, &mut AllowAll, log)
    } else {
        execute(command, store, &mut DenyAll, log)
    };

    match result {
        Ok(lines) => CliOutput { exit_code: ExitCode::SUCCESS, stdout: lines, stderr: vec![] },
        Err(message) => {
            CliOutput { exit_code: ExitCode::from(1), stdout: vec![], stderr: vec![message] }
        }
    }
}

/// Execute one command and render the lines to show the user.
///
/// # Errors
///
/// Returns the message to show if the store operation failed and was
/// rolled back.
pub fn execute(
    command: &Command,
    store: &mut dyn ChapterStore,
    confirm: &mut dyn Confirm,
    log: &EventLog,
) -> std::result::Result<Vec<String>, String> {
    match command {
        Command::Version => Ok(vec![format!("chapters v{}", crate::VERSION)]),
        Command::List { json } => run_list(store, *json, log),
        Command::AddChapters { names } => {
            let names = split_names(names);
            if names.is_empty() {
                return Ok(vec![CHAPTER_NAMES_EMPTY.to_string()]);
            }
            let result = store.add_chapters(&names);
            report(log, command, json!({ "names": names }), result, "adding chapters")
        }
        Command::DeleteChapters { names, .. } => {
            let names = split_names(names);
            if names.is_empty() {
                return Ok(vec![CHAPTER_NAMES_EMPTY.to_string()]);
            }
            let result = store.delete_chapters(&names, confirm);
            report(log, command, json!({ "names": names }), result, "deleting chapters")
        }
        Command::RenameChapter { old, new } => {
            let (old, new) = (old.trim(), new.trim());
            if old.is_empty() || new.is_empty() {
                return Ok(vec![CHAPTER_NAMES_EMPTY.to_string()]);
            }
            let result = store.rename_chapter(old, new).map(|outcome| vec![outcome]);
            report(log, command, json!({ "old": old, "new": new }), result, "renaming chapter")
        }
        Command::AddTasks { chapter, names } => {
            let (chapter, names) = (chapter.trim(), split_names(names));
            if chapter.is_empty() || names.is_empty() {
                return Ok(vec![TASK_ARGS_EMPTY.to_string()]);
            }
            let result = store.add_tasks(chapter, &names);
            let arguments = json!({ "chapter": chapter, "names": names });
            report(log, command, arguments, result, "adding tasks")
        }
        Command::DeleteTasks { chapter, names } => {
            let (chapter, names) = (chapter.trim(), split_names(names));
            if chapter.is_empty() || names.is_empty() {
                return Ok(vec![TASK_ARGS_EMPTY.to_string()]);
            }
            let result = store.delete_tasks(chapter, &names);
            let arguments = json!({ "chapter": chapter, "names": names });
            report(log, command, arguments, result, "deleting tasks")
        }
        Command::RenameTask { chapter, old, new } => {
            let (chapter, old, new) = (chapter.trim(), old.trim(), new.trim());
            if chapter.is_empty() || old.is_empty() || new.is_empty() {
                return Ok(vec![TASK_ARGS_EMPTY.to_string()]);
            }
            let result = store.rename_task(chapter, old, new).map(|outcome| vec![outcome]);
            let arguments = json!({ "chapter": chapter, "old": old, "new": new });
            report(log, command, arguments, result, "renaming task")
        }
    }
}

fn run_list(
    store: &dyn ChapterStore,
    as_json: bool,
    log: &EventLog,
) -> std::result::Result<Vec<String>, String> {
    let arguments = json!({ "json": as_json });
    let rendered = store.list_all().and_then(|chapters| {
        if as_json {
            render::listing_json(&chapters).map(|json| vec![json])
        } else {
            Ok(render::listing_lines(&chapters))
        }
    });

    match rendered {
        Ok(lines) => {
            log.record_outcomes("list_all", arguments, &[]);
            Ok(lines)
        }
        Err(e) => {
            log.record_error("list_all", arguments, &e);
            Err(format!("Error listing tasks: {e}"))
        }
    }
}

/// Log a finished store operation and turn it into output lines.
fn report(
    log: &EventLog,
    command: &Command,
    arguments: Value,
    result: Result<Vec<Outcome>>,
    doing: &str,
) -> std::result::Result<Vec<String>, String> {
    let operation = command.operation().unwrap_or("unknown");
    match result {
        Ok(outcomes) => {
            log.record_outcomes(operation, arguments, &outcomes);
            Ok(render::outcome_lines(&outcomes))
        }
        Err(e) => {
            log.record_error(operation, arguments, &e);
            Err(format!("Error {doing}: {e}"))
        }
    }
}
