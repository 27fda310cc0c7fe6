//! Command-line interface for chapters.
//!
//! Without a subcommand the binary runs the interactive numbered menu.
//! Each subcommand runs exactly one store operation and exits.

mod menu;
mod run;


pub use menu::{Menu, PromptConfirm};
pub use run::{execute, open_session, run, CliOutput};

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Chapters - a personal task tracker.
///
/// Tasks are grouped into named chapters and stored in a local SQLite file.
/// Names in batch arguments are separated by `;`.
#[derive(Parser, Debug)]
#[command(name = "chapters")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path of the chapter database (overrides `database` in chapters.yaml)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// The command to execute. Starts the interactive menu when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// One-shot commands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List all chapters and their tasks.
    List {
        /// Print the listing as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add chapters (separate names by `;`).
    #[command(name = "add-chapters")]
    AddChapters {
        /// Chapter names, e.g. "Chapter 1;Chapter 2"
        names: String,
    },

    /// Delete chapters (separate names by `;`).
    ///
    /// Chapters that still hold tasks are skipped unless `--yes` is given.
    #[command(name = "delete-chapters")]
    DeleteChapters {
        /// Chapter names, e.g. "Chapter 1;Chapter 2"
        names: String,

        /// Delete chapters that still hold tasks without asking
        #[arg(long)]
        yes: bool,
    },

    /// Rename a chapter.
    #[command(name = "rename-chapter")]
    RenameChapter {
        /// Current chapter name
        old: String,

        /// New chapter name
        new: String,
    },

    /// Add tasks to a chapter, creating the chapter if needed.
    #[command(name = "add-tasks")]
    AddTasks {
        /// Chapter name
        chapter: String,

        /// Task names, e.g. "Task 1.1;Task 1.2"
        names: String,
    },

    /// Delete tasks from a chapter.
    #[command(name = "delete-tasks")]
    DeleteTasks {
        /// Chapter name
        chapter: String,

        /// Task names, e.g. "Task 1.1;Task 1.2"
        names: String,
    },

    /// Rename a task within a chapter.
    #[command(name = "rename-task")]
    RenameTask {
        /// Chapter name
        chapter: String,

        /// Current task name
        old: String,

        /// New task name
        new: String,
    },

    /// Show version information.
    Version,
}

impl Command {
    /// Name used for this command in the event log, or `None` if it does
    /// not touch the store.
    #[must_use]
    pub const fn operation(&self) -> Option<&'static str> {
        match self {
            Self::List { .. } => Some("list_all"),
            Self::AddChapters { .. } => Some("add_chapters"),
            Self::DeleteChapters { .. } => Some("delete_chapters"),
            Self::RenameChapter { .. } => Some("rename_chapter"),
            Self::AddTasks { .. } => Some("add_tasks"),
            Self::DeleteTasks { .. } => Some("delete_tasks"),
            Self::RenameTask { .. } => Some("rename_task"),
            Self::Version => None,
        }
    }
}
