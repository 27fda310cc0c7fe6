//! Chapters and their task lists.
//!
//! A chapter is a named, ordered list of named tasks. The whole task list
//! is stored as one JSON value on the chapter's row, so every change to a
//! chapter's tasks is a single write.
//!
//! # Example
//!
//! ```no_run
//! use chapters::chapters::{split_names, ChapterStore, SqliteChapterStore};
//! use chapters::traits::DenyAll;
//!
//! let mut store = SqliteChapterStore::open("/tmp/chapters.db").unwrap();
//!
//! // Create chapters from a `;`-separated batch
//! let outcomes = store.add_chapters(&split_names("Algebra; Geometry")).unwrap();
//! for outcome in &outcomes {
//!     println!("{outcome}");
//! }
//!
//! // Adding tasks to a missing chapter creates it
//! store.add_tasks("Calculus", &["Limits", "Derivatives"]).unwrap();
//!
//! // Non-empty chapters need confirmation before deletion
//! store.delete_chapters(&["Calculus"], &mut DenyAll).unwrap();
//! ```

pub mod models;
pub mod store;

pub use models::{Chapter, FailureKind, Outcome, Task};
pub use store::{ChapterStore, SqliteChapterStore};

/// Separator between names in a batch input.
pub const NAME_SEPARATOR: char = ';';

/// Split a `;`-separated batch into trimmed, non-empty names.
#[must_use]
pub fn split_names(input: &str) -> Vec<&str> {
    input.split(NAME_SEPARATOR).map(str::trim).filter(|name| !name.is_empty()).collect()
}
