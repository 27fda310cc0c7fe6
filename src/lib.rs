//! # `chapters`
//!
//! A personal task tracker: named tasks grouped into named chapters, kept in
//! a local `SQLite` file.

pub mod chapters;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod event_logging;
pub mod render;
pub mod testing;
pub mod traits;

pub use chapters::{ChapterStore, Outcome, SqliteChapterStore};
pub use error::{Error, Result};
pub use traits::{AllowAll, Confirm, DenyAll};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
