//! Error types for `chapters`.
//!
//! Only persistence faults are errors. Duplicate names, missing chapters and
//! the like are reported as [`Outcome`](crate::chapters::Outcome) values and
//! never abort an operation.

/// Errors that abort a store operation and roll back its transaction.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON encoding error occurred.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A YAML parsing error occurred.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A `SQLite` database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A chapter's stored task list could not be decoded.
    #[error("Corrupt task list in chapter '{chapter}': {source}")]
    CorruptTasks {
        /// The chapter whose `tasks` column is malformed.
        chapter: String,
        /// The decoding failure.
        #[source]
        source: serde_json::Error,
    },
}

/// A specialized Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
