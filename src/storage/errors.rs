//! Storage log error types
//!
//! Every variant is an I/O failure of one step of the log protocol;
//! the variant names the step so callers can report it precisely. None
//! of these corrupt already-committed state: an append that fails
//! leaves no acknowledged record, and a compaction that fails leaves
//! the original file as the effective state.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for storage log operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors raised by the append-only log.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing file could not be created or opened.
    #[error("failed to open log file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading the log during load failed. A single malformed line is
    /// not a read failure; those are skipped with a warning.
    #[error("failed to read log file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing a record to the file failed.
    #[error("failed to append record: {source}")]
    Append {
        #[source]
        source: io::Error,
    },

    /// fsync after an append failed; the record may not be durable and
    /// the append is not acknowledged.
    #[error("failed to sync log to disk: {source}")]
    Sync {
        #[source]
        source: io::Error,
    },

    /// A step of the compaction rewrite failed before the rename commit
    /// point; the original file is untouched.
    #[error("compaction failed during {step}: {source}")]
    Compact {
        step: &'static str,
        #[source]
        source: io::Error,
    },

    /// Serializing a record to its JSON line failed.
    #[error("failed to encode record: {source}")]
    Encode {
        #[source]
        source: serde_json::Error,
    },

    /// Operation attempted on a log that has been closed.
    #[error("log is closed")]
    Closed,
}
