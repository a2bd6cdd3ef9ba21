//! Append-only storage log
//!
//! The only persisted artifact is a single plain-text file of
//! newline-delimited JSON records. Appends are durable before they are
//! acknowledged: write, fsync, then return. Compaction rewrites the
//! file through a temp file and an atomic rename, so a crash
//! mid-compaction leaves the original file intact and valid.

mod errors;
mod log;
mod record;

pub use errors::{StorageError, StorageResult};
pub use log::StorageLog;
pub use record::StorageRecord;
