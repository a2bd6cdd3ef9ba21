//! Append-only log file
//!
//! Owns the single backing file for a database. All appends serialize
//! behind one lock, regardless of which collection triggered them, so
//! the physical write order is a single linear sequence even though
//! logical operations on different collections are unordered.
//!
//! Durability rule for `append`: write the line, fsync, then return.
//! A caller that sees `Ok` may assume the record survives a crash
//! immediately after.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::observability::Logger;

use super::errors::{StorageError, StorageResult};
use super::record::StorageRecord;

/// Handle to the append-only log file.
pub struct StorageLog {
    path: PathBuf,
    file: Mutex<Option<File>>,
}

impl StorageLog {
    /// Opens or creates the backing file at `path`.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref().to_path_buf();
        let file = open_append_handle(&path)?;

        Ok(Self {
            path,
            file: Mutex::new(Some(file)),
        })
    }

    /// Path to the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every record in file order.
    ///
    /// Empty lines are ignored. A line that fails to parse is skipped
    /// with a warning; a single corrupt line never aborts the load.
    pub fn load_all(&self) -> StorageResult<Vec<StorageRecord>> {
        let guard = self.file.lock().unwrap();
        if guard.is_none() {
            return Err(StorageError::Closed);
        }

        // Read through a fresh handle so the append handle keeps its
        // position at end of file.
        let file = File::open(&self.path).map_err(|e| StorageError::Read {
            path: self.path.clone(),
            source: e,
        })?;
        let reader = BufReader::new(file);

        let mut records = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| StorageError::Read {
                path: self.path.clone(),
                source: e,
            })?;

            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str::<StorageRecord>(&line) {
                Ok(record) => records.push(record),
                Err(e) => {
                    let line_number = (index + 1).to_string();
                    let reason = e.to_string();
                    Logger::warn(
                        "LOG_RECORD_SKIPPED",
                        &[("line", line_number.as_str()), ("reason", reason.as_str())],
                    );
                }
            }
        }

        Ok(records)
    }

    /// Appends one record as a single JSON line and forces it to
    /// stable storage before returning.
    pub fn append(&self, record: &StorageRecord) -> StorageResult<()> {
        let mut guard = self.file.lock().unwrap();
        let file = guard.as_mut().ok_or(StorageError::Closed)?;

        let mut line = serde_json::to_vec(record).map_err(|e| StorageError::Encode { source: e })?;
        line.push(b'\n');

        file.write_all(&line)
            .map_err(|e| StorageError::Append { source: e })?;
        file.sync_all()
            .map_err(|e| StorageError::Sync { source: e })?;

        Ok(())
    }

    /// Rewrites the file to exactly `records`.
    ///
    /// The records are written to `<path>.tmp`, flushed and fsynced,
    /// then renamed over the original path. The rename is the single
    /// commit point: until it succeeds the original file is the
    /// effective state, and on failure the temp file is removed. A
    /// failure after the rename leaves the log closed, since the old
    /// append handle points at the unlinked pre-rewrite file.
    pub fn compact(&self, records: &[StorageRecord]) -> StorageResult<()> {
        let mut guard = self.file.lock().unwrap();
        if guard.is_none() {
            return Err(StorageError::Closed);
        }

        let tmp_path = temp_path(&self.path);
        let result = write_records(&tmp_path, records).and_then(|_| {
            fs::rename(&tmp_path, &self.path).map_err(|e| StorageError::Compact {
                step: "rename",
                source: e,
            })
        });

        if let Err(e) = result {
            let _ = fs::remove_file(&tmp_path);
            return Err(e);
        }

        // The rename is committed and the old handle now points at the
        // unlinked pre-rewrite file. Drop it before anything else can
        // fail: an error below must leave the log closed, never
        // acknowledging appends that no reopen would ever see.
        *guard = None;

        // Make the rename itself durable.
        sync_parent_dir(&self.path)?;

        // Reopen so subsequent appends land after the rewritten state.
        *guard = Some(open_append_handle(&self.path)?);

        Ok(())
    }

    /// Releases the file handle. Idempotent; later operations fail
    /// with `StorageError::Closed`.
    pub fn close(&self) {
        let mut guard = self.file.lock().unwrap();
        *guard = None;
    }

    /// Whether `close` has been called.
    pub fn is_closed(&self) -> bool {
        self.file.lock().unwrap().is_none()
    }
}

fn open_append_handle(path: &Path) -> StorageResult<File> {
    OpenOptions::new()
        .create(true)
        .read(true)
        .append(true)
        .open(path)
        .map_err(|e| StorageError::Open {
            path: path.to_path_buf(),
            source: e,
        })
}

fn temp_path(path: &Path) -> PathBuf {
    let mut os: OsString = path.as_os_str().to_os_string();
    os.push(".tmp");
    PathBuf::from(os)
}

fn write_records(tmp_path: &Path, records: &[StorageRecord]) -> StorageResult<()> {
    let file = File::create(tmp_path).map_err(|e| StorageError::Compact {
        step: "create temp file",
        source: e,
    })?;
    let mut writer = BufWriter::new(file);

    for record in records {
        let mut line = serde_json::to_vec(record).map_err(|e| StorageError::Encode { source: e })?;
        line.push(b'\n');
        writer.write_all(&line).map_err(|e| StorageError::Compact {
            step: "write temp file",
            source: e,
        })?;
    }

    let file = writer.into_inner().map_err(|e| StorageError::Compact {
        step: "flush temp file",
        source: e.into_error(),
    })?;
    file.sync_all().map_err(|e| StorageError::Compact {
        step: "sync temp file",
        source: e,
    })
}

fn sync_parent_dir(path: &Path) -> StorageResult<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => return Ok(()),
    };

    let dir = File::open(parent).map_err(|e| StorageError::Compact {
        step: "open parent directory",
        source: e,
    })?;
    dir.sync_all().map_err(|e| StorageError::Compact {
        step: "sync parent directory",
        source: e,
    })
}
