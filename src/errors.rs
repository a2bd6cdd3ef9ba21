//! Crate-wide error taxonomy
//!
//! Four failure classes: I/O on the storage log, duplicate keys on
//! insert, missing ids on update/delete, and bulk writes that failed
//! partway. A bulk failure reports how many documents were already
//! persisted; those writes are not rolled back. No operation retries
//! automatically; every failure propagates to the caller.

use thiserror::Error;

use crate::storage::StorageError;

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

/// Errors surfaced by database and collection operations.
#[derive(Debug, Error)]
pub enum DbError {
    /// Log open/read/write/flush/rename failure.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Insert with an id already present in the collection.
    #[error("document with id {id} already exists in collection {collection}")]
    DuplicateKey { collection: String, id: String },

    /// Update or delete referencing an absent id.
    #[error("document with id {id} not found in collection {collection}")]
    NotFound { collection: String, id: String },

    /// A bulk write failed after some documents were persisted.
    /// The `completed` documents remain applied.
    #[error("bulk write stopped after {completed} documents: {source}")]
    PartialWrite {
        completed: usize,
        #[source]
        source: Box<DbError>,
    },
}

impl DbError {
    pub fn duplicate_key(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self::DuplicateKey {
            collection: collection.into(),
            id: id.into(),
        }
    }

    pub fn not_found(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            collection: collection.into(),
            id: id.into(),
        }
    }

    pub fn partial_write(completed: usize, source: DbError) -> Self {
        Self::PartialWrite {
            completed,
            source: Box::new(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_key_display() {
        let err = DbError::duplicate_key("users", "u1");
        let display = format!("{}", err);
        assert!(display.contains("u1"));
        assert!(display.contains("users"));
        assert!(display.contains("already exists"));
    }

    #[test]
    fn test_not_found_display() {
        let err = DbError::not_found("users", "missing");
        assert!(format!("{}", err).contains("not found"));
    }

    #[test]
    fn test_partial_write_carries_completed_count() {
        let err = DbError::partial_write(3, DbError::Storage(StorageError::Closed));
        let display = format!("{}", err);
        assert!(display.contains("after 3 documents"));

        match err {
            DbError::PartialWrite { completed, .. } => assert_eq!(completed, 3),
            _ => panic!("expected PartialWrite"),
        }
    }

    #[test]
    fn test_storage_error_converts() {
        let err: DbError = StorageError::Closed.into();
        assert!(matches!(err, DbError::Storage(StorageError::Closed)));
    }
}
