//! On-disk record format
//!
//! One JSON object per line:
//!
//! ```text
//! {"collection": "<name>", "id": "<id>", "doc": <object> | null}
//! ```
//!
//! `doc: null` is a tombstone: the document existed and was removed,
//! as opposed to never having existed. Records are immutable once
//! appended; they are only superseded by later records or physically
//! discarded by compaction.

use serde::{Deserialize, Serialize};

use crate::document::Document;

/// A single record in the storage log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageRecord {
    /// Name of the collection this record belongs to
    pub collection: String,
    /// Document id, unique within the collection
    pub id: String,
    /// The document body, or `None` for a tombstone
    pub doc: Option<Document>,
}

impl StorageRecord {
    /// Create a record carrying a live document.
    pub fn document(collection: impl Into<String>, id: impl Into<String>, doc: Document) -> Self {
        Self {
            collection: collection.into(),
            id: id.into(),
            doc: Some(doc),
        }
    }

    /// Create a tombstone record for a deleted document.
    pub fn tombstone(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            id: id.into(),
            doc: None,
        }
    }

    /// Whether this record marks a deletion.
    pub fn is_tombstone(&self) -> bool {
        self.doc.is_none()
    }
}
