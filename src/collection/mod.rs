//! Named collection of documents
//!
//! Owns the in-memory id -> document map for one collection and turns
//! every mutation into exactly one log record per affected document.
//! Ids are unique within a collection, not globally.
//!
//! Concurrency: a read/write lock per collection. Reads (`find*`,
//! `count*`) may proceed together; any write excludes every other
//! operation on the same collection for its duration. Collections are
//! independent and never block each other; only the physical append
//! order in the shared log is globally serialized.
//!
//! Durability order: every mutation appends its record before the
//! in-memory change becomes visible, except insert, which places the
//! document first and compensates by removing it when the append
//! fails. Either way the map and the log never diverge for a single
//! operation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard};

use serde_json::Value;
use uuid::Uuid;

use crate::document::{canonical_text, Document, Filter, ID_FIELD};
use crate::errors::{DbError, DbResult};
use crate::query::matches_filter;
use crate::storage::{StorageLog, StorageRecord};

/// A named collection of schema-less documents.
pub struct Collection {
    name: String,
    log: Arc<StorageLog>,
    documents: RwLock<HashMap<String, Document>>,
}

impl Collection {
    pub(crate) fn new(name: impl Into<String>, log: Arc<StorageLog>) -> Self {
        Self {
            name: name.into(),
            log,
            documents: RwLock::new(HashMap::new()),
        }
    }

    pub(crate) fn with_documents(
        name: impl Into<String>,
        log: Arc<StorageLog>,
        documents: HashMap<String, Document>,
    ) -> Self {
        Self {
            name: name.into(),
            log,
            documents: RwLock::new(documents),
        }
    }

    /// Collection name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Inserts a document and returns its id.
    ///
    /// A document without an identifier field gets a generated UUID; a
    /// present identifier is canonicalized to its textual form and
    /// written back, so the field always equals the map key. Fails
    /// with `DuplicateKey` if the id is already live. All-or-nothing:
    /// if the log append fails, the in-memory insertion is rolled back
    /// before the error surfaces.
    pub fn insert(&self, mut doc: Document) -> DbResult<String> {
        let id = match doc.get(ID_FIELD) {
            Some(value) => canonical_text(value),
            None => Uuid::new_v4().to_string(),
        };
        doc.insert(ID_FIELD.to_string(), Value::String(id.clone()));

        let mut documents = self.documents.write().unwrap();
        if documents.contains_key(&id) {
            return Err(DbError::duplicate_key(&self.name, &id));
        }

        let record = StorageRecord::document(&self.name, &id, doc.clone());
        documents.insert(id.clone(), doc);

        if let Err(e) = self.log.append(&record) {
            // The map must not retain a document the log never
            // acknowledged.
            documents.remove(&id);
            return Err(e.into());
        }

        Ok(id)
    }

    /// O(1) lookup by id. Absence is `None`, not an error.
    pub fn find_by_id(&self, id: &str) -> Option<Document> {
        self.documents.read().unwrap().get(id).cloned()
    }

    /// Snapshot copy of every document. Iteration order unspecified.
    pub fn find_all(&self) -> Vec<Document> {
        self.documents.read().unwrap().values().cloned().collect()
    }

    /// Every document matching `filter`. An empty filter matches all.
    pub fn find(&self, filter: &Filter) -> Vec<Document> {
        let documents = self.documents.read().unwrap();
        if filter.is_empty() {
            return documents.values().cloned().collect();
        }

        documents
            .values()
            .filter(|doc| matches_filter(doc, filter))
            .cloned()
            .collect()
    }

    /// Shallow-merges `partial` into the document with `id` and
    /// persists the entire merged document as a new record.
    ///
    /// Fields absent from `partial` are preserved. The identifier
    /// field is forced back to `id`: an update payload can never
    /// change a document's identity, even if it carries a different
    /// id value. The in-memory map changes only after the append
    /// succeeds.
    pub fn update(&self, id: &str, partial: &Document) -> DbResult<()> {
        let mut documents = self.documents.write().unwrap();
        let merged = match documents.get(id) {
            Some(existing) => merge_document(existing, partial, id),
            None => return Err(DbError::not_found(&self.name, id)),
        };

        let record = StorageRecord::document(&self.name, id, merged.clone());
        self.log.append(&record)?;
        documents.insert(id.to_string(), merged);

        Ok(())
    }

    /// Applies the `update` merge to every document matching `filter`
    /// and returns the count updated, one record per match.
    ///
    /// If persistence fails partway through, the error is
    /// `PartialWrite` carrying the count already committed; completed
    /// updates are not rolled back.
    pub fn update_many(&self, filter: &Filter, partial: &Document) -> DbResult<usize> {
        let mut documents = self.documents.write().unwrap();
        let matching = matching_ids(&documents, filter);

        let mut completed = 0;
        for id in matching {
            let merged = merge_document(&documents[&id], partial, &id);
            let record = StorageRecord::document(&self.name, &id, merged.clone());

            if let Err(e) = self.log.append(&record) {
                return Err(DbError::partial_write(completed, e.into()));
            }

            documents.insert(id, merged);
            completed += 1;
        }

        Ok(completed)
    }

    /// Removes the document with `id`, appending a tombstone first.
    pub fn delete(&self, id: &str) -> DbResult<()> {
        let mut documents = self.documents.write().unwrap();
        if !documents.contains_key(id) {
            return Err(DbError::not_found(&self.name, id));
        }

        self.log.append(&StorageRecord::tombstone(&self.name, id))?;
        documents.remove(id);

        Ok(())
    }

    /// Deletes every document matching `filter` and returns the count.
    /// Same partial-failure semantics as `update_many`.
    pub fn delete_many(&self, filter: &Filter) -> DbResult<usize> {
        let mut documents = self.documents.write().unwrap();
        let matching = matching_ids(&documents, filter);

        let mut completed = 0;
        for id in matching {
            if let Err(e) = self.log.append(&StorageRecord::tombstone(&self.name, &id)) {
                return Err(DbError::partial_write(completed, e.into()));
            }

            documents.remove(&id);
            completed += 1;
        }

        Ok(completed)
    }

    /// Number of documents. O(1).
    pub fn count(&self) -> usize {
        self.documents.read().unwrap().len()
    }

    /// Number of documents matching `filter`. Scans unless the filter
    /// is empty.
    pub fn count_where(&self, filter: &Filter) -> usize {
        let documents = self.documents.read().unwrap();
        if filter.is_empty() {
            return documents.len();
        }

        documents
            .values()
            .filter(|doc| matches_filter(doc, filter))
            .count()
    }

    /// Tombstones every document in the collection, one record each.
    /// Used when the collection is dropped from the registry. On a
    /// partial failure the remaining documents stay live.
    pub(crate) fn clear(&self) -> DbResult<usize> {
        let mut documents = self.documents.write().unwrap();
        let ids: Vec<String> = documents.keys().cloned().collect();

        let mut completed = 0;
        for id in ids {
            if let Err(e) = self.log.append(&StorageRecord::tombstone(&self.name, &id)) {
                return Err(DbError::partial_write(completed, e.into()));
            }

            documents.remove(&id);
            completed += 1;
        }

        Ok(completed)
    }

    /// Read guard over the document map, for whole-database snapshots.
    pub(crate) fn documents_guard(&self) -> RwLockReadGuard<'_, HashMap<String, Document>> {
        self.documents.read().unwrap()
    }
}

fn matching_ids(documents: &HashMap<String, Document>, filter: &Filter) -> Vec<String> {
    documents
        .iter()
        .filter(|(_, doc)| matches_filter(doc, filter))
        .map(|(id, _)| id.clone())
        .collect()
}

/// Shallow merge: keys in `partial` overwrite, everything else is
/// preserved, and the identifier field is pinned to `id`.
fn merge_document(existing: &Document, partial: &Document, id: &str) -> Document {
    let mut merged = existing.clone();
    for (key, value) in partial {
        merged.insert(key.clone(), value.clone());
    }
    merged.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
    merged
}
