//! Database registry and lifecycle
//!
//! Opens the storage log, replays it in file order into per-collection
//! maps, and serves collection handles. A caller owns the handle
//! explicitly: open, use, close. There is no process-global instance.
//!
//! Compaction takes a consistent whole-database read snapshot (every
//! collection read lock held at once), then performs the file rewrite
//! without holding any collection lock. Writes racing the rewrite land
//! in the log after the rename and simply survive into the next
//! compaction pass; that staleness is accepted by design.

mod replay;
mod stats;

pub use replay::ReplayStats;
pub use stats::DatabaseStats;

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::{Arc, RwLock};

use crate::collection::Collection;
use crate::errors::DbResult;
use crate::observability::Logger;
use crate::storage::{StorageLog, StorageRecord};

/// An open document store backed by a single log file.
pub struct Database {
    log: Arc<StorageLog>,
    collections: RwLock<HashMap<String, Arc<Collection>>>,
}

impl Database {
    /// Opens (or creates) the database at `path` and replays the full
    /// log. Collections left without a single surviving document do
    /// not materialize.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        let log = Arc::new(StorageLog::open(path)?);
        let records = log.load_all()?;
        let (state, replay_stats) = replay::replay(records);

        let mut collections = HashMap::new();
        for (name, documents) in state {
            if documents.is_empty() {
                continue;
            }
            let collection = Collection::with_documents(name.clone(), Arc::clone(&log), documents);
            collections.insert(name, Arc::new(collection));
        }

        let path_field = log.path().display().to_string();
        let records_field = replay_stats.records_replayed.to_string();
        let collections_field = collections.len().to_string();
        Logger::info(
            "DATABASE_OPENED",
            &[
                ("path", path_field.as_str()),
                ("records_replayed", records_field.as_str()),
                ("collections", collections_field.as_str()),
            ],
        );

        Ok(Self {
            log,
            collections: RwLock::new(collections),
        })
    }

    /// Returns the named collection, lazily creating and registering
    /// an empty one if needed. Never fails.
    pub fn collection(&self, name: &str) -> Arc<Collection> {
        if let Some(existing) = self.collections.read().unwrap().get(name) {
            return Arc::clone(existing);
        }

        let mut collections = self.collections.write().unwrap();
        let entry = collections
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(Collection::new(name, Arc::clone(&self.log))));
        Arc::clone(entry)
    }

    /// Snapshot of current collection names. No required ordering.
    pub fn list_collections(&self) -> Vec<String> {
        self.collections.read().unwrap().keys().cloned().collect()
    }

    /// Tombstones every document in `name` (one record each), then
    /// removes the collection from the registry. No-op for unknown
    /// names. On a partial persistence failure the collection stays
    /// registered with whatever documents were not yet tombstoned.
    pub fn drop_collection(&self, name: &str) -> DbResult<()> {
        let mut collections = self.collections.write().unwrap();
        let collection = match collections.get(name) {
            Some(c) => Arc::clone(c),
            None => return Ok(()),
        };

        collection.clear()?;
        collections.remove(name);

        Ok(())
    }

    /// Rewrites the log to exactly the currently surviving documents.
    /// Reopening from the compacted file reproduces the state the
    /// snapshot observed.
    pub fn compact(&self) -> DbResult<()> {
        let records = self.snapshot_records();
        let record_count = records.len();

        self.log.compact(&records)?;

        let records_field = record_count.to_string();
        Logger::info("DATABASE_COMPACTED", &[("records", records_field.as_str())]);

        Ok(())
    }

    /// Collection count, per-collection document counts, and total.
    pub fn stats(&self) -> DatabaseStats {
        let collections = self.collections.read().unwrap();

        let mut per_collection = BTreeMap::new();
        let mut documents = 0;
        for (name, collection) in collections.iter() {
            let count = collection.count();
            documents += count;
            per_collection.insert(name.clone(), count);
        }

        DatabaseStats {
            collections: collections.len(),
            documents,
            per_collection,
        }
    }

    /// Closes the storage log. Idempotent.
    pub fn close(&self) {
        self.log.close();
    }

    /// One record per surviving document, across all collections, read
    /// under every collection lock at once so no partial
    /// cross-collection write is observed.
    fn snapshot_records(&self) -> Vec<StorageRecord> {
        let collections = self.collections.read().unwrap();

        let guards: Vec<_> = collections
            .iter()
            .map(|(name, collection)| (name, collection.documents_guard()))
            .collect();

        let mut records = Vec::new();
        for (name, documents) in &guards {
            for (id, doc) in documents.iter() {
                records.push(StorageRecord::document(name.as_str(), id, doc.clone()));
            }
        }

        records
    }
}
