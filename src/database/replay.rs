//! Log replay
//!
//! State after replay is the fold of the log in file order: a document
//! record sets or overwrites its id, a tombstone removes it. The last
//! record for a given (collection, id) wins. Replay is deterministic:
//! the same record sequence always folds to the same state.

use std::collections::HashMap;

use crate::document::Document;
use crate::storage::StorageRecord;

/// Per-collection document maps produced by replay.
pub(crate) type ReplayState = HashMap<String, HashMap<String, Document>>;

/// Statistics from a completed replay.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplayStats {
    /// Total records folded
    pub records_replayed: usize,
    /// Document records applied (inserts and overwrites)
    pub upserts: usize,
    /// Tombstones applied
    pub tombstones: usize,
}

/// Folds `records` in order into per-collection state.
pub(crate) fn replay(records: Vec<StorageRecord>) -> (ReplayState, ReplayStats) {
    let mut state = ReplayState::new();
    let mut stats = ReplayStats::default();

    for record in records {
        let collection = state.entry(record.collection).or_default();
        match record.doc {
            Some(doc) => {
                collection.insert(record.id, doc);
                stats.upserts += 1;
            }
            None => {
                collection.remove(&record.id);
                stats.tombstones += 1;
            }
        }
        stats.records_replayed += 1;
    }

    (state, stats)
}
