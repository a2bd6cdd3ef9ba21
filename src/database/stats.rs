//! Read-only database statistics

use std::collections::BTreeMap;

use serde::Serialize;

/// Snapshot of collection and document counts.
///
/// Read-only, no side effects. Per-collection counts use a `BTreeMap`
/// so serialized output is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatabaseStats {
    /// Number of registered collections
    pub collections: usize,
    /// Total documents across all collections
    pub documents: usize,
    /// Document count per collection name
    pub per_collection: BTreeMap<String, usize>,
}
