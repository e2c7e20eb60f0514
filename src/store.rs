//! Concurrent index store: per-name slots coupling state with its lock

use crate::models::Index;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;

/// A slot couples an index's exclusive lock with the state it guards.
///
/// A slot holding `None` belongs to a name whose lock was created before the
/// index itself (create-in-progress) or whose creation never completed; the
/// engine treats such slots as "not found".
pub type IndexSlot = Arc<Mutex<Option<Index>>>;

/// Registry of index slots, keyed by index name.
///
/// The outer map grows monotonically. Lookups take only the read lock; the
/// write lock is taken solely to insert a genuinely new key, so unrelated
/// indices never serialize on each other.
#[derive(Default)]
pub struct IndexStore {
    slots: RwLock<HashMap<String, IndexSlot>>,
}

impl IndexStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or lazily create the slot for a name. Safe under concurrent
    /// first-use of the same name: both callers end up with the same slot.
    pub fn slot_for(&self, name: &str) -> IndexSlot {
        if let Some(slot) = self.slots.read().get(name) {
            return Arc::clone(slot);
        }
        Arc::clone(self.slots.write().entry(name.to_string()).or_default())
    }

    /// Look up an existing slot without creating one. Read paths use this
    /// so probing unknown names cannot grow the registry.
    pub fn get(&self, name: &str) -> Option<IndexSlot> {
        self.slots.read().get(name).map(Arc::clone)
    }

    /// Sorted snapshot of every registered name. Lexicographic order is the
    /// single global lock-acquisition order for multi-index operations.
    pub fn names_sorted(&self) -> Vec<String> {
        let mut names: Vec<String> = self.slots.read().keys().cloned().collect();
        names.sort();
        names
    }
}
