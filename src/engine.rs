//! Rebalancing engine: mutation and read operations over the index store
//!
//! Every mutation is a proportional quantity rescale that leaves the
//! affected index's aggregate value unchanged. Addition dilutes existing
//! holdings to make room for the new member's weight, deletion scales the
//! survivors back up, and a dividend compensates a price cut the same way.

use crate::error::EngineError;
use crate::models::{Index, IndexState, Share};
use crate::store::IndexStore;

/// Deletion is only permitted while at least this many members exist, so an
/// index never falls below the two-member creation minimum.
const MIN_MEMBERS_FOR_DELETION: usize = 3;

/// Engine exposing create/add/delete/dividend plus state reads, all
/// expressed against the store's per-index locking discipline.
#[derive(Default)]
pub struct RebalanceEngine {
    store: IndexStore,
}

impl RebalanceEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new index. Returns `false` without mutating anything when
    /// the name is already taken. The check-then-insert runs under the
    /// per-name lock, so two racing creates cannot both succeed.
    pub fn create_index(&self, name: &str, shares: Vec<Share>) -> bool {
        let slot = self.store.slot_for(name);
        let mut guard = slot.lock();
        if guard.is_some() {
            return false;
        }
        *guard = Some(Index::new(name, shares));
        true
    }

    /// Add a share to an index, diluting every holding so the aggregate
    /// value is unchanged and the new member's weight lands at
    /// `added_value / (value_before + added_value)`.
    ///
    /// Returns `Ok(false)` without mutating when the share name is already a
    /// constituent.
    pub fn add_share(&self, index_name: &str, share: Share) -> Result<bool, EngineError> {
        let slot = self.store.slot_for(index_name);
        let mut guard = slot.lock();
        let index = guard
            .as_mut()
            .ok_or_else(|| EngineError::IndexNotFound(index_name.to_string()))?;

        if index.shares.contains_key(&share.name) {
            return Ok(false);
        }

        let value_before = index.aggregate_value();
        let added_value = share.value();
        index.shares.insert(share.name.clone(), share);
        rescale(index, value_before / (value_before + added_value));
        Ok(true)
    }

    /// Remove a share from an index, scaling the remaining holdings back up
    /// so the aggregate value is unchanged and their relative weights among
    /// themselves are preserved.
    pub fn remove_share(&self, index_name: &str, share_name: &str) -> Result<(), EngineError> {
        let slot = self.store.slot_for(index_name);
        let mut guard = slot.lock();
        let index = guard
            .as_mut()
            .ok_or_else(|| EngineError::IndexNotFound(index_name.to_string()))?;

        if index.shares.len() < MIN_MEMBERS_FOR_DELETION {
            return Err(EngineError::PreconditionFailed(
                "index must have at least 3 members before deletion".to_string(),
            ));
        }
        let removed_value = index
            .shares
            .get(share_name)
            .map(Share::value)
            .ok_or_else(|| EngineError::ShareNotFound(share_name.to_string()))?;

        let value_before = index.aggregate_value();
        if removed_value >= value_before {
            // Rescale divisor would hit zero. Unreachable while every member
            // carries positive value, but never assumed away.
            return Err(EngineError::PreconditionFailed(format!(
                "removing {share_name} would leave the index with no value"
            )));
        }

        index.shares.remove(share_name);
        rescale(index, value_before / (value_before - removed_value));
        Ok(())
    }

    /// Apply a cash dividend to a share across every index that holds it:
    /// the share's price drops by the dividend and each affected index is
    /// rescaled so its aggregate value is unchanged.
    ///
    /// All index locks are taken in lexicographic name order before any
    /// mutation, the single global order every multi-index operation uses,
    /// which rules out lock cycles between overlapping dividends. A failing
    /// index aborts the operation but indices processed before it are not
    /// rolled back.
    pub fn apply_dividend(&self, share_name: &str, dividend: f64) -> Result<(), EngineError> {
        if dividend < 0.0 {
            return Err(EngineError::InvalidArgument(
                "dividend cannot be negative".to_string(),
            ));
        }

        let names = self.store.names_sorted();
        let slots: Vec<_> = names.iter().map(|name| self.store.slot_for(name)).collect();
        let mut guards: Vec<_> = slots.iter().map(|slot| slot.lock()).collect();

        let mut share_found = false;
        for guard in guards.iter_mut() {
            let Some(index) = guard.as_mut() else { continue };
            let Some((price, quantity)) = index
                .shares
                .get(share_name)
                .map(|share| (share.price, share.quantity))
            else {
                continue;
            };
            share_found = true;

            if dividend > price {
                return Err(EngineError::InvalidArgument(format!(
                    "dividend cannot be greater than current share price of {share_name}"
                )));
            }
            let value_before = index.aggregate_value();
            let reduction = dividend * quantity;
            if reduction >= value_before {
                // Unreachable while the index keeps its two-member minimum,
                // but guards the rescale divisor all the same.
                return Err(EngineError::PreconditionFailed(format!(
                    "dividend on {share_name} would wipe out the index value"
                )));
            }

            if let Some(share) = index.shares.get_mut(share_name) {
                share.price = price - dividend;
            }
            rescale(index, value_before / (value_before - reduction));
        }

        if !share_found {
            return Err(EngineError::ShareNotFound(share_name.to_string()));
        }
        Ok(())
        // Guards drop here: locks are released only after every affected
        // index was processed (or the decision to fail was made).
    }

    /// Snapshot of one index's current state. Looks up without creating, so
    /// reads of unknown names do not grow the registry.
    pub fn index_state(&self, name: &str) -> Result<IndexState, EngineError> {
        let slot = self
            .store
            .get(name)
            .ok_or_else(|| EngineError::IndexNotFound(name.to_string()))?;
        let guard = slot.lock();
        guard
            .as_ref()
            .map(Index::state)
            .ok_or_else(|| EngineError::IndexNotFound(name.to_string()))
    }

    /// Snapshots of all indices, in lexicographic name order
    pub fn all_index_states(&self) -> Vec<IndexState> {
        self.store
            .names_sorted()
            .iter()
            .filter_map(|name| {
                self.store
                    .get(name)
                    .and_then(|slot| slot.lock().as_ref().map(Index::state))
            })
            .collect()
    }
}

/// Multiply every constituent's quantity by a common factor
fn rescale(index: &mut Index, factor: f64) {
    for share in index.shares.values_mut() {
        share.quantity *= factor;
    }
}
