//! Core entities: shares, indices and their derived read-model state

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A priced constituent holding. Owned by exactly one index at a time and
/// only reachable through that index's lock.
#[derive(Debug, Clone, PartialEq)]
pub struct Share {
    pub name: String,
    pub price: f64,
    pub quantity: f64,
}

impl Share {
    pub fn new(name: impl Into<String>, price: f64, quantity: f64) -> Self {
        Self {
            name: name.into(),
            price,
            quantity,
        }
    }

    /// Value this holding contributes to its index
    pub fn value(&self) -> f64 {
        self.price * self.quantity
    }
}

/// A named basket of shares, keyed by share name.
///
/// The aggregate value is deliberately not stored: a stored value would
/// drift from constituent state under concurrent mutation, so it is derived
/// from the current constituents every time it is needed.
#[derive(Debug, Clone)]
pub struct Index {
    pub name: String,
    pub shares: BTreeMap<String, Share>,
}

impl Index {
    pub fn new(name: impl Into<String>, shares: impl IntoIterator<Item = Share>) -> Self {
        Self {
            name: name.into(),
            shares: shares.into_iter().map(|s| (s.name.clone(), s)).collect(),
        }
    }

    /// Aggregate value: sum of price times quantity over all constituents
    pub fn aggregate_value(&self) -> f64 {
        self.shares.values().map(Share::value).sum()
    }

    /// Weight of one constituent as a percentage of the aggregate value
    pub fn weight_pct(&self, share_name: &str) -> Option<f64> {
        let total = self.aggregate_value();
        self.shares.get(share_name).map(|s| s.value() / total * 100.0)
    }

    /// Owned read snapshot with per-member values and weights. BTreeMap
    /// iteration already yields the lexicographic presentation order.
    pub fn state(&self) -> IndexState {
        let total = self.aggregate_value();
        let members = self
            .shares
            .values()
            .map(|share| {
                let value = share.value();
                IndexMemberState {
                    share_name: share.name.clone(),
                    share_price: share.price,
                    number_of_shares: share.quantity,
                    index_weight_pct: if total > 0.0 { value / total * 100.0 } else { 0.0 },
                    index_value: value,
                }
            })
            .collect();
        IndexState {
            index_name: self.name.clone(),
            index_value: total,
            index_members: members,
        }
    }
}

/// Snapshot of an index as reported to callers
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexState {
    pub index_name: String,
    pub index_value: f64,
    pub index_members: Vec<IndexMemberState>,
}

/// One constituent inside an [`IndexState`] snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexMemberState {
    pub share_name: String,
    pub share_price: f64,
    pub number_of_shares: f64,
    pub index_weight_pct: f64,
    pub index_value: f64,
}
