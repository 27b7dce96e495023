//! Bipartite id ↔ unipartite id bijection

use serde::{Deserialize, Serialize};

use super::SparseError;
use crate::features::bipartite::NodeId;

/// Maps dense unipartite ids `0..N` to bipartite node ids and back
///
/// New ids follow ascending bipartite id, so the reverse lookup is a binary
/// search over `new_to_old`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "IdMapRecord", into = "IdMapRecord")]
pub struct IdMap {
    new_to_old: Vec<NodeId>,
}

/// Persisted form of an [`IdMap`]
#[derive(Debug, Clone, Serialize, Deserialize)]
struct IdMapRecord {
    node_count: usize,
    new_to_old: Vec<NodeId>,
}

impl TryFrom<IdMapRecord> for IdMap {
    type Error = SparseError;

    fn try_from(record: IdMapRecord) -> Result<Self, Self::Error> {
        if record.node_count != record.new_to_old.len() {
            return Err(SparseError::NotBijective(format!(
                "node_count {} but {} mapped ids",
                record.node_count,
                record.new_to_old.len()
            )));
        }
        IdMap::from_ordered(record.new_to_old)
    }
}

impl From<IdMap> for IdMapRecord {
    fn from(map: IdMap) -> Self {
        Self {
            node_count: map.new_to_old.len(),
            new_to_old: map.new_to_old,
        }
    }
}

impl IdMap {
    /// Build from bipartite ids in strictly ascending order
    pub fn from_ordered(new_to_old: Vec<NodeId>) -> Result<Self, SparseError> {
        if let Some(w) = new_to_old.windows(2).find(|w| w[0] >= w[1]) {
            return Err(SparseError::NotBijective(format!(
                "bipartite ids not strictly ascending at {} → {}",
                w[0], w[1]
            )));
        }
        Ok(Self { new_to_old })
    }

    pub fn len(&self) -> usize {
        self.new_to_old.len()
    }

    pub fn is_empty(&self) -> bool {
        self.new_to_old.is_empty()
    }

    pub fn old_id(&self, new_id: u32) -> Option<NodeId> {
        self.new_to_old.get(new_id as usize).copied()
    }

    pub fn new_id(&self, old_id: NodeId) -> Option<u32> {
        self.new_to_old
            .binary_search(&old_id)
            .ok()
            .map(|i| i as u32)
    }

    /// `(new, old)` pairs in new-id order
    pub fn iter(&self) -> impl Iterator<Item = (u32, NodeId)> + '_ {
        self.new_to_old
            .iter()
            .enumerate()
            .map(|(i, &old)| (i as u32, old))
    }
}
