//! GraphPruner
//!
//! Entries are taken in row-major order (ascending row, then column), then
//! stably sorted by descending weight. Equal weights therefore keep their
//! row-major order, and every pruned graph is reproducible.

use tracing::{debug, warn};

use crate::features::sparse::{CooMatrix, UnipartiteGraph};

use super::{PruneError, PruneSpec};

/// Nonzero entries of one matrix, heaviest first
#[derive(Debug, Clone, PartialEq)]
pub struct SortedEntries {
    n: u32,
    entries: Vec<(u32, u32, f64)>,
}

impl SortedEntries {
    pub fn from_matrix(matrix: &CooMatrix) -> Self {
        let mut entries = matrix.nonzero_row_major();
        let before = entries.len();
        entries.retain(|&(_, _, w)| !w.is_nan());
        if entries.len() < before {
            warn!("Dropped {} NaN entries before pruning", before - entries.len());
        }
        entries.sort_by(|a, b| b.2.total_cmp(&a.2));

        if entries.is_empty() {
            warn!("Matrix of {} nodes has no nonzero entries to prune", matrix.n());
        }
        Self {
            n: matrix.n(),
            entries,
        }
    }

    pub fn node_count(&self) -> u32 {
        self.n
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[(u32, u32, f64)] {
        &self.entries
    }

    /// The first `floor(len · p)` entries
    pub fn top_fraction(&self, p: f64) -> Result<&[(u32, u32, f64)], PruneError> {
        PruneSpec::Percent(p).validate()?;
        let keep = ((self.entries.len() as f64 * p) as usize).min(self.entries.len());
        Ok(&self.entries[..keep])
    }

    /// Every entry with weight ≥ `t`
    pub fn at_least(&self, t: f64) -> Result<&[(u32, u32, f64)], PruneError> {
        PruneSpec::Threshold(t).validate()?;
        let keep = self.entries.partition_point(|&(_, _, w)| w >= t);
        Ok(&self.entries[..keep])
    }

    /// Structural graph over all `n` nodes holding the kept entries
    pub fn prune(&self, spec: PruneSpec) -> Result<UnipartiteGraph, PruneError> {
        let kept = match spec {
            PruneSpec::Percent(p) => self.top_fraction(p)?,
            PruneSpec::Threshold(t) => self.at_least(t)?,
        };
        let graph = UnipartiteGraph::from_edges(self.n, kept.iter().map(|&(r, c, _)| (r, c)));
        debug!(
            "{} kept {} of {} entries ({} edges)",
            spec,
            kept.len(),
            self.entries.len(),
            graph.edge_count()
        );
        Ok(graph)
    }
}

pub fn prune_by_percent(matrix: &CooMatrix, p: f64) -> Result<UnipartiteGraph, PruneError> {
    SortedEntries::from_matrix(matrix).prune(PruneSpec::Percent(p))
}

pub fn prune_by_threshold(matrix: &CooMatrix, t: f64) -> Result<UnipartiteGraph, PruneError> {
    SortedEntries::from_matrix(matrix).prune(PruneSpec::Threshold(t))
}
