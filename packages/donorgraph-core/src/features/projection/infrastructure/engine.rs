//! SimilarityEngine: enumerates donor pairs and scores them
//!
//! # Enumeration
//!
//! ```text
//! for i in 0..N            (rows, batched across the worker pool)
//!   for j in i+1..N        (only j sharing a recipient with i, via postings)
//!     overlap(i, j)        (computed once per pair)
//!     score every metric
//! ```
//!
//! Rows of one batch are scored in parallel and emitted in row order, so
//! memory holds at most one batch of pairs and the output order never depends
//! on the thread count.

use tracing::debug;

use crate::features::donor_profile::{DonorProfile, DonorProfileIndex};
use crate::features::projection::domain::{
    score, Metric, Overlap, ProjectionError, QualifyingDonors, ScoringContext, SimilarityPair,
};
use crate::shared::constants::projection::PROGRESS_EVERY_ROWS;
use crate::shared::WorkerPool;

use super::postings::Postings;

/// Counters of one enumeration run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineStats {
    pub rows: u32,
    pub pairs: u64,
}

pub struct SimilarityEngine<'a> {
    /// `profiles[k]` belongs to unipartite donor `k`
    profiles: Vec<&'a DonorProfile>,
    metrics: Vec<Metric>,
    ctx: ScoringContext<'a>,
    postings: Postings,
}

impl<'a> SimilarityEngine<'a> {
    /// Resolve every qualifying donor's profile up front
    ///
    /// A donor without a profile is a contract violation and fails here,
    /// before any pair is scored.
    pub fn new(
        index: &'a DonorProfileIndex,
        donors: &QualifyingDonors,
        metrics: &[Metric],
    ) -> Result<Self, ProjectionError> {
        let metrics = Metric::dedup(metrics);
        if metrics.is_empty() {
            return Err(ProjectionError::NoMetrics);
        }

        let profiles = donors
            .ids()
            .iter()
            .map(|&donor| {
                index
                    .profile(donor)
                    .ok_or(ProjectionError::MissingProfile { donor })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let postings = Postings::build(&profiles);
        Ok(Self {
            profiles,
            metrics,
            ctx: ScoringContext {
                totals: index.recipient_totals(),
                profile_count: index.profile_count(),
            },
            postings,
        })
    }

    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    pub fn node_count(&self) -> u32 {
        self.profiles.len() as u32
    }

    /// Score one pair; `None` for a self-pair, an out-of-range id or an empty overlap
    pub fn score_pair(&self, i: u32, j: u32) -> Option<SimilarityPair> {
        if i == j {
            return None;
        }
        let (a, b) = (*self.profiles.get(i as usize)?, *self.profiles.get(j as usize)?);
        let overlap = Overlap::between(a, b);
        if overlap.is_empty() {
            return None;
        }
        Some(SimilarityPair::new(i, j, self.scores(a, b, &overlap)))
    }

    /// Every pair `(i, j)` with `j > i` and a nonempty overlap, ascending `j`
    pub fn row(&self, i: u32) -> Vec<SimilarityPair> {
        let Some(&a) = self.profiles.get(i as usize) else {
            return Vec::new();
        };

        let mut candidates = Vec::new();
        self.postings.candidates_after(i, a, &mut candidates);

        let mut overlap = Overlap::default();
        let mut pairs = Vec::with_capacity(candidates.len());
        for j in candidates {
            let b = self.profiles[j as usize];
            overlap.fill(a, b);
            if overlap.is_empty() {
                continue;
            }
            pairs.push(SimilarityPair::new(i, j, self.scores(a, b, &overlap)));
        }
        pairs
    }

    /// Stream every pair to `emit` in row-major order
    pub fn for_each_pair<F, E>(
        &self,
        pool: &WorkerPool,
        batch_rows: usize,
        mut emit: F,
    ) -> Result<EngineStats, E>
    where
        F: FnMut(&SimilarityPair) -> Result<(), E>,
    {
        let n = self.node_count();
        let batch = batch_rows.max(1) as u32;
        let mut stats = EngineStats::default();
        let mut next_progress = PROGRESS_EVERY_ROWS as u32;

        let mut start = 0u32;
        while start < n {
            let end = start.saturating_add(batch).min(n);
            let rows = pool.map_range(start..end, |i| self.row(i));
            for pair in rows.iter().flatten() {
                emit(pair)?;
                stats.pairs += 1;
            }
            stats.rows = end;
            if end >= next_progress {
                debug!(
                    "Finished {} outer rows out of {} ({} pairs)",
                    end, n, stats.pairs
                );
                next_progress = (end / PROGRESS_EVERY_ROWS as u32 + 1) * PROGRESS_EVERY_ROWS as u32;
            }
            start = end;
        }

        Ok(stats)
    }

    /// All pairs, materialized (small inputs and tests)
    pub fn pairs(&self) -> Vec<SimilarityPair> {
        (0..self.node_count()).flat_map(|i| self.row(i)).collect()
    }

    fn scores(&self, a: &DonorProfile, b: &DonorProfile, overlap: &Overlap) -> Vec<f64> {
        self.metrics
            .iter()
            .map(|&m| score(m, a, b, overlap, &self.ctx))
            .collect()
    }
}
