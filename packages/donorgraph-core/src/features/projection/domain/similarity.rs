//! Similarity metrics over two donor profiles
//!
//! With `S` the shared recipients and `U` the union:
//!
//! ```text
//! jaccard         = |S| / |U|
//! jaccard2        = Σ_S min(amt_a, amt_b) / (total_a + total_b)        0 if denominator is 0
//! affinity        = ⌊|S| · profiles / (|A| + |B|)⌋                      integer quotient
//! cosine          = Σ_S amt_a · amt_b / (‖amt_a‖₂ · ‖amt_b‖₂)           0 if a norm is 0
//! adamic          = Σ_S 1 / log10(received)                             terms with received ≤ 1 skipped
//! weighted_adamic = Σ_S (amt_a + amt_b) / (1 + log10(received))         terms with received ≤ 0 skipped
//! ```
//!
//! `affinity` normalizes by the number of donor profiles in scope, not by a
//! pair-local quantity, and keeps only the integer part of the quotient. Sums run in ascending recipient order so repeated runs
//! are bit-identical.

use crate::features::bipartite::NodeId;
use crate::features::donor_profile::{DonorProfile, RecipientTotals};

use super::metric::Metric;

/// A recipient both donors gave to, with each donor's aggregated amount
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SharedRecipient {
    pub recipient: NodeId,
    pub amount_a: i64,
    pub amount_b: i64,
}

/// Shared-recipient set of a pair, computed once and reused by every metric
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overlap {
    pub shared: Vec<SharedRecipient>,
    pub union_len: usize,
}

impl Overlap {
    pub fn is_empty(&self) -> bool {
        self.shared.is_empty()
    }

    /// Merge-intersect the sorted recipient lists of two profiles
    pub fn between(a: &DonorProfile, b: &DonorProfile) -> Self {
        let mut overlap = Self::default();
        overlap.fill(a, b);
        overlap
    }

    /// Recompute in place, reusing the allocation
    pub fn fill(&mut self, a: &DonorProfile, b: &DonorProfile) {
        self.shared.clear();
        let (ra, rb) = (a.recipients(), b.recipients());
        let (mut i, mut j) = (0, 0);
        while i < ra.len() && j < rb.len() {
            match ra[i].recipient.cmp(&rb[j].recipient) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    self.shared.push(SharedRecipient {
                        recipient: ra[i].recipient,
                        amount_a: ra[i].amount,
                        amount_b: rb[j].amount,
                    });
                    i += 1;
                    j += 1;
                }
            }
        }
        self.union_len = ra.len() + rb.len() - self.shared.len();
    }
}

/// Cycle-wide inputs shared by every pair
#[derive(Debug, Clone, Copy)]
pub struct ScoringContext<'a> {
    pub totals: &'a RecipientTotals,
    /// Number of donor profiles in scope (affinity normalizer)
    pub profile_count: usize,
}

/// Score one metric for a pair whose overlap is already known
pub fn score(
    metric: Metric,
    a: &DonorProfile,
    b: &DonorProfile,
    overlap: &Overlap,
    ctx: &ScoringContext<'_>,
) -> f64 {
    match metric {
        Metric::Jaccard => jaccard(overlap.shared.len(), overlap.union_len),
        Metric::Jaccard2 => jaccard_weighted(&overlap.shared, a.total_amount, b.total_amount),
        Metric::Affinity => affinity(
            overlap.shared.len(),
            ctx.profile_count,
            a.recipient_count(),
            b.recipient_count(),
        ),
        Metric::Cosine => cosine(&overlap.shared, a.amount_norm(), b.amount_norm()),
        Metric::Adamic => adamic(&overlap.shared, ctx.totals),
        Metric::WeightedAdamic => weighted_adamic(&overlap.shared, ctx.totals),
    }
}

pub fn jaccard(shared_len: usize, union_len: usize) -> f64 {
    if union_len == 0 {
        return 0.0;
    }
    shared_len as f64 / union_len as f64
}

pub fn jaccard_weighted(shared: &[SharedRecipient], total_a: i64, total_b: i64) -> f64 {
    let denom = total_a + total_b;
    if denom == 0 {
        return 0.0;
    }
    let intersection: i64 = shared.iter().map(|s| s.amount_a.min(s.amount_b)).sum();
    intersection as f64 / denom as f64
}

pub fn affinity(shared_len: usize, profile_count: usize, len_a: usize, len_b: usize) -> f64 {
    let denom = len_a + len_b;
    if denom == 0 {
        return 0.0;
    }
    ((shared_len * profile_count) / denom) as f64
}

pub fn cosine(shared: &[SharedRecipient], norm_a: f64, norm_b: f64) -> f64 {
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    let dot: f64 = shared
        .iter()
        .map(|s| s.amount_a as f64 * s.amount_b as f64)
        .sum();
    dot / (norm_a * norm_b)
}

pub fn adamic(shared: &[SharedRecipient], totals: &RecipientTotals) -> f64 {
    shared
        .iter()
        .map(|s| totals.get(s.recipient))
        .filter(|&received| received > 1)
        .map(|received| 1.0 / (received as f64).log10())
        .sum()
}

pub fn weighted_adamic(shared: &[SharedRecipient], totals: &RecipientTotals) -> f64 {
    shared
        .iter()
        .filter_map(|s| {
            let received = totals.get(s.recipient);
            (received > 0).then(|| {
                (s.amount_a + s.amount_b) as f64 / (1.0 + (received as f64).log10())
            })
        })
        .sum()
}
