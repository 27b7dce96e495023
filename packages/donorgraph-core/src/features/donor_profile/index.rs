//! DonorProfileIndex and RecipientTotals

use std::collections::{BTreeMap, HashMap};
use tracing::debug;

use crate::features::bipartite::{DonationEdge, DonationGraph, NodeId};

/// Aggregated donations of one donor to one recipient
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecipientStats {
    pub recipient: NodeId,
    pub donations: u64,
    pub amount: i64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DonorProfile {
    pub donation_count: u64,
    /// Sum of all amounts, refunds included
    pub total_amount: i64,
    /// Sorted by recipient id, one entry per distinct recipient
    recipients: Vec<RecipientStats>,
    /// L2 norm of the per-recipient amount vector
    amount_norm: f64,
}

impl DonorProfile {
    fn from_stats(stats: BTreeMap<NodeId, (u64, i64)>) -> Self {
        let recipients: Vec<RecipientStats> = stats
            .into_iter()
            .map(|(recipient, (donations, amount))| RecipientStats {
                recipient,
                donations,
                amount,
            })
            .collect();

        let donation_count = recipients.iter().map(|r| r.donations).sum();
        let total_amount = recipients.iter().map(|r| r.amount).sum();
        let amount_norm = recipients
            .iter()
            .map(|r| (r.amount as f64) * (r.amount as f64))
            .sum::<f64>()
            .sqrt();

        Self {
            donation_count,
            total_amount,
            recipients,
            amount_norm,
        }
    }

    pub fn recipients(&self) -> &[RecipientStats] {
        &self.recipients
    }

    pub fn recipient_count(&self) -> usize {
        self.recipients.len()
    }

    fn stats_for(&self, recipient: NodeId) -> Option<&RecipientStats> {
        self.recipients
            .binary_search_by_key(&recipient, |r| r.recipient)
            .ok()
            .map(|i| &self.recipients[i])
    }

    pub fn gave_to(&self, recipient: NodeId) -> bool {
        self.stats_for(recipient).is_some()
    }

    pub fn transaction_count(&self, recipient: NodeId) -> u64 {
        self.stats_for(recipient).map(|s| s.donations).unwrap_or(0)
    }

    pub fn amount_to(&self, recipient: NodeId) -> i64 {
        self.stats_for(recipient).map(|s| s.amount).unwrap_or(0)
    }

    pub fn amount_norm(&self) -> f64 {
        self.amount_norm
    }
}

/// Total amount received per recipient across all donors
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipientTotals {
    totals: HashMap<NodeId, i64>,
}

impl RecipientTotals {
    pub fn get(&self, recipient: NodeId) -> i64 {
        self.totals.get(&recipient).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}

/// Donor profiles of one cycle plus recipient totals
///
/// Lookups of unknown ids return zero or empty values; only
/// [`DonorProfileIndex::profile`] reports absence.
#[derive(Debug, Clone, Default)]
pub struct DonorProfileIndex {
    profiles: HashMap<NodeId, DonorProfile>,
    totals: RecipientTotals,
}

impl DonorProfileIndex {
    /// One profile per donor node of the graph, including donors without edges
    pub fn build(graph: &DonationGraph) -> Self {
        let index = Self::from_edges(graph.donors().map(|n| n.id), graph.edges());
        debug!(
            "Built {} donor profiles over {} recipients",
            index.profile_count(),
            index.totals.len()
        );
        index
    }

    pub fn from_edges<'a, D, E>(donors: D, edges: E) -> Self
    where
        D: IntoIterator<Item = NodeId>,
        E: IntoIterator<Item = &'a DonationEdge>,
    {
        let mut stats: HashMap<NodeId, BTreeMap<NodeId, (u64, i64)>> =
            donors.into_iter().map(|d| (d, BTreeMap::new())).collect();
        let mut totals: HashMap<NodeId, i64> = HashMap::new();

        for edge in edges {
            let entry = stats
                .entry(edge.donor)
                .or_default()
                .entry(edge.recipient)
                .or_insert((0, 0));
            entry.0 += 1;
            entry.1 += edge.amount;
            *totals.entry(edge.recipient).or_insert(0) += edge.amount;
        }

        let profiles = stats
            .into_iter()
            .map(|(donor, per_recipient)| (donor, DonorProfile::from_stats(per_recipient)))
            .collect();

        Self {
            profiles,
            totals: RecipientTotals { totals },
        }
    }

    pub fn profile(&self, donor: NodeId) -> Option<&DonorProfile> {
        self.profiles.get(&donor)
    }

    /// Number of donor profiles in scope
    pub fn profile_count(&self) -> usize {
        self.profiles.len()
    }

    /// Donor ids in ascending order
    pub fn donor_ids(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.profiles.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn recipient_totals(&self) -> &RecipientTotals {
        &self.totals
    }

    pub fn donation_count(&self, donor: NodeId) -> u64 {
        self.profile(donor).map(|p| p.donation_count).unwrap_or(0)
    }

    pub fn total_amount(&self, donor: NodeId) -> i64 {
        self.profile(donor).map(|p| p.total_amount).unwrap_or(0)
    }

    pub fn recipients_of(&self, donor: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.profile(donor)
            .map(|p| p.recipients())
            .unwrap_or(&[])
            .iter()
            .map(|r| r.recipient)
    }

    pub fn transaction_count(&self, donor: NodeId, recipient: NodeId) -> u64 {
        self.profile(donor)
            .map(|p| p.transaction_count(recipient))
            .unwrap_or(0)
    }

    pub fn amount_between(&self, donor: NodeId, recipient: NodeId) -> i64 {
        self.profile(donor).map(|p| p.amount_to(recipient)).unwrap_or(0)
    }

    pub fn total_received(&self, recipient: NodeId) -> i64 {
        self.totals.get(recipient)
    }
}
