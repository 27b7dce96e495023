//! DonorFeatures: profile aggregates joined with unipartite structure

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::features::bipartite::{DonationGraph, NodeId};
use crate::features::donor_profile::{DonorProfile, DonorProfileIndex};
use crate::features::sparse::IdMap;
use crate::shared::constants::features::{ABSENT_COMPONENT_SIZE, DEMOCRATIC_PARTY};

use super::structural::StructuralFeatures;

/// Features of one bipartite donor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonorFeatures {
    pub donor: NodeId,
    pub contributor_id: Option<i64>,
    pub total_amount: i64,
    pub recipient_count: usize,
    /// Share of the total amount given to Democratic recipients
    pub democratic_share: Option<f64>,
    pub degree: u32,
    pub component_size: usize,
    pub pagerank: f64,
}

/// One record per donor profile, ascending bipartite id
///
/// Donors outside the unipartite graph get degree 0, component size 1 and
/// PageRank 0.
pub fn extract_features(
    bipartite: &DonationGraph,
    index: &DonorProfileIndex,
    id_map: &IdMap,
    structure: &StructuralFeatures,
) -> Vec<DonorFeatures> {
    let mut out = Vec::with_capacity(index.profile_count());
    let mut in_graph = 0usize;

    for donor in index.donor_ids() {
        let Some(profile) = index.profile(donor) else {
            continue;
        };

        let position = id_map
            .new_id(donor)
            .map(|id| id as usize)
            .filter(|&id| id < structure.len());
        let (degree, component_size, pagerank) = match position {
            Some(id) => {
                in_graph += 1;
                (
                    structure.degree[id],
                    structure.component_size[id],
                    structure.pagerank.get(id).copied().unwrap_or(0.0),
                )
            }
            None => (0, ABSENT_COMPONENT_SIZE, 0.0),
        };

        out.push(DonorFeatures {
            donor,
            contributor_id: bipartite
                .node(donor)
                .and_then(|n| n.as_donor())
                .map(|d| d.contributor_id),
            total_amount: profile.total_amount,
            recipient_count: profile.recipient_count(),
            democratic_share: democratic_share(bipartite, profile),
            degree,
            component_size,
            pagerank,
        });
    }

    debug!(
        "Extracted features for {} donors ({} in the unipartite graph)",
        out.len(),
        in_graph
    );
    out
}

fn democratic_share(bipartite: &DonationGraph, profile: &DonorProfile) -> Option<f64> {
    if profile.total_amount == 0 {
        return None;
    }
    let democratic: i64 = profile
        .recipients()
        .iter()
        .filter(|stats| {
            bipartite
                .node(stats.recipient)
                .and_then(|n| n.as_recipient())
                .and_then(|r| r.party)
                == Some(DEMOCRATIC_PARTY)
        })
        .map(|stats| stats.amount)
        .sum();
    Some(democratic as f64 / profile.total_amount as f64)
}
