//! Donors that make it into the unipartite graph

use tracing::{debug, warn};

use crate::features::bipartite::NodeId;
use crate::features::donor_profile::DonorProfileIndex;

/// Qualifying donors in ascending bipartite id
///
/// A donor's position in this list is its unipartite id. This ordering is
/// the one total order used for pair enumeration, matrix layout and id
/// mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifyingDonors {
    donors: Vec<NodeId>,
}

impl QualifyingDonors {
    /// Donors that gave to strictly more than `min_recipients` distinct recipients
    pub fn select(index: &DonorProfileIndex, min_recipients: usize) -> Self {
        let all = index.donor_ids();
        let donors: Vec<NodeId> = all
            .iter()
            .copied()
            .filter(|&d| {
                index
                    .profile(d)
                    .map(|p| p.recipient_count() > min_recipients)
                    .unwrap_or(false)
            })
            .collect();

        if donors.is_empty() && !all.is_empty() {
            warn!(
                "No donor gave to more than {} recipients; unipartite graph is empty",
                min_recipients
            );
        }
        debug!(
            "{} of {} donors qualify (more than {} recipients)",
            donors.len(),
            all.len(),
            min_recipients
        );
        Self { donors }
    }

    /// Explicit donor list; sorted and deduplicated
    pub fn from_ids(ids: impl IntoIterator<Item = NodeId>) -> Self {
        let mut donors: Vec<NodeId> = ids.into_iter().collect();
        donors.sort_unstable();
        donors.dedup();
        Self { donors }
    }

    pub fn len(&self) -> usize {
        self.donors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.donors.is_empty()
    }

    pub fn ids(&self) -> &[NodeId] {
        &self.donors
    }

    pub fn into_ids(self) -> Vec<NodeId> {
        self.donors
    }
}
