//! Recipient → qualifying donors postings
//!
//! For row `i` the engine only needs the donors `j > i` that share at least
//! one recipient with `i`. Walking the postings of `i`'s recipients yields
//! exactly that set, so pairs with an empty overlap are never scored.

use std::collections::HashMap;

use crate::features::bipartite::NodeId;
use crate::features::donor_profile::DonorProfile;

#[derive(Debug, Clone, Default)]
pub struct Postings {
    /// Unipartite ids per recipient, ascending
    lists: HashMap<NodeId, Vec<u32>>,
}

impl Postings {
    /// `profiles[k]` is the profile of unipartite donor `k`
    pub fn build(profiles: &[&DonorProfile]) -> Self {
        let mut lists: HashMap<NodeId, Vec<u32>> = HashMap::new();
        for (new_id, profile) in profiles.iter().enumerate() {
            for stats in profile.recipients() {
                lists.entry(stats.recipient).or_default().push(new_id as u32);
            }
        }
        Self { lists }
    }

    pub fn donors_of(&self, recipient: NodeId) -> &[u32] {
        self.lists.get(&recipient).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Donors after `row` sharing a recipient with `profile`, ascending and unique
    pub fn candidates_after(&self, row: u32, profile: &DonorProfile, out: &mut Vec<u32>) {
        out.clear();
        for stats in profile.recipients() {
            let list = self.donors_of(stats.recipient);
            let start = list.partition_point(|&j| j <= row);
            out.extend_from_slice(&list[start..]);
        }
        out.sort_unstable();
        out.dedup();
    }
}
