//! Similarity metric identifiers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ProjectionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Jaccard,
    /// Amount-weighted Jaccard
    Jaccard2,
    Affinity,
    Cosine,
    Adamic,
    WeightedAdamic,
}

impl Metric {
    pub const ALL: [Metric; 6] = [
        Metric::Jaccard,
        Metric::Jaccard2,
        Metric::Affinity,
        Metric::Cosine,
        Metric::Adamic,
        Metric::WeightedAdamic,
    ];

    /// Name used in artifact file names and configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Jaccard => "jaccard",
            Metric::Jaccard2 => "jaccard2",
            Metric::Affinity => "affinity",
            Metric::Cosine => "cosine",
            Metric::Adamic => "adamic",
            Metric::WeightedAdamic => "weighted_adamic",
        }
    }

    /// Deduplicate while keeping first-seen order
    pub fn dedup(metrics: &[Metric]) -> Vec<Metric> {
        let mut out = Vec::with_capacity(metrics.len());
        for &m in metrics {
            if !out.contains(&m) {
                out.push(m);
            }
        }
        out
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = ProjectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| ProjectionError::UnknownMetric(s.to_string()))
    }
}
