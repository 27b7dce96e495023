use serde::{Deserialize, Serialize};
use std::fmt;

use crate::features::projection::Metric;

use super::PruneError;

/// One pruning policy applied to one (year, metric) matrix
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode", content = "value")]
pub enum PruneSpec {
    /// Keep the top fraction of sorted entries, `p` in (0, 1]
    Percent(f64),
    /// Keep entries with weight ≥ `t`
    Threshold(f64),
}

impl PruneSpec {
    pub fn validate(&self) -> Result<(), PruneError> {
        match *self {
            PruneSpec::Percent(p) if !(p > 0.0 && p <= 1.0) => Err(PruneError::FractionOutOfRange(p)),
            PruneSpec::Threshold(t) if !t.is_finite() => Err(PruneError::NonFiniteThreshold(t)),
            _ => Ok(()),
        }
    }

    /// Artifact name, e.g. `1980.cosine_percent_0.05` or `1980.adamic_threshold_1`
    pub fn graph_name(&self, year: i64, metric: Metric) -> String {
        format!("{}.{}_{}", year, metric, self)
    }
}

impl fmt::Display for PruneSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PruneSpec::Percent(p) => write!(f, "percent_{}", p),
            PruneSpec::Threshold(t) => write!(f, "threshold_{}", t),
        }
    }
}
