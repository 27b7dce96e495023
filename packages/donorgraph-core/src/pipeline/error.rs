//! Typed pipeline errors
//!
//! A failure is always attributed to the unit of work it aborted, so the
//! caller can retry that unit alone.

use std::fmt;
use thiserror::Error;

use crate::errors::DonorgraphError;
use crate::features::projection::Metric;

/// One independently retryable unit: a cycle, or one metric of a cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnitId {
    pub year: i64,
    pub metric: Option<Metric>,
}

impl UnitId {
    pub fn year(year: i64) -> Self {
        Self { year, metric: None }
    }

    pub fn metric(year: i64, metric: Metric) -> Self {
        Self {
            year,
            metric: Some(metric),
        }
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.metric {
            Some(metric) => write!(f, "{}/{}", self.year, metric),
            None => write!(f, "{}", self.year),
        }
    }
}

#[derive(Debug, Error)]
pub enum PipelineError {
    /// A unit of work failed; siblings are unaffected
    #[error("unit {unit} failed: {source}")]
    Unit {
        unit: UnitId,
        #[source]
        source: Box<DonorgraphError>,
    },

    #[error("failed to build worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

impl PipelineError {
    pub fn unit(unit: UnitId, source: impl Into<DonorgraphError>) -> Self {
        PipelineError::Unit {
            unit,
            source: Box::new(source.into()),
        }
    }

    pub fn unit_id(&self) -> Option<UnitId> {
        match self {
            PipelineError::Unit { unit, .. } => Some(*unit),
            PipelineError::WorkerPool(_) => None,
        }
    }
}
