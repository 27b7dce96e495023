//! Per-unit outcomes of a pipeline run

use std::path::PathBuf;
use std::time::Duration;

use tracing::{info, warn};

use super::error::{PipelineError, UnitId};

/// What a successful unit produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnitSummary {
    pub artifacts: Vec<PathBuf>,
    pub nodes: u32,
    pub edges: usize,
}

#[derive(Debug)]
pub struct UnitOutcome {
    pub unit: UnitId,
    pub elapsed: Duration,
    pub result: Result<UnitSummary, PipelineError>,
}

impl UnitOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Outcomes in execution order
#[derive(Debug, Default)]
pub struct RunReport {
    outcomes: Vec<UnitOutcome>,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, unit: UnitId, elapsed: Duration, result: Result<UnitSummary, PipelineError>) {
        match &result {
            Ok(summary) => info!(
                "{}: ok in {}ms ({} artifacts)",
                unit,
                elapsed.as_millis(),
                summary.artifacts.len()
            ),
            Err(e) => warn!("{}: {}", unit, e),
        }
        self.outcomes.push(UnitOutcome {
            unit,
            elapsed,
            result,
        });
    }

    pub fn merge(&mut self, other: RunReport) {
        self.outcomes.extend(other.outcomes);
    }

    pub fn outcomes(&self) -> &[UnitOutcome] {
        &self.outcomes
    }

    pub fn outcome(&self, unit: UnitId) -> Option<&UnitOutcome> {
        self.outcomes.iter().find(|o| o.unit == unit)
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_ok()).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &UnitOutcome> {
        self.outcomes.iter().filter(|o| !o.is_ok())
    }

    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(UnitOutcome::is_ok)
    }

    pub fn total_elapsed(&self) -> Duration {
        self.outcomes.iter().map(|o| o.elapsed).sum()
    }
}
