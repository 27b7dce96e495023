//! PruningPipeline: persisted matrix → every configured pruned graph

use std::time::Instant;

use tracing::{info, info_span};

use crate::config::DonorgraphConfig;
use crate::errors::Result;
use crate::features::artifacts::ArtifactStore;
use crate::features::projection::Metric;
use crate::features::pruning::SortedEntries;

use super::error::{PipelineError, UnitId};
use super::report::{RunReport, UnitSummary};

pub struct PruningPipeline<'c> {
    config: &'c DonorgraphConfig,
    artifacts: ArtifactStore,
}

impl<'c> PruningPipeline<'c> {
    pub fn new(config: &'c DonorgraphConfig) -> Self {
        Self {
            config,
            artifacts: ArtifactStore::new(&config.storage.data_dir),
        }
    }

    pub fn artifacts(&self) -> &ArtifactStore {
        &self.artifacts
    }

    /// Prune one (year, metric) matrix by every configured percent and threshold
    pub fn run(&self, year: i64, metric: Metric) -> RunReport {
        let unit = UnitId::metric(year, metric);
        let started = Instant::now();
        let result = self
            .prune(year, metric)
            .map_err(|e| PipelineError::unit(unit, e));

        let mut report = RunReport::new();
        report.record(unit, started.elapsed(), result);
        report
    }

    pub fn run_all(&self, years: &[i64], metrics: &[Metric]) -> RunReport {
        let mut report = RunReport::new();
        for &year in years {
            for &metric in metrics {
                report.merge(self.run(year, metric));
            }
        }
        report
    }

    fn prune(&self, year: i64, metric: Metric) -> Result<UnitSummary> {
        let span = info_span!("prune", year, metric = metric.as_str());
        let _enter = span.enter();

        // sorted once, every spec reads a prefix
        let sorted = {
            let matrix = self.artifacts.read_matrix(year, metric)?;
            SortedEntries::from_matrix(&matrix)
        };

        let specs = self.config.pruning.specs_for(metric);
        let mut summary = UnitSummary {
            nodes: sorted.node_count(),
            ..UnitSummary::default()
        };
        for spec in specs {
            let graph = sorted.prune(spec)?;
            summary.edges += graph.edge_count();
            summary
                .artifacts
                .push(self.artifacts.write_pruned(year, metric, spec, &graph)?);
        }

        info!(
            "Pruned {} {} entries into {} graphs",
            sorted.len(),
            metric,
            summary.artifacts.len()
        );
        Ok(summary)
    }
}
