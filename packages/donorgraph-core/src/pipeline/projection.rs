//! ProjectionPipeline: one cycle from relational store to persisted matrices
//!
//! ```text
//! load → validate (warn) → profiles → node filter → engine → builder
//!      → persist structure + id map          (unit: year)
//!      → per metric: materialize, persist, release   (unit: year/metric)
//! ```

use std::time::Instant;

use donorgraph_storage::ContributionStore;
use tracing::{info, info_span, warn};

use crate::config::DonorgraphConfig;
use crate::errors::Result;
use crate::features::artifacts::ArtifactStore;
use crate::features::bipartite::{validate_bipartite, BipartiteLoader};
use crate::features::donor_profile::DonorProfileIndex;
use crate::features::projection::{Metric, ProjectionError, ProjectionSink, ProjectionUseCase};
use crate::features::sparse::CooSink;
use crate::shared::{StageTimer, WorkerPool};

use super::error::{PipelineError, UnitId};
use super::report::{RunReport, UnitSummary};

/// Structure persisted; matrices still in their sinks
struct ProjectedYear {
    node_count: u32,
    sinks: Vec<(Metric, ProjectionSink)>,
    summary: UnitSummary,
}

pub struct ProjectionPipeline<'c> {
    config: &'c DonorgraphConfig,
    artifacts: ArtifactStore,
    pool: WorkerPool,
}

impl<'c> ProjectionPipeline<'c> {
    pub fn new(config: &'c DonorgraphConfig) -> std::result::Result<Self, PipelineError> {
        Ok(Self {
            config,
            artifacts: ArtifactStore::new(&config.storage.data_dir),
            pool: config.parallel.build_pool()?,
        })
    }

    pub fn artifacts(&self) -> &ArtifactStore {
        &self.artifacts
    }

    /// Project one cycle held by `store`
    pub fn run_year<S>(&self, year: i64, store: &S) -> RunReport
    where
        S: ContributionStore + ?Sized,
    {
        let span = info_span!("project", year);
        let _enter = span.enter();
        let mut report = RunReport::new();

        let started = Instant::now();
        let projected = match self.project(year, store) {
            Ok(projected) => projected,
            Err(e) => {
                let unit = UnitId::year(year);
                report.record(unit, started.elapsed(), Err(PipelineError::unit(unit, e)));
                return report;
            }
        };
        report.record(UnitId::year(year), started.elapsed(), Ok(projected.summary));

        for (metric, sink) in projected.sinks {
            let unit = UnitId::metric(year, metric);
            let started = Instant::now();
            let result = self
                .persist_matrix(year, metric, sink, projected.node_count)
                .map_err(|e| PipelineError::unit(unit, e));
            report.record(unit, started.elapsed(), result);
        }
        report
    }

    /// Open each cycle database from `storage.database` and project it
    #[cfg(feature = "sqlite")]
    pub fn run_years(&self, years: &[i64]) -> RunReport {
        use donorgraph_storage::SqliteContributionStore;

        let mut report = RunReport::new();
        for &year in years {
            let path = self.config.database_path(year);
            let started = Instant::now();
            match SqliteContributionStore::open(&path, self.config.schema.clone()) {
                Ok(store) => report.merge(self.run_year(year, &store)),
                Err(e) => {
                    let unit = UnitId::year(year);
                    report.record(unit, started.elapsed(), Err(PipelineError::unit(unit, e)));
                }
            }
        }
        report
    }

    fn project<S>(&self, year: i64, store: &S) -> Result<ProjectedYear>
    where
        S: ContributionStore + ?Sized,
    {
        let mut timer = StageTimer::start(format!("project {}", year));

        let (graph, stats) = BipartiteLoader::load(store)?;
        timer.mark(format!(
            "loaded {} nodes, {} donations",
            graph.node_count(),
            stats.donations
        ));

        let validation = validate_bipartite(&graph);
        if !validation.is_valid() {
            warn!(
                "Cycle {} has {} structural issues (recipient degree: {}, donor degree: {}, non-positive amount: {})",
                year,
                validation.issue_count(),
                validation.recipient_degree.len(),
                validation.donor_degree.len(),
                validation.non_positive_amount.len()
            );
        }

        let index = DonorProfileIndex::build(&graph);
        drop(graph);
        timer.mark(format!("built {} donor profiles", index.profile_count()));

        let usecase = ProjectionUseCase::new(self.config.projection.clone(), &self.pool);
        let usecase = if self.config.projection.spill_to_disk {
            usecase.with_spill_dir(self.spill_dir()?)
        } else {
            usecase
        };
        let output = usecase.execute(&index)?;
        timer.mark(format!("scored {} pairs", output.stats.pairs));

        let node_count = output.node_count();
        let built = output.built;
        let summary = UnitSummary {
            artifacts: vec![
                self.artifacts.write_structure(year, &built.graph)?,
                self.artifacts.write_mapping(year, &built.id_map)?,
            ],
            nodes: node_count,
            edges: built.graph.edge_count(),
        };
        if summary.edges == 0 {
            warn!("Cycle {} projected to a graph without edges", year);
        }
        info!(
            "Cycle {}: {} donors, {} edges",
            year, summary.nodes, summary.edges
        );
        timer.finish();

        Ok(ProjectedYear {
            node_count,
            sinks: built.sinks,
            summary,
        })
    }

    fn persist_matrix(
        &self,
        year: i64,
        metric: Metric,
        sink: ProjectionSink,
        node_count: u32,
    ) -> Result<UnitSummary> {
        let span = info_span!("matrix", year, metric = metric.as_str());
        let _enter = span.enter();

        let matrix = sink.into_matrix(node_count).map_err(ProjectionError::from)?;
        if matrix.nnz() == 0 {
            warn!("{} matrix for {} is empty", metric, year);
        }
        let path = self.artifacts.write_matrix(year, metric, &matrix)?;
        Ok(UnitSummary {
            artifacts: vec![path],
            nodes: node_count,
            edges: matrix.nnz() / 2,
        })
    }

    fn spill_dir(&self) -> Result<std::path::PathBuf> {
        let dir = self.artifacts.root().join("spill");
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}
