//! Downstream analyses over persisted artifacts: features, correlation, validation

use donorgraph_storage::ContributionStore;
use tracing::{info, info_span, warn};

use crate::config::DonorgraphConfig;
use crate::errors::Result;
use crate::features::artifacts::ArtifactStore;
use crate::features::bipartite::{validate_bipartite, BipartiteLoader, LoadStats, ValidationReport};
use crate::features::correlation::{metric_correlation, CorrelationMatrix};
use crate::features::donor_features::{extract_features, DonorFeatures, StructuralFeatures};
use crate::features::donor_profile::DonorProfileIndex;
use crate::features::projection::Metric;

pub struct AnalysisPipeline<'c> {
    config: &'c DonorgraphConfig,
    artifacts: ArtifactStore,
}

impl<'c> AnalysisPipeline<'c> {
    pub fn new(config: &'c DonorgraphConfig) -> Self {
        Self {
            config,
            artifacts: ArtifactStore::new(&config.storage.data_dir),
        }
    }

    pub fn artifacts(&self) -> &ArtifactStore {
        &self.artifacts
    }

    /// Features of every donor of `year` over the persisted graph `graph_name`,
    /// written to `features/{graph_name}.json`
    pub fn features<S>(&self, year: i64, graph_name: &str, store: &S) -> Result<Vec<DonorFeatures>>
    where
        S: ContributionStore + ?Sized,
    {
        let span = info_span!("features", year, graph = graph_name);
        let _enter = span.enter();

        let structure = self.artifacts.read_graph(graph_name)?;
        let id_map = self.artifacts.read_mapping(year)?;
        let (bipartite, _) = BipartiteLoader::load(store)?;
        let index = DonorProfileIndex::build(&bipartite);

        let structural = StructuralFeatures::compute(
            &structure,
            self.config.features.pagerank_damping,
            self.config.features.pagerank_iterations,
        );
        let features = extract_features(&bipartite, &index, &id_map, &structural);
        let path = self.artifacts.write_features(graph_name, &features)?;
        info!("Wrote {} donor features to {}", features.len(), path.display());
        Ok(features)
    }

    /// Pearson correlation between the persisted matrices of `metrics`
    ///
    /// Metrics without a persisted matrix are skipped.
    pub fn correlate(&self, year: i64, metrics: &[Metric]) -> Result<CorrelationMatrix> {
        let mut loaded = Vec::new();
        for &metric in metrics {
            if !self.artifacts.has_matrix(year, metric) {
                warn!("No {} matrix for {}; left out of the correlation", metric, year);
                continue;
            }
            loaded.push((metric, self.artifacts.read_matrix(year, metric)?));
        }
        let refs: Vec<_> = loaded.iter().map(|(m, matrix)| (*m, matrix)).collect();
        Ok(metric_correlation(&refs)?)
    }

    /// Structural checks of one cycle's bipartite graph
    pub fn validate<S>(store: &S) -> Result<(ValidationReport, LoadStats)>
    where
        S: ContributionStore + ?Sized,
    {
        let (graph, stats) = BipartiteLoader::load(store)?;
        let report = validate_bipartite(&graph);
        if report.is_valid() {
            info!("Bipartite graph of {} nodes is valid", graph.node_count());
        } else {
            warn!("Bipartite graph has {} issues", report.issue_count());
        }
        Ok((report, stats))
    }
}
