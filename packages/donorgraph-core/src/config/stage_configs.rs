//! Per-stage configuration sections
//!
//! Every section deserializes with defaults for missing fields and validates
//! its own ranges.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::features::projection::Metric;
use crate::features::pruning::PruneSpec;
use crate::shared::constants::{features, projection, pruning};
use crate::shared::WorkerPool;

use super::error::{ConfigError, ConfigResult};

// ============================================================================
// Projection
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectionConfig {
    /// A donor qualifies when it gave to strictly more distinct recipients (0..=10000)
    pub min_recipients: usize,

    /// Metrics to compute, at least one
    pub metrics: Vec<Metric>,

    /// Outer-loop rows per parallel batch (1..=100000)
    pub batch_rows: usize,

    /// Stream coordinate entries to temp files instead of memory
    pub spill_to_disk: bool,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            min_recipients: projection::MIN_RECIPIENTS,
            metrics: Metric::ALL.to_vec(),
            batch_rows: projection::BATCH_ROWS,
            spill_to_disk: false,
        }
    }
}

impl ProjectionConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.min_recipients > 10_000 {
            return Err(ConfigError::range_with_hint(
                "projection.min_recipients",
                self.min_recipients,
                0,
                10_000,
                "No donor gives to that many recipients; the graph would be empty",
            ));
        }

        if self.metrics.is_empty() {
            return Err(ConfigError::Validation(
                "projection.metrics must name at least one metric".into(),
            ));
        }

        if self.batch_rows < 1 || self.batch_rows > 100_000 {
            return Err(ConfigError::range_with_hint(
                "projection.batch_rows",
                self.batch_rows,
                1,
                100_000,
                "Larger batches hold more scored pairs in memory at once",
            ));
        }

        Ok(())
    }
}

// ============================================================================
// Pruning
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PruningConfig {
    /// Fractions of sorted entries to keep, each in (0, 1]
    pub percents: Vec<f64>,

    /// Weight thresholds per metric; a metric without an entry gets none
    pub thresholds: BTreeMap<Metric, Vec<f64>>,
}

impl Default for PruningConfig {
    fn default() -> Self {
        let mut thresholds = BTreeMap::new();
        thresholds.insert(Metric::Adamic, pruning::adamic_thresholds());
        thresholds.insert(Metric::Cosine, pruning::COSINE_THRESHOLDS.to_vec());
        thresholds.insert(Metric::Jaccard, pruning::JACCARD_THRESHOLDS.to_vec());
        thresholds.insert(Metric::Jaccard2, pruning::JACCARD_THRESHOLDS.to_vec());
        thresholds.insert(Metric::WeightedAdamic, pruning::weighted_adamic_thresholds());

        Self {
            percents: pruning::PERCENTS.to_vec(),
            thresholds,
        }
    }
}

impl PruningConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        for &p in &self.percents {
            if PruneSpec::Percent(p).validate().is_err() {
                return Err(ConfigError::range_with_hint(
                    "pruning.percents",
                    p,
                    "0 (exclusive)",
                    1,
                    "Percents are fractions of the sorted entry list",
                ));
            }
        }

        for (metric, thresholds) in &self.thresholds {
            if let Some(t) = thresholds.iter().find(|t| !t.is_finite()) {
                return Err(ConfigError::Validation(format!(
                    "pruning.thresholds.{}: {} is not a finite weight",
                    metric, t
                )));
            }
        }

        Ok(())
    }

    /// Every percent spec followed by the metric's threshold specs
    pub fn specs_for(&self, metric: Metric) -> Vec<PruneSpec> {
        let thresholds = self.thresholds.get(&metric).map(Vec::as_slice).unwrap_or(&[]);
        self.percents
            .iter()
            .map(|&p| PruneSpec::Percent(p))
            .chain(thresholds.iter().map(|&t| PruneSpec::Threshold(t)))
            .collect()
    }
}

// ============================================================================
// Parallel
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParallelConfig {
    /// Number of workers (0=auto, 1..=256)
    pub num_workers: usize,

    /// Enable Rayon parallel iterator
    pub enable_rayon: bool,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            num_workers: 0,
            enable_rayon: true,
        }
    }
}

impl ParallelConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.num_workers > 256 {
            return Err(ConfigError::range_with_hint(
                "parallel.num_workers",
                self.num_workers,
                0,
                256,
                "Number of workers must be reasonable (0=auto)",
            ));
        }
        Ok(())
    }

    pub fn build_pool(&self) -> Result<WorkerPool, rayon::ThreadPoolBuildError> {
        WorkerPool::new(self.num_workers, self.enable_rayon)
    }
}

// ============================================================================
// Storage
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    /// Root of the artifact tree
    pub data_dir: PathBuf,

    /// Cycle database path; `{year}` is replaced by the cycle year
    pub database: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            database: "data/{year}.sqlite".into(),
        }
    }
}

impl StorageConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.database.trim().is_empty() {
            return Err(ConfigError::Validation(
                "storage.database must not be empty".into(),
            ));
        }
        if self.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "storage.data_dir must not be empty".into(),
            ));
        }
        Ok(())
    }

    pub fn database_path(&self, year: i64) -> PathBuf {
        PathBuf::from(
            self.database
                .replace(crate::shared::constants::artifacts::YEAR_PLACEHOLDER, &year.to_string()),
        )
    }
}

// ============================================================================
// Donor features
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FeatureConfig {
    /// PageRank damping factor (0.0..=1.0)
    pub pagerank_damping: f64,

    /// PageRank power iterations (1..=1000)
    pub pagerank_iterations: usize,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            pagerank_damping: features::PAGERANK_DAMPING,
            pagerank_iterations: features::PAGERANK_ITERATIONS,
        }
    }
}

impl FeatureConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if !(0.0..=1.0).contains(&self.pagerank_damping) {
            return Err(ConfigError::range_with_hint(
                "features.pagerank_damping",
                self.pagerank_damping,
                0.0,
                1.0,
                "Damping is a probability",
            ));
        }
        if self.pagerank_iterations < 1 || self.pagerank_iterations > 1000 {
            return Err(ConfigError::range_with_hint(
                "features.pagerank_iterations",
                self.pagerank_iterations,
                1,
                1000,
                "Use 20-100 iterations",
            ));
        }
        Ok(())
    }
}
