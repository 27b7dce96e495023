//! Centralized defaults and tunable parameters

/// Projection defaults
pub mod projection {
    /// A donor joins the unipartite graph when it gave to strictly more
    /// distinct recipients than this
    pub const MIN_RECIPIENTS: usize = 2;

    /// Outer-loop rows handed to the worker pool per batch
    pub const BATCH_ROWS: usize = 256;

    /// Emit a progress event every N finished outer-loop rows
    pub const PROGRESS_EVERY_ROWS: usize = 100;
}

/// Pruning defaults
pub mod pruning {
    /// Fractions of the sorted entry list kept by percentile pruning
    pub const PERCENTS: [f64; 5] = [0.01, 0.05, 0.1, 0.25, 0.5];

    /// Thresholds for cosine weights
    pub const COSINE_THRESHOLDS: [f64; 3] = [0.8, 0.95, 0.99];

    /// Thresholds shared by both Jaccard variants
    pub const JACCARD_THRESHOLDS: [f64; 3] = [0.05, 0.1, 0.2];

    /// Thresholds for Adamic-Adar weights: e^-1.5, e^-1, 1
    pub fn adamic_thresholds() -> Vec<f64> {
        vec![(-1.5f64).exp(), (-1.0f64).exp(), 1.0]
    }

    /// Thresholds for weighted Adamic-Adar weights: e^6, e^8, e^9
    pub fn weighted_adamic_thresholds() -> Vec<f64> {
        vec![6.0f64.exp(), 8.0f64.exp(), 9.0f64.exp()]
    }
}

/// Donor feature defaults
pub mod features {
    pub const PAGERANK_DAMPING: f64 = 0.85;
    pub const PAGERANK_ITERATIONS: usize = 20;

    /// Party code of the Democratic party in the recipient tables
    pub const DEMOCRATIC_PARTY: i64 = 1;

    /// Component size reported for donors outside the unipartite graph
    pub const ABSENT_COMPONENT_SIZE: usize = 1;
}

/// Artifact layout under the data directory
pub mod artifacts {
    pub const MATRIX_DIR: &str = "unipartite-matrix";
    pub const GRAPH_DIR: &str = "unipartite-graph";
    pub const MAPPING_DIR: &str = "unipartite-mapping";
    pub const FEATURES_DIR: &str = "features";

    /// Placeholder replaced by the cycle year in database path templates
    pub const YEAR_PLACEHOLDER: &str = "{year}";
}
