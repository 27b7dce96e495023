//! Configuration
//!
//! One versioned YAML file drives every stage:
//!
//! ```yaml
//! version: 1
//! projection:
//!   min_recipients: 2
//!   metrics: [jaccard, cosine]
//!   batch_rows: 256
//! pruning:
//!   percents: [0.01, 0.05]
//!   thresholds:
//!     cosine: [0.8, 0.95]
//! parallel:
//!   num_workers: 0
//! storage:
//!   data_dir: data
//!   database: "data/{year}.sqlite"
//! ```
//!
//! Missing sections and fields take their defaults; unknown fields are errors.

pub mod error;
pub mod io;
pub mod pipeline_config;
pub mod stage_configs;

pub use error::{ConfigError, ConfigResult};
pub use io::ConfigFileV1;
pub use pipeline_config::DonorgraphConfig;
pub use stage_configs::{
    FeatureConfig, ParallelConfig, ProjectionConfig, PruningConfig, StorageConfig,
};
