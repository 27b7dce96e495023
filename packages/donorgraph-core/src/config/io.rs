//! Configuration I/O
//!
//! Defines the YAML schema. Loading and export live in pipeline_config.rs.

use donorgraph_storage::SchemaConfig;
use serde::{Deserialize, Serialize};

use super::stage_configs::*;

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFileV1 {
    /// Schema version (always 1 for v1)
    pub version: Option<u32>,

    #[serde(default)]
    pub projection: ProjectionConfig,

    #[serde(default)]
    pub pruning: PruningConfig,

    #[serde(default)]
    pub parallel: ParallelConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub schema: SchemaConfig,

    #[serde(default)]
    pub features: FeatureConfig,
}
