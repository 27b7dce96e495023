//! DonorgraphConfig: the validated configuration of a run

use donorgraph_storage::SchemaConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::error::{ConfigError, ConfigResult};
use super::io::ConfigFileV1;
use super::stage_configs::*;

const SUPPORTED_VERSIONS: [u32; 1] = [1];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DonorgraphConfig {
    pub projection: ProjectionConfig,
    pub pruning: PruningConfig,
    pub parallel: ParallelConfig,
    pub storage: StorageConfig,
    pub schema: SchemaConfig,
    pub features: FeatureConfig,
}

impl DonorgraphConfig {
    /// Load and validate a YAML v1 file
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&content)?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let file: ConfigFileV1 = serde_yaml::from_str(content)?;

        // Version check
        let version = file.version.ok_or(ConfigError::MissingVersion)?;
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(ConfigError::UnsupportedVersion {
                found: version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let config = Self {
            projection: file.projection,
            pruning: file.pruning,
            parallel: file.parallel,
            storage: file.storage,
            schema: file.schema,
            features: file.features,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> ConfigResult<String> {
        let file = ConfigFileV1 {
            version: Some(1),
            projection: self.projection.clone(),
            pruning: self.pruning.clone(),
            parallel: self.parallel.clone(),
            storage: self.storage.clone(),
            schema: self.schema.clone(),
            features: self.features.clone(),
        };
        Ok(serde_yaml::to_string(&file)?)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        self.projection.validate()?;
        self.pruning.validate()?;
        self.parallel.validate()?;
        self.storage.validate()?;
        self.features.validate()?;
        self.schema
            .validate()
            .map_err(|e| ConfigError::Validation(format!("schema: {}", e)))?;
        Ok(())
    }

    /// Database of one election cycle
    pub fn database_path(&self, year: i64) -> PathBuf {
        self.storage.database_path(year)
    }
}
