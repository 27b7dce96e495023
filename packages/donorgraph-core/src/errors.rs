//! Error types for donorgraph-core
//!
//! Provides unified error handling across the crate.

use thiserror::Error;

use crate::config::ConfigError;
use crate::features::artifacts::ArtifactError;
use crate::features::bipartite::GraphError;
use crate::features::correlation::CorrelationError;
use crate::features::projection::ProjectionError;
use crate::features::pruning::PruneError;
use crate::pipeline::PipelineError;

/// Main error type for donorgraph-core operations
#[derive(Debug, Error)]
pub enum DonorgraphError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Relational store error
    #[error("Storage error: {0}")]
    Storage(#[from] donorgraph_storage::StorageError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Bipartite graph invariant violation
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    /// Projection contract violation
    #[error("Projection error: {0}")]
    Projection(#[from] ProjectionError),

    /// Invalid pruning request
    #[error("Pruning error: {0}")]
    Prune(#[from] PruneError),

    /// Matrices that cannot be correlated
    #[error("Correlation error: {0}")]
    Correlation(#[from] CorrelationError),

    /// Artifact persistence error
    #[error("Artifact error: {0}")]
    Artifact(#[from] ArtifactError),

    /// Pipeline unit failure
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),
}

/// Result type alias for donorgraph operations
pub type Result<T> = std::result::Result<T, DonorgraphError>;
