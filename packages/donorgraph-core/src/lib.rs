//! donorgraph-core: donor similarity graphs from campaign contributions
//!
//! Projects the bipartite donor → recipient donation graph of an election
//! cycle onto donors, weighting each donor pair under six similarity
//! metrics, then prunes the weighted graphs for downstream features.
//!
//! ## Module Structure
//!
//! ```text
//! donorgraph-core/
//! ├── features/      # Vertical slices (bipartite, projection, pruning, ...)
//! ├── config/        # YAML v1 configuration + stage sections
//! ├── pipeline/      # Per-unit orchestration and run reports
//! ├── shared/        # Worker pool, stage timer, constants
//! └── errors.rs      # DonorgraphError
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use donorgraph_core::config::DonorgraphConfig;
//! use donorgraph_core::pipeline::{ProjectionPipeline, PruningPipeline};
//!
//! let config = DonorgraphConfig::from_yaml("donorgraph.yaml")?;
//! let report = ProjectionPipeline::new(&config)?.run_years(&[1980, 1982]);
//! let pruned = PruningPipeline::new(&config).run_all(&[1980, 1982], &config.projection.metrics);
//! ```

pub mod config;
pub mod errors;
pub mod features;
pub mod pipeline;
pub mod shared;

pub use errors::{DonorgraphError, Result};

pub use features::bipartite::{DonationGraph, DonationGraphBuilder, NodeId};
pub use features::donor_profile::{DonorProfile, DonorProfileIndex};
pub use features::projection::{Metric, SimilarityEngine, SimilarityPair};
pub use features::pruning::{PruneSpec, SortedEntries};
pub use features::sparse::{CooMatrix, IdMap, UnipartiteGraph};
