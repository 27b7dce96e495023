//! Bipartite → unipartite donor projection
//!
//! ## Architecture
//! - Domain: metrics, overlap + formulas, qualifying node set
//! - Infrastructure: postings-driven pair enumeration on the worker pool
//! - Application: node set → engine → sparse builder wiring
//!
//! ```text
//! DonorProfileIndex ──► QualifyingDonors ──► SimilarityEngine ──► SparseGraphBuilder
//!                                             (row batches)        (one sink per metric)
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::{ProjectionOutput, ProjectionSink, ProjectionUseCase};
pub use domain::{
    score, Metric, Overlap, ProjectionError, QualifyingDonors, ScoringContext, SharedRecipient,
    SimilarityPair,
};
pub use infrastructure::{EngineStats, SimilarityEngine};
