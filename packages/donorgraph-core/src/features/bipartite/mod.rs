//! Bipartite donor → recipient graph of one election cycle
//!
//! # Architecture
//!
//! ```text
//! ContributionStore (donorgraph-storage)
//!           ↓
//! infrastructure/loader (BipartiteLoader)
//!           ↓
//! domain/ (DonationGraph, immutable once built)
//!           ↓
//! infrastructure/validation (structural checks)
//! ```

pub mod domain;
pub mod infrastructure;

pub use domain::{
    Completeness, DonationEdge, DonationGraph, DonationGraphBuilder, DonorAttributes, GraphError,
    Node, NodeAttributes, NodeId, NodeRole, RecipientAttributes,
};
pub use infrastructure::{validate_bipartite, BipartiteLoader, LoadStats, ValidationReport};
