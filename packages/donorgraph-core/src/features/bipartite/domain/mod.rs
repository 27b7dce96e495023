//! Bipartite Donation Graph Domain
//!
//! ```text
//! domain/
//! ├── node.rs   # Node, typed attributes per role, completeness
//! ├── edge.rs   # DonationEdge (signed amount + transaction metadata)
//! └── graph.rs  # DonationGraph, DonationGraphBuilder, GraphError
//! ```

pub mod edge;
pub mod graph;
pub mod node;

pub use edge::DonationEdge;
pub use graph::{DonationGraph, DonationGraphBuilder, GraphError};
pub use node::{
    Completeness, DonorAttributes, Node, NodeAttributes, NodeId, NodeRole, RecipientAttributes,
};
