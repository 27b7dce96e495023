//! Bipartite graph adapters: relational loading and structural validation

pub mod loader;
pub mod validation;

pub use loader::{BipartiteLoader, LoadStats};
pub use validation::{validate_bipartite, ValidationReport};
