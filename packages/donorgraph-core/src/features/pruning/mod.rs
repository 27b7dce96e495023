//! Graph pruning: weighted adjacency matrix → reduced structural graph
//!
//! ```text
//! pruning/
//! ├── spec.rs    # PruneSpec (percent | threshold) + output naming
//! └── pruner.rs  # SortedEntries, prune_by_percent, prune_by_threshold
//! ```
//!
//! The source matrix is sorted once; every percent and threshold graph is a
//! prefix of that sorted list.

pub mod pruner;
pub mod spec;

pub use pruner::{prune_by_percent, prune_by_threshold, SortedEntries};
pub use spec::PruneSpec;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PruneError {
    #[error("percent {0} outside (0, 1]")]
    FractionOutOfRange(f64),

    #[error("threshold {0} is not finite")]
    NonFiniteThreshold(f64),
}
