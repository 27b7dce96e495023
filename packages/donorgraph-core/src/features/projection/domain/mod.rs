//! Projection Domain
//!
//! ```text
//! domain/
//! ├── metric.rs      # Metric identifiers
//! ├── similarity.rs  # Overlap + metric formulas
//! ├── pair.rs        # SimilarityPair
//! └── node_set.rs    # QualifyingDonors (unipartite node order)
//! ```

pub mod metric;
pub mod node_set;
pub mod pair;
pub mod similarity;

pub use metric::Metric;
pub use node_set::QualifyingDonors;
pub use pair::SimilarityPair;
pub use similarity::{score, Overlap, ScoringContext, SharedRecipient};

use thiserror::Error;

use crate::features::bipartite::NodeId;
use crate::features::sparse::SparseError;

#[derive(Debug, Error)]
pub enum ProjectionError {
    /// The node set names a donor the profile index does not know
    #[error("donor {donor} has no profile; node set and profile index are out of sync")]
    MissingProfile { donor: NodeId },

    #[error("no similarity metric requested")]
    NoMetrics,

    #[error("unknown metric '{0}'")]
    UnknownMetric(String),

    #[error("sparse output: {0}")]
    Sparse(#[from] SparseError),
}
