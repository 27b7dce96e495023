//! Per-donor features over a unipartite structure
//!
//! ```text
//! donor_features/
//! ├── structural.rs  # degree, component size, PageRank (petgraph)
//! └── extractor.rs   # DonorFeatures per bipartite donor
//! ```

pub mod extractor;
pub mod structural;

pub use extractor::{extract_features, DonorFeatures};
pub use structural::StructuralFeatures;
