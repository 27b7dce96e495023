//! Projection Infrastructure
//!
//! ```text
//! infrastructure/
//! ├── postings.rs  # recipient → donor lists (candidate generation)
//! └── engine.rs    # SimilarityEngine (batched, parallel rows)
//! ```

pub mod engine;
pub mod postings;

pub use engine::{EngineStats, SimilarityEngine};
pub use postings::Postings;
