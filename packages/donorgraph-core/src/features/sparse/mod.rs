//! Sparse output of the projection
//!
//! ```text
//! sparse/
//! ├── matrix.rs      # CooMatrix (persisted), CsrMatrix (lookups)
//! ├── sink.rs        # CooSink: MemorySink, SpillSink (byteorder records)
//! ├── unipartite.rs  # UnipartiteGraph structure
//! ├── id_map.rs      # IdMap bijection
//! └── builder.rs     # SparseGraphBuilder
//! ```

pub mod builder;
pub mod id_map;
pub mod matrix;
pub mod sink;
pub mod unipartite;

pub use builder::{BuiltProjection, SparseGraphBuilder};
pub use id_map::IdMap;
pub use matrix::{CooMatrix, CsrMatrix};
pub use sink::{CooSink, MemorySink, SpillSink, SPILL_RECORD_BYTES};
pub use unipartite::UnipartiteGraph;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SparseError {
    #[error("triplet lengths differ: {rows} rows, {cols} cols, {weights} weights")]
    LengthMismatch {
        rows: usize,
        cols: usize,
        weights: usize,
    },

    #[error("entry ({row}, {col}) outside {n}x{n} matrix")]
    OutOfBounds { row: u32, col: u32, n: u32 },

    #[error("id map is not a bijection: {0}")]
    NotBijective(String),

    #[error("pair carries {found} scores for {expected} metrics")]
    ScoreArity { expected: usize, found: usize },

    #[error("self-pair on node {0}")]
    SelfPair(u32),

    #[error("spill I/O: {0}")]
    Io(#[from] std::io::Error),
}
