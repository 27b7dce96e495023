//! Pipeline orchestration
//!
//! ```text
//! pipeline/
//! ├── projection.rs  # ProjectionPipeline::run_year (store → matrices)
//! ├── pruning.rs     # PruningPipeline::run (matrix → pruned graphs)
//! ├── analysis.rs    # features, correlation, validation
//! ├── report.rs      # RunReport of per-unit outcomes
//! └── error.rs       # PipelineError, UnitId
//! ```
//!
//! A unit is one cycle or one (cycle, metric). Units fail independently and
//! every outcome lands in the [`RunReport`].

pub mod analysis;
pub mod error;
pub mod projection;
pub mod pruning;
pub mod report;

pub use analysis::AnalysisPipeline;
pub use error::{PipelineError, UnitId};
pub use projection::ProjectionPipeline;
pub use pruning::PruningPipeline;
pub use report::{RunReport, UnitOutcome, UnitSummary};
