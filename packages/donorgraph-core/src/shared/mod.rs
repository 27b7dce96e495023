//! Shared module - Common types and utilities
//!
//! Types used by more than one feature slice. No feature imports from here
//! flow back into `shared`.

pub mod constants;
pub mod parallel;
pub mod timer;

pub use parallel::WorkerPool;
pub use timer::StageTimer;
