//! Projection Application Layer

pub mod usecase;

pub use usecase::{ProjectionOutput, ProjectionSink, ProjectionUseCase};
