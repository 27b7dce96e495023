//! Projection UseCase: profile index in, structure + per-metric sinks out

use std::io;
use std::path::PathBuf;

use tracing::{debug, info, info_span};

use crate::config::ProjectionConfig;
use crate::features::donor_profile::DonorProfileIndex;
use crate::features::projection::domain::{ProjectionError, QualifyingDonors};
use crate::features::projection::infrastructure::{EngineStats, SimilarityEngine};
use crate::features::sparse::{
    BuiltProjection, CooMatrix, CooSink, IdMap, MemorySink, SparseError, SparseGraphBuilder,
    SpillSink,
};
use crate::shared::WorkerPool;

/// Sink picked per run from `projection.spill_to_disk`
#[derive(Debug)]
pub enum ProjectionSink {
    Memory(MemorySink),
    Spill(SpillSink),
}

impl CooSink for ProjectionSink {
    fn push(&mut self, row: u32, col: u32, weight: f64) -> io::Result<()> {
        match self {
            Self::Memory(sink) => sink.push(row, col, weight),
            Self::Spill(sink) => sink.push(row, col, weight),
        }
    }

    fn len(&self) -> usize {
        match self {
            Self::Memory(sink) => sink.len(),
            Self::Spill(sink) => sink.len(),
        }
    }

    fn into_matrix(self, n: u32) -> Result<CooMatrix, SparseError> {
        match self {
            Self::Memory(sink) => sink.into_matrix(n),
            Self::Spill(sink) => sink.into_matrix(n),
        }
    }
}

/// Result of projecting one cycle
///
/// Matrices stay inside their sinks so the caller can materialize and
/// release them one metric at a time.
pub struct ProjectionOutput {
    pub built: BuiltProjection<ProjectionSink>,
    pub stats: EngineStats,
}

impl ProjectionOutput {
    pub fn node_count(&self) -> u32 {
        self.built.id_map.len() as u32
    }

    pub fn edge_count(&self) -> usize {
        self.built.graph.edge_count()
    }
}

pub struct ProjectionUseCase<'p> {
    config: ProjectionConfig,
    pool: &'p WorkerPool,
    spill_dir: Option<PathBuf>,
}

impl<'p> ProjectionUseCase<'p> {
    pub fn new(config: ProjectionConfig, pool: &'p WorkerPool) -> Self {
        Self {
            config,
            pool,
            spill_dir: None,
        }
    }

    /// Directory for spill files (system temp dir otherwise)
    pub fn with_spill_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.spill_dir = Some(dir.into());
        self
    }

    pub fn execute(&self, index: &DonorProfileIndex) -> Result<ProjectionOutput, ProjectionError> {
        let span = info_span!("projection", donors = index.profile_count());
        let _enter = span.enter();

        let donors = QualifyingDonors::select(index, self.config.min_recipients);
        let engine = SimilarityEngine::new(index, &donors, &self.config.metrics)?;
        let id_map = IdMap::from_ordered(donors.into_ids())?;

        let mut builder = SparseGraphBuilder::new(id_map, engine.metrics(), |_| self.make_sink())?;
        info!(
            "Projecting {} donors over {} metrics (batch of {} rows, {} workers)",
            builder.node_count(),
            engine.metrics().len(),
            self.config.batch_rows,
            self.pool.workers()
        );

        let stats = engine.for_each_pair(self.pool, self.config.batch_rows, |pair| {
            builder.add_pair(pair)
        })?;
        debug!("Engine emitted {} pairs over {} rows", stats.pairs, stats.rows);

        Ok(ProjectionOutput {
            built: builder.finish(),
            stats,
        })
    }

    fn make_sink(&self) -> io::Result<ProjectionSink> {
        if !self.config.spill_to_disk {
            return Ok(ProjectionSink::Memory(MemorySink::new()));
        }
        let sink = match &self.spill_dir {
            Some(dir) => SpillSink::new_in(dir)?,
            None => SpillSink::new()?,
        };
        Ok(ProjectionSink::Spill(sink))
    }
}
