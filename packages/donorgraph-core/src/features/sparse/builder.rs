//! SparseGraphBuilder: scored pairs → structure + one matrix per metric
//!
//! Every pair lands twice in each metric sink, `(a, b)` then `(b, a)`, with
//! the same weight. The structural edge is recorded once.

use crate::features::projection::domain::{Metric, SimilarityPair};

use super::id_map::IdMap;
use super::matrix::CooMatrix;
use super::sink::CooSink;
use super::unipartite::UnipartiteGraph;
use super::SparseError;

pub struct SparseGraphBuilder<S: CooSink> {
    id_map: IdMap,
    metrics: Vec<Metric>,
    sinks: Vec<S>,
    edges: Vec<(u32, u32)>,
}

impl<S: CooSink> SparseGraphBuilder<S> {
    /// One sink per metric, created by `make_sink` in metric order
    pub fn new<F>(id_map: IdMap, metrics: &[Metric], mut make_sink: F) -> Result<Self, SparseError>
    where
        F: FnMut(Metric) -> std::io::Result<S>,
    {
        let sinks = metrics
            .iter()
            .map(|&m| make_sink(m))
            .collect::<std::io::Result<Vec<S>>>()?;
        Ok(Self {
            id_map,
            metrics: metrics.to_vec(),
            sinks,
            edges: Vec::new(),
        })
    }

    pub fn node_count(&self) -> u32 {
        self.id_map.len() as u32
    }

    pub fn pair_count(&self) -> usize {
        self.edges.len()
    }

    /// Record one pair; `pair.scores` is aligned with the builder's metrics
    pub fn add_pair(&mut self, pair: &SimilarityPair) -> Result<(), SparseError> {
        if pair.a == pair.b {
            return Err(SparseError::SelfPair(pair.a));
        }
        if pair.scores.len() != self.metrics.len() {
            return Err(SparseError::ScoreArity {
                expected: self.metrics.len(),
                found: pair.scores.len(),
            });
        }

        for (sink, &weight) in self.sinks.iter_mut().zip(&pair.scores) {
            sink.push(pair.a, pair.b, weight)?;
            sink.push(pair.b, pair.a, weight)?;
        }
        self.edges.push((pair.a, pair.b));
        Ok(())
    }

    pub fn finish(self) -> BuiltProjection<S> {
        let n = self.node_count();
        BuiltProjection {
            graph: UnipartiteGraph::from_edges(n, self.edges),
            id_map: self.id_map,
            sinks: self.metrics.into_iter().zip(self.sinks).collect(),
        }
    }
}

/// Builder output; matrices are still held by their sinks
pub struct BuiltProjection<S: CooSink> {
    pub graph: UnipartiteGraph,
    pub id_map: IdMap,
    pub sinks: Vec<(Metric, S)>,
}

impl<S: CooSink> BuiltProjection<S> {
    /// Materialize every metric matrix at once
    pub fn into_matrices(self) -> Result<(UnipartiteGraph, IdMap, Vec<(Metric, CooMatrix)>), SparseError> {
        let n = self.id_map.len() as u32;
        let matrices = self
            .sinks
            .into_iter()
            .map(|(metric, sink)| Ok((metric, sink.into_matrix(n)?)))
            .collect::<Result<Vec<_>, SparseError>>()?;
        Ok((self.graph, self.id_map, matrices))
    }
}
