//! Undirected donor-donor graph structure
//!
//! Edge existence only; per-metric weights live in the adjacency matrices.

use serde::{Deserialize, Serialize};

/// Undirected, unweighted graph over `0..node_count`
///
/// Edges are stored once as `(a, b)` with `a < b`, sorted and unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnipartiteGraph {
    node_count: u32,
    edges: Vec<(u32, u32)>,
}

impl UnipartiteGraph {
    pub fn new(node_count: u32) -> Self {
        Self {
            node_count,
            edges: Vec::new(),
        }
    }

    /// Normalize, sort and deduplicate; self-loops and out-of-range
    /// endpoints are dropped
    pub fn from_edges(node_count: u32, edges: impl IntoIterator<Item = (u32, u32)>) -> Self {
        let mut edges: Vec<(u32, u32)> = edges
            .into_iter()
            .filter(|&(a, b)| a != b && a < node_count && b < node_count)
            .map(|(a, b)| if a < b { (a, b) } else { (b, a) })
            .collect();
        edges.sort_unstable();
        edges.dedup();
        Self { node_count, edges }
    }

    pub fn node_count(&self) -> u32 {
        self.node_count
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> &[(u32, u32)] {
        &self.edges
    }

    pub fn contains_edge(&self, a: u32, b: u32) -> bool {
        let key = if a < b { (a, b) } else { (b, a) };
        self.edges.binary_search(&key).is_ok()
    }

    pub fn degrees(&self) -> Vec<u32> {
        let mut degrees = vec![0u32; self.node_count as usize];
        for &(a, b) in &self.edges {
            degrees[a as usize] += 1;
            degrees[b as usize] += 1;
        }
        degrees
    }

    /// Every edge of `self` is an edge of `other`
    pub fn is_subgraph_of(&self, other: &UnipartiteGraph) -> bool {
        self.node_count == other.node_count
            && self.edges.iter().all(|&(a, b)| other.contains_edge(a, b))
    }
}
