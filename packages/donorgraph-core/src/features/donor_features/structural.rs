//! Structure-only node features, indexed by unipartite id

use petgraph::algo::page_rank;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::unionfind::UnionFind;
use tracing::{debug, warn};

use crate::features::sparse::UnipartiteGraph;
use crate::shared::constants::features::PAGERANK_DAMPING;

#[derive(Debug, Clone, PartialEq)]
pub struct StructuralFeatures {
    pub degree: Vec<u32>,
    /// Size of the connected component holding each node
    pub component_size: Vec<usize>,
    pub pagerank: Vec<f64>,
}

impl StructuralFeatures {
    pub fn compute(graph: &UnipartiteGraph, damping: f64, iterations: usize) -> Self {
        let n = graph.node_count() as usize;
        let damping = if (0.0..=1.0).contains(&damping) {
            damping
        } else {
            warn!(
                "PageRank damping {} outside [0, 1], using {}",
                damping, PAGERANK_DAMPING
            );
            PAGERANK_DAMPING
        };

        let features = Self {
            degree: graph.degrees(),
            component_size: component_sizes(graph),
            pagerank: pagerank(graph, damping, iterations),
        };
        debug!(
            "Structural features for {} nodes, {} edges",
            n,
            graph.edge_count()
        );
        features
    }

    pub fn len(&self) -> usize {
        self.degree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.degree.is_empty()
    }
}

fn component_sizes(graph: &UnipartiteGraph) -> Vec<usize> {
    let n = graph.node_count() as usize;
    let mut sets = UnionFind::<usize>::new(n);
    for &(a, b) in graph.edges() {
        sets.union(a as usize, b as usize);
    }

    let labels = sets.into_labeling();
    let mut sizes = vec![0usize; n];
    for &label in &labels {
        sizes[label] += 1;
    }
    labels.into_iter().map(|label| sizes[label]).collect()
}

fn pagerank(graph: &UnipartiteGraph, damping: f64, iterations: usize) -> Vec<f64> {
    let n = graph.node_count() as usize;
    if n == 0 {
        return Vec::new();
    }

    let mut g: UnGraph<(), ()> = UnGraph::with_capacity(n, graph.edge_count());
    for _ in 0..n {
        g.add_node(());
    }
    for &(a, b) in graph.edges() {
        g.add_edge(NodeIndex::new(a as usize), NodeIndex::new(b as usize), ());
    }
    page_rank(&g, damping, iterations)
}
