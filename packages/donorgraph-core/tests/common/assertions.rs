//! Custom assertions for donor-graph tests

use donorgraph_core::features::sparse::{CooMatrix, UnipartiteGraph};

pub const EPSILON: f64 = 1e-12;

/// Assert two weights agree to within `EPSILON`
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "Expected {expected}, got {actual}"
    );
}

/// Assert every entry has its mirror with the same weight
pub fn assert_symmetric(matrix: &CooMatrix) {
    let csr = matrix.to_csr();
    for (r, c, w) in matrix.iter() {
        assert_eq!(
            csr.get(c, r),
            Some(w),
            "Entry ({r}, {c}) = {w} has no matching mirror"
        );
    }
}

/// Assert no entry sits on the diagonal
pub fn assert_no_self_loops(matrix: &CooMatrix) {
    if let Some((r, _, w)) = matrix.iter().find(|(r, c, _)| r == c) {
        panic!("Self-loop on node {r} with weight {w}");
    }
}

/// Assert two structural graphs have the same edge set
pub fn assert_same_edges(actual: &UnipartiteGraph, expected: &UnipartiteGraph) {
    assert_eq!(actual.node_count(), expected.node_count(), "node counts differ");
    assert!(
        actual.is_subgraph_of(expected) && expected.is_subgraph_of(actual),
        "Edge sets differ: {:?} vs {:?}",
        actual.edges(),
        expected.edges()
    );
}
