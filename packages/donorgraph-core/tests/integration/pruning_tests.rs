//! Percentile and threshold pruning over whole matrices

#[path = "../common/mod.rs"]
mod common;

use common::{assert_same_edges, fixture_small_cycle, project};
use donorgraph_core::features::projection::Metric;
use donorgraph_core::features::pruning::{
    prune_by_percent, prune_by_threshold, PruneError, PruneSpec, SortedEntries,
};
use donorgraph_core::features::sparse::CooMatrix;
use donorgraph_core::shared::WorkerPool;
use pretty_assertions::assert_eq;

/// Ten upper-triangle entries with a three-way tie at 5.0
fn ten_entries() -> CooMatrix {
    let entries = [
        (3, 5, 6.0),
        (0, 1, 5.0),
        (4, 5, 3.0),
        (0, 2, 9.0),
        (0, 3, 5.0),
        (1, 2, 1.0),
        (1, 3, 8.0),
        (2, 3, 5.0),
        (2, 4, 7.0),
        (3, 4, 2.0),
    ];
    let mut m = CooMatrix::new(6);
    for (r, c, w) in entries {
        m.push(r, c, w).unwrap();
    }
    m
}

#[test]
fn test_half_keeps_top_five_with_row_major_ties() {
    let graph = prune_by_percent(&ten_entries(), 0.5).unwrap();

    assert_eq!(graph.node_count(), 6);
    assert_eq!(graph.edges(), &[(0, 1), (0, 2), (1, 3), (2, 4), (3, 5)]);
}

#[test]
fn test_sorted_entries_are_stable() {
    let sorted = SortedEntries::from_matrix(&ten_entries());
    let weights: Vec<f64> = sorted.entries().iter().map(|e| e.2).collect();
    assert_eq!(weights, vec![9.0, 8.0, 7.0, 6.0, 5.0, 5.0, 5.0, 3.0, 2.0, 1.0]);

    let ties: Vec<(u32, u32)> = sorted.entries()[4..7].iter().map(|e| (e.0, e.1)).collect();
    assert_eq!(ties, vec![(0, 1), (0, 3), (2, 3)]);
}

#[test]
fn test_fraction_rounds_down() {
    let m = ten_entries();
    assert_eq!(prune_by_percent(&m, 0.05).unwrap().edge_count(), 0);
    assert_eq!(prune_by_percent(&m, 0.19).unwrap().edge_count(), 1);
    assert_eq!(prune_by_percent(&m, 1.0).unwrap().edge_count(), 10);
}

#[test]
fn test_threshold_is_inclusive() {
    let m = ten_entries();
    assert_eq!(prune_by_threshold(&m, 5.0).unwrap().edge_count(), 7);
    assert_eq!(prune_by_threshold(&m, 5.5).unwrap().edge_count(), 4);

    let empty = prune_by_threshold(&m, 100.0).unwrap();
    assert_eq!(empty.edge_count(), 0);
    assert_eq!(empty.node_count(), 6);
}

#[test]
fn test_invalid_specs_are_rejected() {
    let m = ten_entries();
    assert!(matches!(
        prune_by_percent(&m, 0.0),
        Err(PruneError::FractionOutOfRange(_))
    ));
    assert!(matches!(
        prune_by_percent(&m, 1.01),
        Err(PruneError::FractionOutOfRange(_))
    ));
    assert!(matches!(
        prune_by_threshold(&m, f64::NAN),
        Err(PruneError::NonFiniteThreshold(_))
    ));
}

#[test]
fn test_zero_and_nan_weights_are_never_kept() {
    let mut m = ten_entries();
    m.push(1, 4, 0.0).unwrap();
    m.push(1, 5, f64::NAN).unwrap();

    let sorted = SortedEntries::from_matrix(&m);
    assert_eq!(sorted.len(), 10);
    assert!(!prune_by_percent(&m, 1.0).unwrap().contains_edge(1, 4));
    assert!(!prune_by_threshold(&m, f64::MIN).unwrap().contains_edge(1, 5));
}

#[test]
fn test_full_percent_reproduces_projected_structure() {
    let index = fixture_small_cycle().build();
    let projected = project(&index, 0, &[Metric::Jaccard], &WorkerPool::sequential());

    let pruned = prune_by_percent(projected.matrix(Metric::Jaccard), 1.0).unwrap();
    assert_same_edges(&pruned, &projected.graph);
}

#[test]
fn test_source_matrix_is_untouched() {
    let m = ten_entries();
    let before = m.clone();
    for spec in [PruneSpec::Percent(0.3), PruneSpec::Threshold(4.0)] {
        SortedEntries::from_matrix(&m).prune(spec).unwrap();
    }
    assert_eq!(m, before);
}
