//! Hand-checked projections of small donation patterns

#[path = "../common/mod.rs"]
mod common;

use common::{
    assert_close, assert_no_self_loops, assert_symmetric, fixture_generated,
    fixture_one_dollar_recipient, fixture_one_of_three, fixture_single_shared_recipient,
    fixture_small_cycle, project, DonationsBuilder,
};
use donorgraph_core::features::projection::{
    score, Metric, Overlap, ProjectionError, QualifyingDonors, ScoringContext, SimilarityEngine,
};
use donorgraph_core::shared::WorkerPool;
use pretty_assertions::assert_eq;

#[test]
fn test_single_shared_recipient() {
    let index = fixture_single_shared_recipient().build();
    let projected = project(&index, 0, &Metric::ALL, &WorkerPool::sequential());

    assert_close(projected.weight(Metric::Jaccard, 1, 2).unwrap(), 1.0);
    assert_close(projected.weight(Metric::Jaccard2, 1, 2).unwrap(), 1.0 / 3.0);
    assert_close(projected.weight(Metric::Cosine, 1, 2).unwrap(), 1.0);
    assert_close(projected.weight(Metric::Affinity, 1, 2).unwrap(), 1.0);
    assert_close(
        projected.weight(Metric::Adamic, 1, 2).unwrap(),
        1.0 / 150f64.log10(),
    );
    assert_close(
        projected.weight(Metric::WeightedAdamic, 1, 2).unwrap(),
        150.0 / (1.0 + 150f64.log10()),
    );
}

#[test]
fn test_one_shared_out_of_three() {
    let index = fixture_one_of_three().build();
    let projected = project(&index, 0, &Metric::ALL, &WorkerPool::sequential());

    assert_close(projected.weight(Metric::Jaccard, 1, 2).unwrap(), 1.0 / 3.0);
    assert_close(projected.weight(Metric::Jaccard2, 1, 2).unwrap(), 0.2);
    // norms run over each donor's full amount vector
    assert_close(projected.weight(Metric::Cosine, 1, 2).unwrap(), 0.5);
    // 1 shared · 2 profiles / (2 + 2) keeps only the integer part
    assert_eq!(projected.weight(Metric::Affinity, 1, 2), Some(0.0));
    // the zero weight is still stored for the pair
    assert_eq!(projected.graph.edge_count(), 1);
}

#[test]
fn test_one_dollar_recipient_adds_nothing_to_adamic() {
    let index = fixture_one_dollar_recipient().build();
    let projected = project(
        &index,
        0,
        &[Metric::Adamic, Metric::WeightedAdamic],
        &WorkerPool::sequential(),
    );

    assert_eq!(projected.weight(Metric::Adamic, 1, 2), Some(0.0));
    assert_close(projected.weight(Metric::WeightedAdamic, 1, 2).unwrap(), 1.0);
    // the pair is still an edge of the structure
    assert_eq!(projected.graph.edge_count(), 1);
    // received == 1: the weighted denominator is exactly 1 + log10(1)
    assert_eq!(index.total_received(10), 1);
    let (a, b) = (index.profile(1).unwrap(), index.profile(2).unwrap());
    let overlap = Overlap::between(a, b);
    let ctx = ScoringContext {
        totals: index.recipient_totals(),
        profile_count: index.profile_count(),
    };
    assert_eq!(score(Metric::Adamic, a, b, &overlap, &ctx), 0.0);
    assert_eq!(score(Metric::WeightedAdamic, a, b, &overlap, &ctx), 1.0);
}

#[test]
fn test_affinity_floors_scaled_overlap_over_every_profile_in_scope() {
    // donors 3..=6 never qualify but still count towards the normalization
    let index = fixture_one_of_three()
        .idle_donor(3)
        .idle_donor(4)
        .idle_donor(5)
        .idle_donor(6)
        .build();
    let projected = project(&index, 1, &[Metric::Affinity], &WorkerPool::sequential());

    assert_eq!(projected.id_map.len(), 2);
    // 1 shared · 6 profiles / (2 + 2) = 1.5, floored
    assert_eq!(projected.weight(Metric::Affinity, 1, 2), Some(1.0));

    // one idle donor: 1 · 3 / 4 = 0.75, floored
    let index = fixture_one_of_three().idle_donor(3).build();
    let projected = project(&index, 0, &[Metric::Affinity], &WorkerPool::sequential());
    assert_eq!(projected.weight(Metric::Affinity, 1, 2), Some(0.0));
}

#[test]
fn test_donors_below_threshold_are_left_out() {
    let index = fixture_small_cycle().build();
    let projected = project(&index, 2, &[Metric::Jaccard], &WorkerPool::sequential());

    // only donors 1 and 4 gave to more than two recipients
    assert_eq!(projected.id_map.iter().map(|(_, old)| old).collect::<Vec<_>>(), vec![1, 4]);
    assert_eq!(projected.graph.edges(), &[(0, 1)]);
    assert_close(projected.weight(Metric::Jaccard, 1, 4).unwrap(), 1.0 / 5.0);
}

#[test]
fn test_disjoint_donors_get_no_entry() {
    let index = DonationsBuilder::new()
        .give(1, 10, 5)
        .give(2, 11, 5)
        .give(3, 11, 7)
        .build();
    let projected = project(&index, 0, &Metric::ALL, &WorkerPool::sequential());

    assert_eq!(projected.id_map.len(), 3);
    assert_eq!(projected.weight(Metric::Jaccard, 1, 2), None);
    assert_eq!(projected.weight(Metric::Jaccard, 2, 3), Some(1.0));
    for (_, matrix) in &projected.matrices {
        assert_eq!(matrix.nnz(), 2);
    }
}

#[test]
fn test_every_matrix_is_symmetric_without_self_loops() {
    let index = fixture_small_cycle().build();
    let projected = project(&index, 0, &Metric::ALL, &WorkerPool::sequential());

    assert!(projected.graph.edge_count() > 0);
    for (_, matrix) in &projected.matrices {
        assert_eq!(matrix.nnz(), 2 * projected.graph.edge_count());
        assert_symmetric(matrix);
        assert_no_self_loops(matrix);
    }
}

#[test]
fn test_parallel_run_matches_sequential_run() {
    let index = fixture_generated(120, 40, 4, 7).build();
    let sequential = project(&index, 1, &Metric::ALL, &WorkerPool::sequential());
    let parallel = project(&index, 1, &Metric::ALL, &WorkerPool::new(4, true).unwrap());

    assert_eq!(sequential.graph, parallel.graph);
    assert_eq!(sequential.id_map, parallel.id_map);
    assert_eq!(sequential.matrices, parallel.matrices);
}

#[test]
fn test_unknown_donor_fails_before_scoring() {
    let index = fixture_one_of_three().build();
    let donors = QualifyingDonors::from_ids(vec![1, 2, 99]);

    let err = SimilarityEngine::new(&index, &donors, &[Metric::Jaccard]).err();
    assert!(matches!(err, Some(ProjectionError::MissingProfile { donor: 99 })));
}
