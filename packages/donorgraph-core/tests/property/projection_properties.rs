//! Property-based tests for the projection and the pruner
//!
//! Invariants that hold for every donation pattern:
//! - Symmetry: every (i, j) entry has an equal (j, i) entry
//! - Bounds: 0 ≤ jaccard ≤ 1
//! - No self-loops
//! - Round trip: pruning at p = 1 keeps the whole structure
//! - Monotonicity: a stricter threshold keeps a subset of edges
//! - Idempotence: projecting twice yields bit-identical weights

#[path = "../common/mod.rs"]
mod common;

use common::{assert_same_edges, project, DonationsBuilder};
use donorgraph_core::features::projection::Metric;
use donorgraph_core::features::pruning::{PruneSpec, SortedEntries};
use donorgraph_core::features::sparse::CooMatrix;
use donorgraph_core::shared::WorkerPool;
use proptest::prelude::*;

fn donations() -> impl Strategy<Value = DonationsBuilder> {
    prop::collection::vec((0u32..12, 100u32..108, 1i64..1000), 1..60).prop_map(|rows| {
        rows.into_iter()
            .fold(DonationsBuilder::new(), |b, (d, r, amount)| b.give(d, r, amount))
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_matrices_are_symmetric_without_self_loops(builder in donations()) {
        let projected = project(&builder.build(), 0, &Metric::ALL, &WorkerPool::sequential());
        for (_, matrix) in &projected.matrices {
            let csr = matrix.to_csr();
            for (r, c, w) in matrix.iter() {
                prop_assert_ne!(r, c);
                prop_assert_eq!(csr.get(c, r), Some(w));
            }
        }
    }

    #[test]
    fn prop_jaccard_is_a_fraction(builder in donations()) {
        let projected = project(&builder.build(), 0, &[Metric::Jaccard], &WorkerPool::sequential());
        for w in projected.matrix(Metric::Jaccard).weights() {
            prop_assert!(*w > 0.0 && *w <= 1.0, "jaccard {} out of range", w);
        }
    }

    #[test]
    fn prop_full_percent_keeps_whole_structure(builder in donations()) {
        let projected = project(&builder.build(), 0, &[Metric::Jaccard], &WorkerPool::sequential());
        let sorted = SortedEntries::from_matrix(projected.matrix(Metric::Jaccard));
        let pruned = sorted.prune(PruneSpec::Percent(1.0)).unwrap();
        assert_same_edges(&pruned, &projected.graph);
    }

    #[test]
    fn prop_threshold_pruning_is_monotonic(
        builder in donations(),
        t1 in 0.0f64..1.0,
        delta in 0.0f64..0.5,
    ) {
        let projected = project(&builder.build(), 0, &[Metric::Cosine], &WorkerPool::sequential());
        let sorted = SortedEntries::from_matrix(projected.matrix(Metric::Cosine));

        let loose = sorted.prune(PruneSpec::Threshold(t1)).unwrap();
        let strict = sorted.prune(PruneSpec::Threshold(t1 + delta)).unwrap();
        prop_assert!(strict.is_subgraph_of(&loose));
    }

    #[test]
    fn prop_percent_pruning_is_monotonic(
        builder in donations(),
        p1 in 0.01f64..1.0,
        p2 in 0.01f64..1.0,
    ) {
        let (small, large) = if p1 <= p2 { (p1, p2) } else { (p2, p1) };
        let projected = project(&builder.build(), 0, &[Metric::WeightedAdamic], &WorkerPool::sequential());
        let sorted = SortedEntries::from_matrix(projected.matrix(Metric::WeightedAdamic));

        let few = sorted.prune(PruneSpec::Percent(small)).unwrap();
        let many = sorted.prune(PruneSpec::Percent(large)).unwrap();
        prop_assert!(few.is_subgraph_of(&many));
    }

    #[test]
    fn prop_projection_is_idempotent(builder in donations(), workers in 1usize..5) {
        let index = builder.build();
        let first = project(&index, 0, &Metric::ALL, &WorkerPool::sequential());
        let second = project(&index, 0, &Metric::ALL, &WorkerPool::new(workers, true).unwrap());

        prop_assert_eq!(&first.graph, &second.graph);
        for ((m1, a), (m2, b)) in first.matrices.iter().zip(&second.matrices) {
            prop_assert_eq!(m1, m2);
            let bits = |m: &CooMatrix| {
                m.weights().iter().map(|w| w.to_bits()).collect::<Vec<_>>()
            };
            prop_assert_eq!(a.rows(), b.rows());
            prop_assert_eq!(a.cols(), b.cols());
            prop_assert_eq!(bits(a), bits(b));
        }
    }
}
