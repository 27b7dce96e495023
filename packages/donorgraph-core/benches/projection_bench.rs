//! Benchmarks for the similarity projection
//!
//! Run with: cargo bench --bench projection_bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use donorgraph_core::config::ProjectionConfig;
use donorgraph_core::features::bipartite::{DonationEdge, NodeId};
use donorgraph_core::features::donor_profile::DonorProfileIndex;
use donorgraph_core::features::projection::{
    Metric, ProjectionUseCase, QualifyingDonors, SimilarityEngine,
};
use donorgraph_core::features::pruning::{PruneSpec, SortedEntries};
use donorgraph_core::features::sparse::CooSink;
use donorgraph_core::shared::WorkerPool;

/// Donors `0..donors` each giving to `per_donor` recipients drawn from a pool
/// of `recipients`, xorshift-seeded
fn generate_index(donors: u32, recipients: u32, per_donor: u32) -> DonorProfileIndex {
    let mut state = 0x9E37_79B9_7F4A_7C15u64;
    let mut edges = Vec::with_capacity((donors * per_donor) as usize);
    for d in 0..donors {
        for _ in 0..per_donor {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            let r: NodeId = donors + (state % recipients as u64) as u32;
            edges.push(DonationEdge::new(d, r, 1 + (state % 2500) as i64));
        }
    }
    DonorProfileIndex::from_edges(0..donors, &edges)
}

fn bench_engine_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine_rows");

    for &(donors, recipients) in &[(500u32, 200u32), (2000, 500), (5000, 1000)] {
        let index = generate_index(donors, recipients, 6);
        let qualifying = QualifyingDonors::select(&index, 2);
        let engine = SimilarityEngine::new(&index, &qualifying, &Metric::ALL).unwrap();
        group.throughput(Throughput::Elements(engine.node_count() as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{donors}donors_{recipients}recipients")),
            &engine,
            |b, engine| {
                b.iter(|| {
                    let mut pairs = 0usize;
                    for i in 0..engine.node_count() {
                        pairs += black_box(engine.row(i)).len();
                    }
                    pairs
                });
            },
        );
    }

    group.finish();
}

fn bench_projection_workers(c: &mut Criterion) {
    let mut group = c.benchmark_group("projection_workers");
    group.sample_size(10);
    let index = generate_index(3000, 600, 8);

    for workers in [1usize, 2, 4, 8] {
        let pool = WorkerPool::new(workers, workers > 1).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(workers), &pool, |b, pool| {
            b.iter(|| {
                let output = ProjectionUseCase::new(ProjectionConfig::default(), pool)
                    .execute(black_box(&index))
                    .unwrap();
                output.edge_count()
            });
        });
    }

    group.finish();
}

fn bench_pruning(c: &mut Criterion) {
    let mut group = c.benchmark_group("pruning");
    let index = generate_index(3000, 600, 8);
    let pool = WorkerPool::new(0, true).unwrap();
    let config = ProjectionConfig {
        metrics: vec![Metric::Cosine],
        ..Default::default()
    };
    let output = ProjectionUseCase::new(config, &pool).execute(&index).unwrap();
    let n = output.node_count();
    let matrix = output
        .built
        .sinks
        .into_iter()
        .next()
        .map(|(_, sink)| sink.into_matrix(n))
        .unwrap()
        .unwrap();
    group.throughput(Throughput::Elements(matrix.nnz() as u64));

    group.bench_function("sort_entries", |b| {
        b.iter(|| SortedEntries::from_matrix(black_box(&matrix)).len())
    });

    let sorted = SortedEntries::from_matrix(&matrix);
    group.bench_function("all_default_specs", |b| {
        b.iter(|| {
            [0.01, 0.05, 0.1, 0.25, 0.5]
                .into_iter()
                .map(PruneSpec::Percent)
                .chain([0.8, 0.95, 0.99].into_iter().map(PruneSpec::Threshold))
                .map(|spec| sorted.prune(spec).unwrap().edge_count())
                .sum::<usize>()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_engine_rows, bench_projection_workers, bench_pruning);
criterion_main!(benches);
