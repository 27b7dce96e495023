//! Test data builders

use donorgraph_core::features::bipartite::{DonationEdge, NodeId};
use donorgraph_core::features::donor_profile::DonorProfileIndex;
use donorgraph_core::features::projection::{Metric, QualifyingDonors, SimilarityEngine};
use donorgraph_core::features::sparse::{
    CooMatrix, IdMap, MemorySink, SparseGraphBuilder, UnipartiteGraph,
};
use donorgraph_core::shared::WorkerPool;
use donorgraph_storage::{InMemoryContributionStore, TransactionRow};

/// Donations between bare node ids, turned into a profile index
#[derive(Debug, Default)]
pub struct DonationsBuilder {
    donors: Vec<NodeId>,
    edges: Vec<DonationEdge>,
}

impl DonationsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// One donation of `amount` from `donor` to `recipient`
    pub fn give(mut self, donor: NodeId, recipient: NodeId, amount: i64) -> Self {
        if !self.donors.contains(&donor) {
            self.donors.push(donor);
        }
        self.edges.push(DonationEdge::new(donor, recipient, amount));
        self
    }

    /// A donor registered without any donation
    pub fn idle_donor(mut self, donor: NodeId) -> Self {
        if !self.donors.contains(&donor) {
            self.donors.push(donor);
        }
        self
    }

    pub fn edges(&self) -> &[DonationEdge] {
        &self.edges
    }

    pub fn build(&self) -> DonorProfileIndex {
        DonorProfileIndex::from_edges(self.donors.iter().copied(), &self.edges)
    }
}

/// Everything a projection produces, materialized
pub struct Projected {
    pub graph: UnipartiteGraph,
    pub id_map: IdMap,
    pub matrices: Vec<(Metric, CooMatrix)>,
}

impl Projected {
    pub fn matrix(&self, metric: Metric) -> &CooMatrix {
        self.matrices
            .iter()
            .find(|(m, _)| *m == metric)
            .map(|(_, matrix)| matrix)
            .unwrap_or_else(|| panic!("no {} matrix projected", metric))
    }

    /// Weight between two bipartite donor ids, `None` when they share nothing
    pub fn weight(&self, metric: Metric, donor_a: NodeId, donor_b: NodeId) -> Option<f64> {
        let a = self.id_map.new_id(donor_a)?;
        let b = self.id_map.new_id(donor_b)?;
        self.matrix(metric).to_csr().get(a, b)
    }
}

/// Project `index` through the engine and an in-memory builder
pub fn project(
    index: &DonorProfileIndex,
    min_recipients: usize,
    metrics: &[Metric],
    pool: &WorkerPool,
) -> Projected {
    let donors = QualifyingDonors::select(index, min_recipients);
    let engine = SimilarityEngine::new(index, &donors, metrics).unwrap();
    let id_map = IdMap::from_ordered(donors.into_ids()).unwrap();
    let mut builder =
        SparseGraphBuilder::new(id_map, engine.metrics(), |_| Ok(MemorySink::new())).unwrap();
    engine
        .for_each_pair(pool, 4, |pair| builder.add_pair(pair))
        .unwrap();
    let (graph, id_map, matrices) = builder.finish().into_matrices().unwrap();
    Projected {
        graph,
        id_map,
        matrices,
    }
}

/// Transactions of one cycle, written as `(contributor, recipient, amount)`
pub fn store_from(year: i64, donations: &[(i64, &str, i64)]) -> InMemoryContributionStore {
    let rows = donations
        .iter()
        .enumerate()
        .map(|(k, &(cid, rid, amount))| {
            TransactionRow::new(year, format!("{}-{}", year, k), cid, Some(rid), Some("federal:house"), amount)
        });
    InMemoryContributionStore::new().with_transactions(rows)
}
