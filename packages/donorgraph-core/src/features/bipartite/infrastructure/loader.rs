//! Relational store → DonationGraph
//!
//! Full nodes come from the Contributors and Recipients tables. A transaction
//! whose contributor or recipient is missing from its table still produces an
//! edge; the missing endpoint is created as a partial node from the
//! transaction's own columns.

use donorgraph_storage::ContributionStore;
use tracing::{debug, info, warn};

use crate::errors::Result;
use crate::features::bipartite::domain::{
    Completeness, DonationEdge, DonationGraph, DonationGraphBuilder, DonorAttributes,
    RecipientAttributes,
};

/// Counts gathered while loading one cycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub full_donors: usize,
    pub partial_donors: usize,
    pub full_recipients: usize,
    pub partial_recipients: usize,
    pub donations: usize,
    /// Transactions with a null recipient id
    pub skipped_transactions: usize,
}

pub struct BipartiteLoader;

impl BipartiteLoader {
    /// Build the bipartite graph of the cycle held by `store`
    pub fn load<S>(store: &S) -> Result<(DonationGraph, LoadStats)>
    where
        S: ContributionStore + ?Sized,
    {
        let mut builder = DonationGraphBuilder::new();
        let mut stats = LoadStats::default();

        for row in store.contributors()? {
            builder.add_donor(DonorAttributes::from(&row), Completeness::Full);
            stats.full_donors += 1;
        }

        for row in store.recipients()? {
            builder.add_recipient(RecipientAttributes::from(&row), Completeness::Full);
            stats.full_recipients += 1;
        }
        debug!(
            "Loaded {} full donors, {} full recipients",
            stats.full_donors, stats.full_recipients
        );

        for tx in store.transactions()? {
            let Some(recipient_attrs) = RecipientAttributes::from_transaction(&tx) else {
                stats.skipped_transactions += 1;
                continue;
            };

            let donor = match builder.donor_id(tx.contributor_id) {
                Some(id) => id,
                None => {
                    stats.partial_donors += 1;
                    builder.add_donor(DonorAttributes::from_transaction(&tx), Completeness::Partial)
                }
            };

            let recipient = match builder.recipient_id(&recipient_attrs.key()) {
                Some(id) => id,
                None => {
                    stats.partial_recipients += 1;
                    builder.add_recipient(recipient_attrs, Completeness::Partial)
                }
            };

            let edge = DonationEdge::new(donor, recipient, tx.amount).with_transaction(
                tx.transaction_id,
                tx.date,
                tx.transaction_type,
            );
            builder.add_donation(edge)?;
            stats.donations += 1;
        }

        if stats.skipped_transactions > 0 {
            warn!(
                "Skipped {} transactions without a recipient id",
                stats.skipped_transactions
            );
        }

        let graph = builder.build();
        info!(
            "Built bipartite graph: {} nodes ({} donors, {} recipients), {} donations",
            graph.node_count(),
            graph.donor_count(),
            graph.recipient_count(),
            graph.edge_count()
        );
        Ok((graph, stats))
    }
}
