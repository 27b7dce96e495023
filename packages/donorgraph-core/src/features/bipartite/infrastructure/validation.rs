//! Structural checks of a loaded DonationGraph
//!
//! Each check lists the offending node ids so a failing cycle can be traced
//! back to its rows.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::features::bipartite::domain::{DonationGraph, NodeId};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Recipients without incoming donations, or with outgoing ones
    pub recipient_degree: Vec<NodeId>,
    /// Donors without outgoing donations, or with incoming ones
    pub donor_degree: Vec<NodeId>,
    /// Nodes whose donations sum to zero or less
    pub non_positive_amount: Vec<NodeId>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.issue_count() == 0
    }

    pub fn issue_count(&self) -> usize {
        self.recipient_degree.len() + self.donor_degree.len() + self.non_positive_amount.len()
    }
}

pub fn validate_bipartite(graph: &DonationGraph) -> ValidationReport {
    let mut report = ValidationReport::default();

    for node in graph.nodes() {
        let (in_deg, out_deg) = (graph.in_degree(node.id), graph.out_degree(node.id));
        if node.is_recipient() && !(in_deg > 0 && out_deg == 0) {
            report.recipient_degree.push(node.id);
        }
        if node.is_donor() && !(out_deg > 0 && in_deg == 0) {
            report.donor_degree.push(node.id);
        }
    }

    // Only nodes touching at least one edge carry an amount
    let mut amounts: BTreeMap<NodeId, i64> = BTreeMap::new();
    for edge in graph.edges() {
        *amounts.entry(edge.donor).or_insert(0) += edge.amount;
        *amounts.entry(edge.recipient).or_insert(0) += edge.amount;
    }
    report.non_positive_amount = amounts
        .into_iter()
        .filter(|&(_, total)| total <= 0)
        .map(|(id, _)| id)
        .collect();

    report
}
