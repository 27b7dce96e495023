//! Donation graph and its builder
//!
//! Donations flow strictly donor → recipient. The builder enforces this when
//! each edge is added, so a built [`DonationGraph`] never holds a donor with
//! incoming edges or a recipient with outgoing edges.

use donorgraph_storage::RecipientKey;
use std::collections::HashMap;
use thiserror::Error;

use super::edge::DonationEdge;
use super::node::{Completeness, DonorAttributes, Node, NodeAttributes, NodeId, NodeRole, RecipientAttributes};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GraphError {
    #[error("unknown node id {0}")]
    UnknownNode(NodeId),

    #[error("node {node} is a {found}, expected a {expected}")]
    RoleViolation {
        node: NodeId,
        expected: &'static str,
        found: NodeRole,
    },
}

/// Bipartite donor → recipient graph of one election cycle
#[derive(Debug, Clone, Default)]
pub struct DonationGraph {
    nodes: Vec<Node>,
    edges: Vec<DonationEdge>,
    out_degree: Vec<u32>,
    in_degree: Vec<u32>,
    donor_index: HashMap<i64, NodeId>,
    recipient_index: HashMap<RecipientKey, NodeId>,
}

impl DonationGraph {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id as usize)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[DonationEdge] {
        &self.edges
    }

    pub fn donors(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.is_donor())
    }

    pub fn recipients(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.is_recipient())
    }

    pub fn donor_count(&self) -> usize {
        self.donor_index.len()
    }

    pub fn recipient_count(&self) -> usize {
        self.recipient_index.len()
    }

    pub fn out_degree(&self, id: NodeId) -> u32 {
        self.out_degree.get(id as usize).copied().unwrap_or(0)
    }

    pub fn in_degree(&self, id: NodeId) -> u32 {
        self.in_degree.get(id as usize).copied().unwrap_or(0)
    }

    /// Node id of the donor with the given contributor id
    pub fn donor_id(&self, contributor_id: i64) -> Option<NodeId> {
        self.donor_index.get(&contributor_id).copied()
    }

    pub fn recipient_id(&self, key: &RecipientKey) -> Option<NodeId> {
        self.recipient_index.get(key).copied()
    }
}

/// Incremental construction of a [`DonationGraph`]
#[derive(Debug, Default)]
pub struct DonationGraphBuilder {
    nodes: Vec<Node>,
    edges: Vec<DonationEdge>,
    donor_index: HashMap<i64, NodeId>,
    recipient_index: HashMap<RecipientKey, NodeId>,
}

impl DonationGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a donor node, or return the id of the donor already registered
    /// under the same contributor id
    ///
    /// A full record replaces the attributes of an earlier partial one.
    pub fn add_donor(&mut self, attrs: DonorAttributes, completeness: Completeness) -> NodeId {
        if let Some(&id) = self.donor_index.get(&attrs.contributor_id) {
            self.upgrade(id, NodeAttributes::Donor(attrs), completeness);
            return id;
        }
        self.push_donor(attrs, completeness)
    }

    /// Add a recipient node keyed by (year, recipient id, seat)
    pub fn add_recipient(
        &mut self,
        attrs: RecipientAttributes,
        completeness: Completeness,
    ) -> NodeId {
        let key = attrs.key();
        if let Some(&id) = self.recipient_index.get(&key) {
            self.upgrade(id, NodeAttributes::Recipient(attrs), completeness);
            return id;
        }
        let id = self.nodes.len() as NodeId;
        self.nodes.push(Node {
            id,
            attributes: NodeAttributes::Recipient(attrs),
            completeness,
        });
        self.recipient_index.insert(key, id);
        id
    }

    pub fn donor_id(&self, contributor_id: i64) -> Option<NodeId> {
        self.donor_index.get(&contributor_id).copied()
    }

    pub fn recipient_id(&self, key: &RecipientKey) -> Option<NodeId> {
        self.recipient_index.get(key).copied()
    }

    /// Add a donation edge after checking both endpoint roles
    pub fn add_donation(&mut self, edge: DonationEdge) -> Result<(), GraphError> {
        let donor = self
            .nodes
            .get(edge.donor as usize)
            .ok_or(GraphError::UnknownNode(edge.donor))?;
        if !donor.is_donor() {
            return Err(GraphError::RoleViolation {
                node: edge.donor,
                expected: "donor",
                found: donor.role(),
            });
        }

        let recipient = self
            .nodes
            .get(edge.recipient as usize)
            .ok_or(GraphError::UnknownNode(edge.recipient))?;
        if !recipient.is_recipient() {
            return Err(GraphError::RoleViolation {
                node: edge.recipient,
                expected: "recipient",
                found: recipient.role(),
            });
        }

        self.edges.push(edge);
        Ok(())
    }

    pub fn build(self) -> DonationGraph {
        let n = self.nodes.len();
        let mut out_degree = vec![0u32; n];
        let mut in_degree = vec![0u32; n];
        for edge in &self.edges {
            out_degree[edge.donor as usize] += 1;
            in_degree[edge.recipient as usize] += 1;
        }

        DonationGraph {
            nodes: self.nodes,
            edges: self.edges,
            out_degree,
            in_degree,
            donor_index: self.donor_index,
            recipient_index: self.recipient_index,
        }
    }

    fn push_donor(&mut self, attrs: DonorAttributes, completeness: Completeness) -> NodeId {
        let id = self.nodes.len() as NodeId;
        self.donor_index.insert(attrs.contributor_id, id);
        self.nodes.push(Node {
            id,
            attributes: NodeAttributes::Donor(attrs),
            completeness,
        });
        id
    }

    fn upgrade(&mut self, id: NodeId, attributes: NodeAttributes, completeness: Completeness) {
        if let Some(node) = self.nodes.get_mut(id as usize) {
            if node.completeness == Completeness::Partial && completeness == Completeness::Full {
                node.attributes = attributes;
                node.completeness = Completeness::Full;
            }
        }
    }
}
