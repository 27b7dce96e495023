//! Bipartite node model
//!
//! Attributes are typed per role instead of being looked up by name: a donor
//! carries [`DonorAttributes`], a recipient carries [`RecipientAttributes`].

use donorgraph_storage::{ContributorRow, RecipientKey, RecipientRow, TransactionRow};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Dense node id of the bipartite graph, assigned in insertion order
pub type NodeId = u32;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonorAttributes {
    pub contributor_id: i64,
    pub is_individual: Option<i64>,
    pub state: Option<String>,
    pub cf_score: Option<f64>,
}

impl DonorAttributes {
    pub fn new(contributor_id: i64) -> Self {
        Self {
            contributor_id,
            is_individual: None,
            state: None,
            cf_score: None,
        }
    }

    /// Partial attributes recoverable from a transaction alone
    pub fn from_transaction(tx: &TransactionRow) -> Self {
        Self {
            contributor_id: tx.contributor_id,
            is_individual: tx.is_individual,
            state: None,
            cf_score: tx.contributor_cf_score,
        }
    }
}

impl From<&ContributorRow> for DonorAttributes {
    fn from(row: &ContributorRow) -> Self {
        Self {
            contributor_id: row.contributor_id,
            is_individual: row.is_individual,
            state: row.state.clone(),
            cf_score: row.cf_score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RecipientAttributes {
    pub year: i64,
    pub recipient_id: String,
    pub seat: String,
    pub party: Option<i64>,
    pub district: Option<String>,
    pub incumbency: Option<i64>,
    pub cf_score: Option<f64>,
    pub cf_score_dynamic: Option<f64>,
    pub num_givers: Option<i64>,
    pub gender: Option<i64>,
    pub did_primary: Option<i64>,
    pub winner: Option<i64>,
    pub partisanship: Option<f64>,
    pub in_district: Option<f64>,
    pub in_state: Option<f64>,
    pub candidate_status: Option<i64>,
    pub fec_year: Option<i64>,
    pub is_committee: Option<i64>,
}

impl RecipientAttributes {
    pub fn new(year: i64, recipient_id: impl Into<String>, seat: impl Into<String>) -> Self {
        Self {
            year,
            recipient_id: recipient_id.into(),
            seat: seat.into(),
            ..Default::default()
        }
    }

    pub fn key(&self) -> RecipientKey {
        RecipientKey {
            year: self.year,
            recipient_id: self.recipient_id.clone(),
            seat: self.seat.clone(),
        }
    }

    /// Partial attributes recoverable from a transaction alone
    ///
    /// `None` when the transaction names no recipient.
    pub fn from_transaction(tx: &TransactionRow) -> Option<Self> {
        let key = tx.recipient_key()?;
        Some(Self {
            year: key.year,
            recipient_id: key.recipient_id,
            seat: key.seat,
            party: tx.party,
            district: tx.district.clone(),
            cf_score: tx.recipient_cf_score,
            is_committee: tx.is_committee,
            ..Default::default()
        })
    }
}

impl From<&RecipientRow> for RecipientAttributes {
    fn from(row: &RecipientRow) -> Self {
        Self {
            year: row.year,
            recipient_id: row.recipient_id.clone(),
            seat: row.seat.clone(),
            party: row.party,
            district: row.district.clone(),
            incumbency: row.incumbency,
            cf_score: row.cf_score,
            cf_score_dynamic: row.cf_score_dynamic,
            num_givers: row.num_givers,
            gender: row.gender,
            did_primary: row.did_primary,
            winner: row.winner,
            partisanship: row.partisanship,
            in_district: row.in_district,
            in_state: row.in_state,
            candidate_status: row.candidate_status,
            fec_year: row.fec_year,
            is_committee: row.is_committee,
        }
    }
}

/// Role-specific attribute record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeAttributes {
    Donor(DonorAttributes),
    Recipient(RecipientAttributes),
}

/// Whether a node was loaded from its own table or inferred from transactions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Completeness {
    Full,
    Partial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeRole {
    Donor,
    RecipientWithScore,
    RecipientWithoutScore,
}

impl NodeRole {
    pub fn is_donor(&self) -> bool {
        matches!(self, NodeRole::Donor)
    }

    pub fn is_recipient(&self) -> bool {
        !self.is_donor()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeRole::Donor => "donor",
            NodeRole::RecipientWithScore => "recipient-with-score",
            NodeRole::RecipientWithoutScore => "recipient-without-score",
        }
    }
}

impl fmt::Display for NodeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub attributes: NodeAttributes,
    pub completeness: Completeness,
}

impl Node {
    /// Role derived from the attribute record
    pub fn role(&self) -> NodeRole {
        match &self.attributes {
            NodeAttributes::Donor(_) => NodeRole::Donor,
            NodeAttributes::Recipient(r) if r.cf_score.is_some() => NodeRole::RecipientWithScore,
            NodeAttributes::Recipient(_) => NodeRole::RecipientWithoutScore,
        }
    }

    pub fn is_donor(&self) -> bool {
        matches!(self.attributes, NodeAttributes::Donor(_))
    }

    pub fn is_recipient(&self) -> bool {
        matches!(self.attributes, NodeAttributes::Recipient(_))
    }

    pub fn as_donor(&self) -> Option<&DonorAttributes> {
        match &self.attributes {
            NodeAttributes::Donor(d) => Some(d),
            NodeAttributes::Recipient(_) => None,
        }
    }

    pub fn as_recipient(&self) -> Option<&RecipientAttributes> {
        match &self.attributes {
            NodeAttributes::Recipient(r) => Some(r),
            NodeAttributes::Donor(_) => None,
        }
    }
}
