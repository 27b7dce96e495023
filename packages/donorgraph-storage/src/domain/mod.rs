//! Domain layer for the contribution store
//!
//! # Domain Models
//!
//! - `ContributorRow`: one row of the Contributors table
//! - `RecipientRow`: one row of the Recipients table, keyed by (year, rid, seat)
//! - `TransactionRow`: one donation record of an election cycle
//!
//! # Port Trait
//!
//! - `ContributionStore`: read access to one election cycle's tables
//!
//! Column names are never hard-coded in queries; they come from
//! [`SchemaConfig`], which callers pass in explicitly.

mod schema;

pub use schema::{ContributorColumns, RecipientColumns, SchemaConfig, TransactionColumns};

use serde::{Deserialize, Serialize};

use crate::Result;

// ═══════════════════════════════════════════════════════════════════════════
// Domain Models
// ═══════════════════════════════════════════════════════════════════════════

/// A contributor (donor) as stored in the Contributors table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributorRow {
    pub contributor_id: i64,
    /// 1 for individuals, 0 for organizations
    pub is_individual: Option<i64>,
    pub state: Option<String>,
    pub cf_score: Option<f64>,
}

impl ContributorRow {
    pub fn new(contributor_id: i64) -> Self {
        Self {
            contributor_id,
            is_individual: None,
            state: None,
            cf_score: None,
        }
    }
}

/// A recipient (candidate or committee) as stored in the Recipients table
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RecipientRow {
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

impl RecipientRow {
    pub fn new(year: i64, recipient_id: impl Into<String>, seat: impl Into<String>) -> Self {
        Self {
            year,
            recipient_id: recipient_id.into(),
            seat: seat.into(),
            ..Default::default()
        }
    }

    /// Composite primary key of the Recipients table
    pub fn key(&self) -> RecipientKey {
        RecipientKey {
            year: self.year,
            recipient_id: self.recipient_id.clone(),
            seat: self.seat.clone(),
        }
    }
}

/// (year, rid, seat) primary key shared by recipients and transactions
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecipientKey {
    pub year: i64,
    pub recipient_id: String,
    pub seat: String,
}

/// One donation record
///
/// `recipient_id` is nullable in the source data; such records cannot be
/// attached to a recipient node.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TransactionRow {
    pub year: i64,
    pub transaction_id: String,
    pub transaction_type: Option<String>,
    /// Signed; refunds are negative
    pub amount: i64,
    pub date: Option<String>,
    pub contributor_id: i64,
    pub is_individual: Option<i64>,
    pub recipient_id: Option<String>,
    pub party: Option<i64>,
    pub is_committee: Option<i64>,
    pub district: Option<String>,
    pub seat: Option<String>,
    /// Contributor cf-score carried on the transaction
    pub contributor_cf_score: Option<f64>,
    /// Recipient cf-score carried on the transaction
    pub recipient_cf_score: Option<f64>,
}

impl TransactionRow {
    pub fn new(
        year: i64,
        transaction_id: impl Into<String>,
        contributor_id: i64,
        recipient_id: Option<&str>,
        seat: Option<&str>,
        amount: i64,
    ) -> Self {
        Self {
            year,
            transaction_id: transaction_id.into(),
            amount,
            contributor_id,
            recipient_id: recipient_id.map(str::to_string),
            seat: seat.map(str::to_string),
            ..Default::default()
        }
    }

    /// Recipient key this transaction points at, if it names a recipient
    ///
    /// A missing seat is keyed as the empty string.
    pub fn recipient_key(&self) -> Option<RecipientKey> {
        self.recipient_id.as_ref().map(|rid| RecipientKey {
            year: self.year,
            recipient_id: rid.clone(),
            seat: self.seat.clone().unwrap_or_default(),
        })
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Port Trait
// ═══════════════════════════════════════════════════════════════════════════

/// Read access to one election cycle's contribution tables
pub trait ContributionStore {
    /// Contributors that appear in at least one transaction
    fn contributors(&self) -> Result<Vec<ContributorRow>>;

    /// Distinct recipients matched by at least one transaction on (year, rid, seat)
    fn recipients(&self) -> Result<Vec<RecipientRow>>;

    /// Every transaction, in storage order
    fn transactions(&self) -> Result<Vec<TransactionRow>>;
}
