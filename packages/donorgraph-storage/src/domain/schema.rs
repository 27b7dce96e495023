//! Column-name configuration for the contribution tables
//!
//! Each logical field of the row models maps to a column name. The defaults
//! match the DIME-derived cycle databases (`Contributors`, `Recipients`,
//! `Transactions`).

use serde::{Deserialize, Serialize};

use crate::error::{Result, StorageError};

/// Column names of the Contributors table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContributorColumns {
    pub table: String,
    pub contributor_id: String,
    pub is_individual: String,
    pub state: String,
    pub cf_score: String,
}

impl Default for ContributorColumns {
    fn default() -> Self {
        Self {
            table: "Contributors".into(),
            contributor_id: "cid".into(),
            is_individual: "indiv".into(),
            state: "state".into(),
            cf_score: "cfscore".into(),
        }
    }
}

impl ContributorColumns {
    /// Columns in the order the row decoder reads them
    pub fn select_list(&self) -> [&str; 4] {
        [
            &self.contributor_id,
            &self.is_individual,
            &self.state,
            &self.cf_score,
        ]
    }
}

/// Column names of the Recipients table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecipientColumns {
    pub table: String,
    pub year: String,
    pub recipient_id: String,
    pub seat: String,
    pub party: String,
    pub district: String,
    pub incumbency: String,
    pub cf_score: String,
    pub cf_score_dynamic: String,
    pub num_givers: String,
    pub gender: String,
    pub did_primary: String,
    pub winner: String,
    pub partisanship: String,
    pub in_district: String,
    pub in_state: String,
    pub candidate_status: String,
    pub fec_year: String,
    pub is_committee: String,
}

impl Default for RecipientColumns {
    fn default() -> Self {
        Self {
            table: "Recipients".into(),
            year: "year".into(),
            recipient_id: "rid".into(),
            seat: "seat".into(),
            party: "party".into(),
            district: "district".into(),
            incumbency: "incumb".into(),
            cf_score: "cfs".into(),
            cf_score_dynamic: "cfsdyn".into(),
            num_givers: "numgivers".into(),
            gender: "gender".into(),
            did_primary: "didprimary".into(),
            winner: "winner".into(),
            partisanship: "partisanship".into(),
            in_district: "indistrict".into(),
            in_state: "instate".into(),
            candidate_status: "candstatus".into(),
            fec_year: "fecyear".into(),
            is_committee: "candorcomm".into(),
        }
    }
}

impl RecipientColumns {
    pub fn select_list(&self) -> [&str; 18] {
        [
            &self.year,
            &self.recipient_id,
            &self.seat,
            &self.party,
            &self.district,
            &self.incumbency,
            &self.cf_score,
            &self.cf_score_dynamic,
            &self.num_givers,
            &self.gender,
            &self.did_primary,
            &self.winner,
            &self.partisanship,
            &self.in_district,
            &self.in_state,
            &self.candidate_status,
            &self.fec_year,
            &self.is_committee,
        ]
    }
}

/// Column names of the Transactions table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionColumns {
    pub table: String,
    pub year: String,
    pub transaction_id: String,
    pub transaction_type: String,
    pub amount: String,
    pub date: String,
    pub contributor_id: String,
    pub is_individual: String,
    pub recipient_id: String,
    pub party: String,
    pub is_committee: String,
    pub district: String,
    pub seat: String,
    pub contributor_cf_score: String,
    pub recipient_cf_score: String,
}

impl Default for TransactionColumns {
    fn default() -> Self {
        Self {
            table: "Transactions".into(),
            year: "year".into(),
            transaction_id: "tid".into(),
            transaction_type: "ttid".into(),
            amount: "amount".into(),
            date: "date".into(),
            contributor_id: "cid".into(),
            is_individual: "indiv".into(),
            recipient_id: "rid".into(),
            party: "party".into(),
            is_committee: "candorcomm".into(),
            district: "district".into(),
            seat: "seat".into(),
            contributor_cf_score: "cfscore".into(),
            recipient_cf_score: "cfs".into(),
        }
    }
}

impl TransactionColumns {
    pub fn select_list(&self) -> [&str; 14] {
        [
            &self.year,
            &self.transaction_id,
            &self.transaction_type,
            &self.amount,
            &self.date,
            &self.contributor_id,
            &self.is_individual,
            &self.recipient_id,
            &self.party,
            &self.is_committee,
            &self.district,
            &self.seat,
            &self.contributor_cf_score,
            &self.recipient_cf_score,
        ]
    }
}

/// Schema of the three contribution tables
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    pub contributors: ContributorColumns,
    pub recipients: RecipientColumns,
    pub transactions: TransactionColumns,
}

impl SchemaConfig {
    /// Reject names that would need quoting beyond a plain identifier
    pub fn validate(&self) -> Result<()> {
        let names = std::iter::once(self.contributors.table.as_str())
            .chain(self.contributors.select_list())
            .chain(std::iter::once(self.recipients.table.as_str()))
            .chain(self.recipients.select_list())
            .chain(std::iter::once(self.transactions.table.as_str()))
            .chain(self.transactions.select_list());

        for name in names {
            if !is_plain_identifier(name) {
                return Err(StorageError::schema(format!(
                    "'{}' is not a plain identifier",
                    name
                )));
            }
        }
        Ok(())
    }
}

fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schema_is_valid() {
        assert!(SchemaConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_injection_in_column_name() {
        let mut schema = SchemaConfig::default();
        schema.transactions.amount = "amount; DROP TABLE x".into();
        assert!(schema.validate().is_err());
    }

    #[test]
    fn test_rejects_leading_digit() {
        assert!(!is_plain_identifier("1year"));
        assert!(is_plain_identifier("_year1"));
        assert!(!is_plain_identifier(""));
    }
}
