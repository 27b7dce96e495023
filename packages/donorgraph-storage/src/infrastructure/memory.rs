//! In-memory contribution store
//!
//! Applies the same row filters as the SQLite adapter so tests and small
//! fixtures see identical loader behavior.

use std::collections::HashSet;

use crate::domain::{ContributionStore, ContributorRow, RecipientKey, RecipientRow, TransactionRow};
use crate::Result;

#[derive(Debug, Clone, Default)]
pub struct InMemoryContributionStore {
    contributors: Vec<ContributorRow>,
    recipients: Vec<RecipientRow>,
    transactions: Vec<TransactionRow>,
}

impl InMemoryContributionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contributor(mut self, row: ContributorRow) -> Self {
        self.contributors.push(row);
        self
    }

    pub fn with_recipient(mut self, row: RecipientRow) -> Self {
        self.recipients.push(row);
        self
    }

    pub fn with_transaction(mut self, row: TransactionRow) -> Self {
        self.transactions.push(row);
        self
    }

    pub fn with_transactions(mut self, rows: impl IntoIterator<Item = TransactionRow>) -> Self {
        self.transactions.extend(rows);
        self
    }
}

impl ContributionStore for InMemoryContributionStore {
    fn contributors(&self) -> Result<Vec<ContributorRow>> {
        let active: HashSet<i64> = self
            .transactions
            .iter()
            .map(|t| t.contributor_id)
            .collect();
        let mut rows: Vec<ContributorRow> = self
            .contributors
            .iter()
            .filter(|c| active.contains(&c.contributor_id))
            .cloned()
            .collect();
        rows.sort_by_key(|c| c.contributor_id);
        Ok(rows)
    }

    fn recipients(&self) -> Result<Vec<RecipientRow>> {
        let referenced: HashSet<RecipientKey> = self
            .transactions
            .iter()
            .filter_map(TransactionRow::recipient_key)
            .collect();
        let mut rows: Vec<RecipientRow> = self
            .recipients
            .iter()
            .filter(|r| referenced.contains(&r.key()))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.key().cmp(&b.key()));
        rows.dedup();
        Ok(rows)
    }

    fn transactions(&self) -> Result<Vec<TransactionRow>> {
        Ok(self.transactions.clone())
    }
}
