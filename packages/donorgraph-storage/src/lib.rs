//! donorgraph-storage: relational boundary of the donor-graph pipeline
//!
//! One election cycle lives in one database with three tables:
//! Contributors, Recipients and Transactions.
//!
//! ## Core Principles
//!
//! 1. **Explicit schema**: column names come from [`SchemaConfig`], passed in by the caller
//! 2. **Read port**: projection code only sees the [`ContributionStore`] trait
//! 3. **All-or-nothing batches**: a batch insert commits whole or rolls back whole
//!
//! ## Usage
//!
//! ```rust,ignore
//! use donorgraph_storage::{ContributionStore, SchemaConfig, SqliteContributionStore};
//!
//! let store = SqliteContributionStore::open("data/1980.sqlite", SchemaConfig::default())?;
//! let transactions = store.transactions()?;
//! ```

pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::{ErrorKind, Result, StorageError};

pub use domain::{
    ContributionStore, ContributorColumns, ContributorRow, RecipientColumns, RecipientKey,
    RecipientRow, SchemaConfig, TransactionColumns, TransactionRow,
};

pub use infrastructure::InMemoryContributionStore;

#[cfg(feature = "sqlite")]
pub use infrastructure::SqliteContributionStore;
