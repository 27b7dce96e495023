//! Infrastructure adapters for the contribution store

pub mod memory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use memory::InMemoryContributionStore;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteContributionStore;
