//! Per-donor donation aggregates
//!
//! Built in one pass over the donation edges of a cycle and read-only
//! afterwards. Every similarity metric reads its inputs from here.

pub mod index;

pub use index::{DonorProfile, DonorProfileIndex, RecipientStats, RecipientTotals};
