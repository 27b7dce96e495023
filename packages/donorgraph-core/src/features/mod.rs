//! Feature slices
//!
//! ```text
//! bipartite ──► donor_profile ──► projection ──► sparse ──► artifacts
//!                                                  │
//!                                  pruning ◄───────┤
//!                                  donor_features ◄┤
//!                                  correlation ◄───┘
//! ```

pub mod artifacts;
pub mod bipartite;
pub mod correlation;
pub mod donor_features;
pub mod donor_profile;
pub mod projection;
pub mod pruning;
pub mod sparse;
