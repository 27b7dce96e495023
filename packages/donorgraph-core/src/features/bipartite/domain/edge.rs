//! Donation edges

use serde::{Deserialize, Serialize};

use super::node::NodeId;

/// One donation from a donor node to a recipient node
///
/// Repeated donations between the same pair stay separate edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonationEdge {
    pub donor: NodeId,
    pub recipient: NodeId,
    /// Signed; refunds are negative
    pub amount: i64,
    pub transaction_id: String,
    pub date: Option<String>,
    pub transaction_type: Option<String>,
}

impl DonationEdge {
    pub fn new(donor: NodeId, recipient: NodeId, amount: i64) -> Self {
        Self {
            donor,
            recipient,
            amount,
            transaction_id: String::new(),
            date: None,
            transaction_type: None,
        }
    }

    pub fn with_transaction(
        mut self,
        transaction_id: impl Into<String>,
        date: Option<String>,
        transaction_type: Option<String>,
    ) -> Self {
        self.transaction_id = transaction_id.into();
        self.date = date;
        self.transaction_type = transaction_type;
        self
    }
}
