//! Core types shared across conductor components.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A cluster member as reported by the conductor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerInfo {
    /// Server identifier
    pub id: String,

    /// Consensus network address
    pub addr: String,
}

impl ServerInfo {
    pub fn new(id: impl Into<String>, addr: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            addr: addr.into(),
        }
    }
}

impl From<(String, String)> for ServerInfo {
    fn from((id, addr): (String, String)) -> Self {
        Self { id, addr }
    }
}

/// Membership class of a cluster member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerSuffrage {
    /// Takes part in leader election quorum
    Voter,
    /// Replicates state without voting rights
    Nonvoter,
}

impl ServerSuffrage {
    pub fn can_vote(&self) -> bool {
        matches!(self, Self::Voter)
    }
}

/// Execution payload handed to the conductor for commitment.
///
/// Quantities and hashes are kept in their hex wire form; nothing in this
/// workspace interprets them. Keys not modelled here are carried in `extra`
/// so the payload reaches the conductor exactly as the caller sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionPayload {
    pub parent_hash: String,
    pub fee_recipient: String,
    pub state_root: String,
    pub receipts_root: String,
    pub logs_bloom: String,
    pub prev_randao: String,
    pub block_number: String,
    pub gas_limit: String,
    pub gas_used: String,
    pub timestamp: String,
    pub extra_data: String,
    pub base_fee_per_gas: String,
    pub block_hash: String,

    /// Opaque encoded transactions
    pub transactions: Vec<String>,

    /// Present from Shanghai onwards
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub withdrawals: Option<Vec<Withdrawal>>,

    /// Present from Cancun onwards
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blob_gas_used: Option<String>,

    /// Present from Cancun onwards
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excess_blob_gas: Option<String>,

    /// Present on OP chains from Isthmus onwards
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub withdrawals_root: Option<String>,

    /// Any other payload keys, passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Validator withdrawal included in an execution payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Withdrawal {
    pub index: String,
    pub validator_index: String,
    pub address: String,
    pub amount: String,
}
