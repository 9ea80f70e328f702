//! Errors raised by a conductor.
//!
//! The RPC facade never creates these itself; it hands them to the caller
//! exactly as the conductor produced them.

use thiserror::Error;

use crate::constants::rpc_codes;

/// Errors reported by a conductor operation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConductorError {
    /// The conductor has been stopped and accepts no more control calls
    #[error("conductor is stopped")]
    Stopped,

    /// The operation needs leadership this node does not hold
    #[error("node is not the leader")]
    NotLeader,

    /// A server with this id is already a cluster member
    #[error("server already in cluster: {0}")]
    DuplicateServer(String),

    /// No cluster member has this id
    #[error("server not found: {0}")]
    ServerNotFound(String),

    /// The server address could not be used
    #[error("invalid server address: {0}")]
    InvalidAddress(String),

    /// The membership change would leave the cluster without a safe quorum
    #[error("membership change rejected: {0}")]
    QuorumUnsafe(String),

    /// Leadership transfer requested but no other voter exists
    #[error("no voter available for leadership transfer")]
    NoTransferTarget,

    /// Leadership transfer target is not a known voter at that address
    #[error("invalid leadership transfer target: {0}")]
    InvalidTransferTarget(String),

    /// The payload was refused by the conductor
    #[error("payload rejected: {0}")]
    PayloadRejected(String),

    /// The conductor could not reach its peers
    #[error("transport error: {0}")]
    Transport(String),

    /// Any other conductor failure
    #[error("internal error: {0}")]
    Internal(String),
}

impl ConductorError {
    /// JSON-RPC error code this error is reported with.
    ///
    /// Every conductor error shares the generic server error code; callers
    /// distinguish them by message.
    pub fn rpc_code(&self) -> i32 {
        rpc_codes::SERVER_ERROR
    }
}
