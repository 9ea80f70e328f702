//! Conductor collaborator.
//!
//! The consensus engine behind the RPC facade is reached only through the
//! [`Conductor`] trait. This crate ships a single-node in-memory implementation
//! for standalone deployments; a replicated engine plugs in behind the same
//! trait.

mod standalone;
#[cfg(test)]
pub mod testing;

pub use standalone::StandaloneConductor;

use async_trait::async_trait;
use conductor_common::{ConductorError, ExecutionPayload};

/// Capabilities the RPC facade needs from a conductor.
///
/// Implementations must be safe to call concurrently; the facade adds no
/// synchronization of its own.
#[async_trait]
pub trait Conductor: Send + Sync {
    /// Pause the conductor's control loop
    async fn pause(&self) -> Result<(), ConductorError>;

    /// Resume a paused conductor
    async fn resume(&self) -> Result<(), ConductorError>;

    fn paused(&self) -> bool;

    fn stopped(&self) -> bool;

    /// Whether this node currently believes it is the leader
    async fn leader(&self) -> bool;

    /// (id, address) of the node this conductor believes is leader
    async fn leader_with_id(&self) -> (String, String);

    async fn add_server_as_voter(&self, id: &str, addr: &str) -> Result<(), ConductorError>;

    async fn add_server_as_nonvoter(&self, id: &str, addr: &str) -> Result<(), ConductorError>;

    async fn remove_server(&self, id: &str) -> Result<(), ConductorError>;

    /// Hand leadership to any other eligible voter
    async fn transfer_leader(&self) -> Result<(), ConductorError>;

    async fn transfer_leader_to_server(&self, id: &str, addr: &str)
    -> Result<(), ConductorError>;

    /// Commit an unsafe payload to the cluster log
    async fn commit_unsafe_payload(&self, payload: ExecutionPayload)
    -> Result<(), ConductorError>;
}
