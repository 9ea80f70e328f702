//! Conductor RPC API.
//!
//! Implements:
//! - The exposed API surface (`ConductorApi`)
//! - The backend forwarding every call to a conductor (`ApiBackend`)
//! - JSON-RPC 2.0 envelopes and method dispatch

mod backend;
mod dispatch;
mod jsonrpc;

pub use backend::ApiBackend;
pub use dispatch::handle_body;

use async_trait::async_trait;
use conductor_common::{ConductorError, ExecutionPayload, ServerInfo};

/// Operations served to RPC callers
#[async_trait]
pub trait ConductorApi: Send + Sync {
    /// True iff the conductor is neither stopped nor paused
    async fn active(&self) -> Result<bool, ConductorError>;

    async fn pause(&self) -> Result<(), ConductorError>;

    async fn resume(&self) -> Result<(), ConductorError>;

    /// True if this conductor is leader of the cluster
    async fn leader(&self) -> Result<bool, ConductorError>;

    /// The leader's server ID and address (not necessarily this conductor)
    async fn leader_with_id(&self) -> Result<ServerInfo, ConductorError>;

    async fn add_server_as_voter(&self, id: &str, addr: &str) -> Result<(), ConductorError>;

    async fn add_server_as_nonvoter(&self, id: &str, addr: &str) -> Result<(), ConductorError>;

    async fn remove_server(&self, id: &str) -> Result<(), ConductorError>;

    async fn transfer_leader(&self) -> Result<(), ConductorError>;

    async fn transfer_leader_to_server(&self, id: &str, addr: &str)
    -> Result<(), ConductorError>;

    async fn commit_unsafe_payload(&self, payload: ExecutionPayload)
    -> Result<(), ConductorError>;
}
