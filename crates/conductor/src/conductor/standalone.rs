//! Single-node, in-memory conductor.
//!
//! Keeps cluster membership, leadership and the latest unsafe payload in
//! process memory. Nothing is replicated or persisted: this is the collaborator
//! used when the service runs without a consensus cluster behind it.

use async_trait::async_trait;
use conductor_common::{ConductorError, ExecutionPayload, ServerInfo, ServerSuffrage};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

use super::Conductor;

/// Most recently committed unsafe payload
#[derive(Debug, Clone)]
pub struct UnsafeHead {
    pub payload: ExecutionPayload,
    /// Commit time (Unix epoch seconds)
    pub committed_at: i64,
}

#[derive(Debug, Clone)]
struct Member {
    info: ServerInfo,
    suffrage: ServerSuffrage,
}

#[derive(Debug)]
struct ClusterState {
    members: Vec<Member>,
    leader_id: String,
    unsafe_head: Option<UnsafeHead>,
}

impl ClusterState {
    fn find(&self, id: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.info.id == id)
    }
}

/// In-memory conductor for a single node
pub struct StandaloneConductor {
    /// Our server ID
    server_id: String,
    paused: AtomicBool,
    stopped: AtomicBool,
    cluster: RwLock<ClusterState>,
}

impl StandaloneConductor {
    /// Bootstrap a cluster with this server as its only voter and leader
    pub fn new(server_id: String, server_addr: String, start_paused: bool) -> Self {
        let me = Member {
            info: ServerInfo::new(server_id.clone(), server_addr),
            suffrage: ServerSuffrage::Voter,
        };

        Self {
            cluster: RwLock::new(ClusterState {
                members: vec![me],
                leader_id: server_id.clone(),
                unsafe_head: None,
            }),
            server_id,
            paused: AtomicBool::new(start_paused),
            stopped: AtomicBool::new(false),
        }
    }

    /// Our server ID
    pub fn server_id(&self) -> &str {
        &self.server_id
    }

    /// Stop the conductor. Control calls fail from here on.
    pub fn stop(&self) {
        if !self.stopped.swap(true, Ordering::SeqCst) {
            tracing::info!(server_id = %self.server_id, "Conductor stopped");
        }
    }

    /// Last payload committed through this conductor
    pub async fn unsafe_head(&self) -> Option<UnsafeHead> {
        self.cluster.read().await.unsafe_head.clone()
    }

    fn ensure_running(&self) -> Result<(), ConductorError> {
        if self.stopped() {
            return Err(ConductorError::Stopped);
        }
        Ok(())
    }

    fn ensure_leader(&self, state: &ClusterState) -> Result<(), ConductorError> {
        if state.leader_id != self.server_id {
            return Err(ConductorError::NotLeader);
        }
        Ok(())
    }

    async fn add_server(
        &self,
        id: &str,
        addr: &str,
        suffrage: ServerSuffrage,
    ) -> Result<(), ConductorError> {
        self.ensure_running()?;
        validate_addr(addr)?;

        let mut state = self.cluster.write().await;
        self.ensure_leader(&state)?;

        if state.find(id).is_some() {
            return Err(ConductorError::DuplicateServer(id.to_string()));
        }

        state.members.push(Member {
            info: ServerInfo::new(id, addr),
            suffrage,
        });

        tracing::info!(
            id = %id,
            addr = %addr,
            suffrage = ?suffrage,
            members = state.members.len(),
            "Server added to cluster"
        );

        Ok(())
    }
}

/// Accept `host:port` with a non-empty host and a numeric port
fn validate_addr(addr: &str) -> Result<(), ConductorError> {
    match addr.rsplit_once(':') {
        Some((host, port)) if !host.is_empty() && port.parse::<u16>().is_ok() => Ok(()),
        _ => Err(ConductorError::InvalidAddress(addr.to_string())),
    }
}

#[async_trait]
impl Conductor for StandaloneConductor {
    async fn pause(&self) -> Result<(), ConductorError> {
        self.ensure_running()?;
        if !self.paused.swap(true, Ordering::SeqCst) {
            tracing::info!("Conductor paused");
        }
        Ok(())
    }

    async fn resume(&self) -> Result<(), ConductorError> {
        self.ensure_running()?;
        if self.paused.swap(false, Ordering::SeqCst) {
            tracing::info!("Conductor resumed");
        }
        Ok(())
    }

    fn paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    fn stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    async fn leader(&self) -> bool {
        self.cluster.read().await.leader_id == self.server_id
    }

    async fn leader_with_id(&self) -> (String, String) {
        let state = self.cluster.read().await;
        match state.find(&state.leader_id) {
            Some(leader) => (leader.info.id.clone(), leader.info.addr.clone()),
            None => (String::new(), String::new()),
        }
    }

    async fn add_server_as_voter(&self, id: &str, addr: &str) -> Result<(), ConductorError> {
        self.add_server(id, addr, ServerSuffrage::Voter).await
    }

    async fn add_server_as_nonvoter(&self, id: &str, addr: &str) -> Result<(), ConductorError> {
        self.add_server(id, addr, ServerSuffrage::Nonvoter).await
    }

    async fn remove_server(&self, id: &str) -> Result<(), ConductorError> {
        self.ensure_running()?;

        let mut state = self.cluster.write().await;
        self.ensure_leader(&state)?;

        if state.find(id).is_none() {
            return Err(ConductorError::ServerNotFound(id.to_string()));
        }
        if id == state.leader_id {
            return Err(ConductorError::QuorumUnsafe(
                "cannot remove the acting leader, transfer leadership first".to_string(),
            ));
        }

        state.members.retain(|m| m.info.id != id);

        tracing::info!(id = %id, members = state.members.len(), "Server removed from cluster");

        Ok(())
    }

    async fn transfer_leader(&self) -> Result<(), ConductorError> {
        self.ensure_running()?;

        let mut state = self.cluster.write().await;
        self.ensure_leader(&state)?;

        let target = state
            .members
            .iter()
            .find(|m| m.suffrage.can_vote() && m.info.id != self.server_id)
            .map(|m| m.info.id.clone())
            .ok_or(ConductorError::NoTransferTarget)?;

        tracing::info!(from = %self.server_id, to = %target, "Leadership transferred");
        state.leader_id = target;

        Ok(())
    }

    async fn transfer_leader_to_server(
        &self,
        id: &str,
        addr: &str,
    ) -> Result<(), ConductorError> {
        self.ensure_running()?;

        let mut state = self.cluster.write().await;
        self.ensure_leader(&state)?;

        let eligible = match state.find(id) {
            Some(m) => m.suffrage.can_vote() && m.info.addr == addr && id != self.server_id,
            None => false,
        };
        if !eligible {
            return Err(ConductorError::InvalidTransferTarget(format!("{id}@{addr}")));
        }

        tracing::info!(from = %self.server_id, to = %id, addr = %addr, "Leadership transferred");
        state.leader_id = id.to_string();

        Ok(())
    }

    async fn commit_unsafe_payload(
        &self,
        payload: ExecutionPayload,
    ) -> Result<(), ConductorError> {
        self.ensure_running()?;

        let mut state = self.cluster.write().await;
        self.ensure_leader(&state)?;

        tracing::debug!(
            block_number = %payload.block_number,
            block_hash = %payload.block_hash,
            "Committed unsafe payload"
        );

        state.unsafe_head = Some(UnsafeHead {
            payload,
            committed_at: chrono::Utc::now().timestamp(),
        });

        Ok(())
    }
}
