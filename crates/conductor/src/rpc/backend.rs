//! API backend: forwards every RPC call to the conductor.

use async_trait::async_trait;
use conductor_common::{ConductorError, ExecutionPayload, ServerInfo};
use std::sync::Arc;
use tracing::{Instrument, Span};

use super::ConductorApi;
use crate::conductor::Conductor;

/// Backend implementation of [`ConductorApi`].
///
/// Holds no state besides its logger span and the conductor handle; results
/// and errors are returned exactly as the conductor produced them.
pub struct ApiBackend {
    log: Span,
    con: Arc<dyn Conductor>,
}

impl ApiBackend {
    /// Create a backend logging under `log`
    pub fn new(log: Span, con: Arc<dyn Conductor>) -> Self {
        Self { log, con }
    }

    fn observe<T>(
        &self,
        op: &'static str,
        result: Result<T, ConductorError>,
    ) -> Result<T, ConductorError> {
        match &result {
            Ok(_) => tracing::debug!(parent: &self.log, op, "Conductor call succeeded"),
            Err(e) => tracing::warn!(parent: &self.log, op, error = %e, "Conductor call failed"),
        }
        result
    }
}

#[async_trait]
impl ConductorApi for ApiBackend {
    async fn active(&self) -> Result<bool, ConductorError> {
        let stopped = self.con.stopped();
        let paused = self.con.paused();
        Ok(!stopped && !paused)
    }

    async fn pause(&self) -> Result<(), ConductorError> {
        let result = self.con.pause().instrument(self.log.clone()).await;
        self.observe("pause", result)
    }

    async fn resume(&self) -> Result<(), ConductorError> {
        let result = self.con.resume().instrument(self.log.clone()).await;
        self.observe("resume", result)
    }

    async fn leader(&self) -> Result<bool, ConductorError> {
        Ok(self.con.leader().instrument(self.log.clone()).await)
    }

    async fn leader_with_id(&self) -> Result<ServerInfo, ConductorError> {
        let pair = self.con.leader_with_id().instrument(self.log.clone()).await;
        Ok(ServerInfo::from(pair))
    }

    async fn add_server_as_voter(&self, id: &str, addr: &str) -> Result<(), ConductorError> {
        let result = self
            .con
            .add_server_as_voter(id, addr)
            .instrument(self.log.clone())
            .await;
        self.observe("add_server_as_voter", result)
    }

    async fn add_server_as_nonvoter(&self, id: &str, addr: &str) -> Result<(), ConductorError> {
        let result = self
            .con
            .add_server_as_nonvoter(id, addr)
            .instrument(self.log.clone())
            .await;
        self.observe("add_server_as_nonvoter", result)
    }

    async fn remove_server(&self, id: &str) -> Result<(), ConductorError> {
        let result = self.con.remove_server(id).instrument(self.log.clone()).await;
        self.observe("remove_server", result)
    }

    async fn transfer_leader(&self) -> Result<(), ConductorError> {
        let result = self.con.transfer_leader().instrument(self.log.clone()).await;
        self.observe("transfer_leader", result)
    }

    async fn transfer_leader_to_server(
        &self,
        id: &str,
        addr: &str,
    ) -> Result<(), ConductorError> {
        let result = self
            .con
            .transfer_leader_to_server(id, addr)
            .instrument(self.log.clone())
            .await;
        self.observe("transfer_leader_to_server", result)
    }

    async fn commit_unsafe_payload(
        &self,
        payload: ExecutionPayload,
    ) -> Result<(), ConductorError> {
        let result = self
            .con
            .commit_unsafe_payload(payload)
            .instrument(self.log.clone())
            .await;
        self.observe("commit_unsafe_payload", result)
    }
}
