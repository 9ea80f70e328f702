//! Scriptable conductor double for unit tests.

use async_trait::async_trait;
use conductor_common::{ConductorError, ExecutionPayload};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use super::Conductor;

/// A call received by the stub, with its arguments
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Pause,
    Resume,
    AddVoter(String, String),
    AddNonvoter(String, String),
    RemoveServer(String),
    TransferLeader,
    TransferLeaderTo(String, String),
    CommitUnsafePayload(ExecutionPayload),
}

/// Conductor whose answers are set by the test
#[derive(Default)]
pub struct StubConductor {
    pub stopped: AtomicBool,
    pub paused: AtomicBool,
    pub leader: AtomicBool,
    leader_id: Mutex<(String, String)>,
    failure: Mutex<Option<ConductorError>>,
    calls: Mutex<Vec<Call>>,
    pub stopped_reads: AtomicUsize,
    pub paused_reads: AtomicUsize,
}

impl StubConductor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_flags(stopped: bool, paused: bool) -> Self {
        let stub = Self::new();
        stub.stopped.store(stopped, Ordering::SeqCst);
        stub.paused.store(paused, Ordering::SeqCst);
        stub
    }

    pub fn set_leader_id(&self, id: &str, addr: &str) {
        *self.leader_id.lock().unwrap() = (id.to_string(), addr.to_string());
    }

    /// Make every mutating call fail with `err`
    pub fn fail_with(&self, err: ConductorError) {
        *self.failure.lock().unwrap() = Some(err);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<(), ConductorError> {
        self.calls.lock().unwrap().push(call);
        match self.failure.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl Conductor for StubConductor {
    async fn pause(&self) -> Result<(), ConductorError> {
        self.record(Call::Pause)
    }

    async fn resume(&self) -> Result<(), ConductorError> {
        self.record(Call::Resume)
    }

    fn paused(&self) -> bool {
        self.paused_reads.fetch_add(1, Ordering::SeqCst);
        self.paused.load(Ordering::SeqCst)
    }

    fn stopped(&self) -> bool {
        self.stopped_reads.fetch_add(1, Ordering::SeqCst);
        self.stopped.load(Ordering::SeqCst)
    }

    async fn leader(&self) -> bool {
        self.leader.load(Ordering::SeqCst)
    }

    async fn leader_with_id(&self) -> (String, String) {
        self.leader_id.lock().unwrap().clone()
    }

    async fn add_server_as_voter(&self, id: &str, addr: &str) -> Result<(), ConductorError> {
        self.record(Call::AddVoter(id.to_string(), addr.to_string()))
    }

    async fn add_server_as_nonvoter(&self, id: &str, addr: &str) -> Result<(), ConductorError> {
        self.record(Call::AddNonvoter(id.to_string(), addr.to_string()))
    }

    async fn remove_server(&self, id: &str) -> Result<(), ConductorError> {
        self.record(Call::RemoveServer(id.to_string()))
    }

    async fn transfer_leader(&self) -> Result<(), ConductorError> {
        self.record(Call::TransferLeader)
    }

    async fn transfer_leader_to_server(
        &self,
        id: &str,
        addr: &str,
    ) -> Result<(), ConductorError> {
        self.record(Call::TransferLeaderTo(id.to_string(), addr.to_string()))
    }

    async fn commit_unsafe_payload(
        &self,
        payload: ExecutionPayload,
    ) -> Result<(), ConductorError> {
        self.record(Call::CommitUnsafePayload(payload))
    }
}

/// A minimal Cancun-era payload
pub fn sample_payload() -> ExecutionPayload {
    ExecutionPayload {
        parent_hash: "0x9a0c6f1e8d3b2a4c5e7f8091a2b3c4d5e6f708192a3b4c5d6e7f8091a2b3c4d5".to_string(),
        fee_recipient: "0x4200000000000000000000000000000000000011".to_string(),
        state_root: "0x1f2e3d4c5b6a79880f1e2d3c4b5a69788f9e0d1c2b3a49586f7e8d9c0b1a2938".to_string(),
        receipts_root: "0x56e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421".to_string(),
        logs_bloom: format!("0x{}", "0".repeat(512)),
        prev_randao: "0x2b3c4d5e6f708192a3b4c5d6e7f8091a2b3c4d5e6f708192a3b4c5d6e7f80910".to_string(),
        block_number: "0x7b".to_string(),
        gas_limit: "0x1c9c380".to_string(),
        gas_used: "0xb6e4".to_string(),
        timestamp: "0x65f1e2a0".to_string(),
        extra_data: "0x".to_string(),
        base_fee_per_gas: "0xfc".to_string(),
        block_hash: "0x3c4d5e6f708192a3b4c5d6e7f8091a2b3c4d5e6f708192a3b4c5d6e7f8091a2b".to_string(),
        transactions: vec!["0x7ef8f8a0".to_string()],
        withdrawals: Some(vec![]),
        blob_gas_used: Some("0x0".to_string()),
        excess_blob_gas: Some("0x0".to_string()),
        withdrawals_root: None,
        extra: serde_json::Map::new(),
    }
}
