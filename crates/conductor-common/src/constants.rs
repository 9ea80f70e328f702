//! Shared constants for conductor components.

/// Default JSON-RPC HTTP listen address
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8547";

/// Default advertised consensus address of this server
pub const DEFAULT_SERVER_ADDR: &str = "127.0.0.1:50050";

/// Maximum accepted JSON-RPC request body (5 MiB)
pub const DEFAULT_MAX_BODY_BYTES: usize = 5 * 1024 * 1024;

/// Maximum number of calls in a single JSON-RPC batch
pub const DEFAULT_MAX_BATCH_SIZE: usize = 1000;

/// JSON-RPC method names
pub mod methods {
    pub const ACTIVE: &str = "conductor_active";
    pub const PAUSE: &str = "conductor_pause";
    pub const RESUME: &str = "conductor_resume";
    pub const LEADER: &str = "conductor_leader";
    pub const LEADER_WITH_ID: &str = "conductor_leaderWithID";
    pub const ADD_SERVER_AS_VOTER: &str = "conductor_addServerAsVoter";
    pub const ADD_SERVER_AS_NONVOTER: &str = "conductor_addServerAsNonvoter";
    pub const REMOVE_SERVER: &str = "conductor_removeServer";
    pub const TRANSFER_LEADER: &str = "conductor_transferLeader";
    pub const TRANSFER_LEADER_TO_SERVER: &str = "conductor_transferLeaderToServer";
    pub const COMMIT_UNSAFE_PAYLOAD: &str = "conductor_commitUnsafePayload";
}

/// JSON-RPC 2.0 error codes
pub mod rpc_codes {
    /// Invalid JSON was received
    pub const PARSE_ERROR: i32 = -32700;

    /// The JSON sent is not a valid request object
    pub const INVALID_REQUEST: i32 = -32600;

    /// The method does not exist
    pub const METHOD_NOT_FOUND: i32 = -32601;

    /// Invalid method parameters
    pub const INVALID_PARAMS: i32 = -32602;

    /// Internal JSON-RPC error
    pub const INTERNAL_ERROR: i32 = -32603;

    /// Any error returned by the conductor itself
    pub const SERVER_ERROR: i32 = -32000;
}
