//! # Conductor Common
//!
//! Shared types, errors, and constants used across conductor components.
//!
//! ## Modules
//! - `types` - Wire data structures (ServerInfo, ExecutionPayload, etc.)
//! - `error` - Errors raised by a conductor
//! - `constants` - Defaults, JSON-RPC method names and error codes

pub mod constants;
pub mod error;
pub mod types;

pub use error::ConductorError;
pub use types::*;
