//! Application state and shared resources.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::rpc::ConductorApi;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,

    /// RPC API served to callers
    pub api: Arc<dyn ConductorApi>,
}

impl AppState {
    pub fn new(config: AppConfig, api: Arc<dyn ConductorApi>) -> Self {
        Self { config, api }
    }
}
