//! Configuration management for the conductor service.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use conductor_common::constants::{
    DEFAULT_LISTEN_ADDR, DEFAULT_MAX_BATCH_SIZE, DEFAULT_MAX_BODY_BYTES, DEFAULT_SERVER_ADDR,
};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// JSON-RPC HTTP listen address
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// This server's cluster ID (auto-generated if not set)
    #[serde(default = "generate_server_id")]
    pub server_id: String,

    /// Consensus address advertised to the cluster
    #[serde(default = "default_server_addr")]
    pub server_addr: String,

    /// Start with the conductor paused
    #[serde(default)]
    pub start_paused: bool,

    /// JSON-RPC transport configuration
    #[serde(default)]
    pub rpc: RpcConfig,
}

/// JSON-RPC transport limits
#[derive(Debug, Clone, Deserialize)]
pub struct RpcConfig {
    /// Largest accepted request body in bytes
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// Most calls accepted in one batch
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: default_max_body_bytes(),
            max_batch_size: default_max_batch_size(),
        }
    }
}

// Default value functions
fn default_listen_addr() -> String { DEFAULT_LISTEN_ADDR.to_string() }
fn default_server_addr() -> String { DEFAULT_SERVER_ADDR.to_string() }
fn default_max_body_bytes() -> usize { DEFAULT_MAX_BODY_BYTES }
fn default_max_batch_size() -> usize { DEFAULT_MAX_BATCH_SIZE }

fn generate_server_id() -> String {
    use rand::Rng;
    let mut rng = rand::rng();
    format!("conductor-{:08x}", rng.random::<u32>())
}

impl AppConfig {
    /// Load configuration from file, with CLI overrides
    pub fn load(config_path: &str, args: &super::Args) -> Result<Self> {
        let mut config = if Path::new(config_path).exists() {
            let settings = config::Config::builder()
                .add_source(config::File::with_name(config_path))
                .build()
                .context("Failed to load config file")?;

            settings
                .try_deserialize()
                .context("Failed to parse config")?
        } else {
            // Use defaults if config file doesn't exist
            tracing::warn!(path = %config_path, "Config file not found, using defaults");
            Self::default()
        };

        // Apply CLI overrides
        if let Some(ref listen) = args.listen {
            config.listen_addr = listen.clone();
        }
        if let Some(ref server_id) = args.server_id {
            config.server_id = server_id.clone();
        }
        if let Some(ref server_addr) = args.server_addr {
            config.server_addr = server_addr.clone();
        }
        if args.paused {
            config.start_paused = true;
        }

        Ok(config)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            server_id: generate_server_id(),
            server_addr: default_server_addr(),
            start_paused: false,
            rpc: RpcConfig::default(),
        }
    }
}
