//! Configuration for the web console.

use std::path::Path;

use config::ConfigError;
use ibkr_client::GatewayConfig;
use serde::Deserialize;

/// Main configuration structure for the web console.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct WebConfig {
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when RUST_LOG is unset.
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

// Default values
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    5000
}
fn default_level() -> String {
    "info".to_string()
}

impl WebConfig {
    /// Load configuration from `ibkr.toml` (or `path`) and IBKR__* variables.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        ibkr_client::config::layered(path)?.try_deserialize()
    }
}
