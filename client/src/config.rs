//! Gateway connection configuration.

use std::path::Path;

use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;

/// Base name of the optional configuration file (`ibkr.toml`).
pub const CONFIG_FILE: &str = "ibkr";

/// Environment prefix; keys use the `IBKR__SECTION__KEY` format.
pub const ENV_PREFIX: &str = "IBKR";

pub const DEFAULT_BASE_URL: &str = "https://localhost:5001/v1/api";

/// How the client decides to trust the gateway's certificate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TlsMode {
    /// Standard certificate verification against the system roots.
    Verify,
    /// Skip certificate verification, but only for loopback hosts.
    #[default]
    InsecureLoopback,
    /// Trust the PEM certificate at `ca_cert_path` in addition to system roots.
    CustomCa,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TlsConfig {
    #[serde(default)]
    pub mode: TlsMode,
    /// PEM file used by `custom_ca`; typically the gateway's own certificate.
    #[serde(default)]
    pub ca_cert_path: Option<String>,
}

/// Connection settings for the Client Portal gateway.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Account used when a caller does not name one.
    #[serde(default)]
    pub default_account: Option<String>,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default)]
    pub tls: TlsConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            default_account: None,
            timeout_secs: default_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            user_agent: default_user_agent(),
            tls: TlsConfig::default(),
        }
    }
}

impl GatewayConfig {
    /// Config pointing at `base_url` with every other field defaulted.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Load the `[gateway]` section.
    ///
    /// See [`layered`] for source precedence.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        #[derive(Deserialize)]
        struct Sections {
            #[serde(default)]
            gateway: GatewayConfig,
        }

        let sections: Sections = layered(path)?.try_deserialize()?;
        Ok(sections.gateway)
    }
}

// Default values
fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_timeout() -> u64 {
    10
}
fn default_connect_timeout() -> u64 {
    5
}
fn default_user_agent() -> String {
    format!("ibkr-client/{}", env!("CARGO_PKG_VERSION"))
}

/// Build the layered configuration shared by every binary in the workspace.
///
/// Configuration sources (in order of precedence):
/// 1. Environment variables (IBKR__SECTION__KEY format)
/// 2. The file at `path`, or `ibkr.toml` in the working directory if present
/// 3. Built-in defaults
pub fn layered(path: Option<&Path>) -> Result<ConfigLoader, ConfigError> {
    let file = match path {
        Some(path) => File::from(path).required(true),
        None => File::with_name(CONFIG_FILE).required(false),
    };

    ConfigLoader::builder()
        .add_source(file)
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_gateway_config() {
        let config = GatewayConfig::default();
        assert_eq!(config.base_url, "https://localhost:5001/v1/api");
        assert_eq!(config.default_account, None);
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.connect_timeout_secs, 5);
        assert!(config.user_agent.starts_with("ibkr-client/"));
        assert_eq!(config.tls.mode, TlsMode::InsecureLoopback);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(
            file,
            r#"
[gateway]
base_url = "https://127.0.0.1:5000/v1/api"
default_account = "U9999"
timeout_secs = 3

[gateway.tls]
mode = "custom_ca"
ca_cert_path = "/etc/ibkr/gateway.pem"
"#
        )
        .unwrap();

        let config = GatewayConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.base_url, "https://127.0.0.1:5000/v1/api");
        assert_eq!(config.default_account.as_deref(), Some("U9999"));
        assert_eq!(config.timeout_secs, 3);
        assert_eq!(config.connect_timeout_secs, 5);
        assert_eq!(config.tls.mode, TlsMode::CustomCa);
        assert_eq!(config.tls.ca_cert_path.as_deref(), Some("/etc/ibkr/gateway.pem"));
    }

    #[test]
    fn test_missing_section_uses_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(file, "[server]\nport = 9000\n").unwrap();

        let config = GatewayConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let result = GatewayConfig::load(Some(Path::new("/nonexistent/ibkr.toml")));
        assert!(result.is_err());
    }
}
