//! Certificate trust policy for reaching the gateway.
//!
//! The gateway ships a self-signed certificate. Instead of switching
//! verification off globally, the insecure path is only allowed when the
//! base URL points at the local machine.

use std::net::IpAddr;

use reqwest::{Certificate, ClientBuilder, Url};

use crate::config::{TlsConfig, TlsMode};
use crate::error::ClientBuildError;

/// Whether `url` addresses this machine (`localhost` or a loopback IP).
pub fn is_loopback(url: &Url) -> bool {
    let Some(host) = url.host_str() else {
        return false;
    };
    let host = host.trim_start_matches('[').trim_end_matches(']');

    host.eq_ignore_ascii_case("localhost")
        || host
            .parse::<IpAddr>()
            .map(|ip| ip.is_loopback())
            .unwrap_or(false)
}

/// Apply the configured trust decision to a client builder.
pub fn apply(
    builder: ClientBuilder,
    tls: &TlsConfig,
    base_url: &Url,
) -> Result<ClientBuilder, ClientBuildError> {
    match tls.mode {
        TlsMode::Verify => Ok(builder),
        TlsMode::InsecureLoopback => {
            if !is_loopback(base_url) {
                return Err(ClientBuildError::InsecureNonLoopback(
                    base_url.host_str().unwrap_or_default().to_string(),
                ));
            }
            tracing::debug!(
                "Certificate verification disabled for loopback gateway {}",
                base_url
            );
            Ok(builder.danger_accept_invalid_certs(true))
        }
        TlsMode::CustomCa => {
            let path = tls
                .ca_cert_path
                .as_deref()
                .ok_or(ClientBuildError::MissingCaCert)?;
            let pem = std::fs::read(path).map_err(|e| ClientBuildError::CaCert {
                path: path.to_string(),
                reason: e.to_string(),
            })?;
            let cert = Certificate::from_pem(&pem).map_err(|e| ClientBuildError::CaCert {
                path: path.to_string(),
                reason: e.to_string(),
            })?;
            Ok(builder.add_root_certificate(cert))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Client;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_is_loopback() {
        assert!(is_loopback(&url("https://localhost:5001/v1/api")));
        assert!(is_loopback(&url("https://LOCALHOST:5001/v1/api")));
        assert!(is_loopback(&url("https://127.0.0.1:5001/v1/api")));
        assert!(is_loopback(&url("https://127.8.9.10/")));
        assert!(is_loopback(&url("https://[::1]:5001/v1/api")));

        assert!(!is_loopback(&url("https://api.ibkr.com/v1/api")));
        assert!(!is_loopback(&url("https://192.168.1.20:5001/v1/api")));
        assert!(!is_loopback(&url("https://localhost.example.com/")));
    }

    #[test]
    fn test_insecure_mode_rejects_remote_host() {
        let tls = TlsConfig::default();
        let result = apply(Client::builder(), &tls, &url("https://api.ibkr.com/v1/api"));
        assert!(matches!(
            result,
            Err(ClientBuildError::InsecureNonLoopback(host)) if host == "api.ibkr.com"
        ));
    }

    #[test]
    fn test_insecure_mode_allows_loopback() {
        let tls = TlsConfig::default();
        assert!(apply(Client::builder(), &tls, &url("https://localhost:5001/v1/api")).is_ok());
    }

    #[test]
    fn test_verify_mode_allows_any_host() {
        let tls = TlsConfig {
            mode: TlsMode::Verify,
            ca_cert_path: None,
        };
        assert!(apply(Client::builder(), &tls, &url("https://api.ibkr.com/v1/api")).is_ok());
    }

    #[test]
    fn test_custom_ca_requires_path() {
        let tls = TlsConfig {
            mode: TlsMode::CustomCa,
            ca_cert_path: None,
        };
        let result = apply(Client::builder(), &tls, &url("https://localhost:5001/"));
        assert!(matches!(result, Err(ClientBuildError::MissingCaCert)));
    }

    #[test]
    fn test_custom_ca_unreadable_file() {
        let tls = TlsConfig {
            mode: TlsMode::CustomCa,
            ca_cert_path: Some("/nonexistent/gateway.pem".to_string()),
        };
        let result = apply(Client::builder(), &tls, &url("https://localhost:5001/"));
        assert!(matches!(result, Err(ClientBuildError::CaCert { .. })));
    }
}
