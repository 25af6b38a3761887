//! HTTP client for the Client Portal gateway.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderValue;
use reqwest::{Client, Url};
use serde_json::Value;

use crate::api::BrokerageApi;
use crate::config::GatewayConfig;
use crate::endpoint::Endpoint;
use crate::error::{ClientBuildError, GatewayError, Result};
use crate::tls;

/// Gateway client.
///
/// Holds only immutable settings and a connection pool, so one instance can
/// serve concurrent calls without locking.
pub struct GatewayClient {
    http_client: Client,
    base_url: Url,
    user_agent: HeaderValue,
}

impl GatewayClient {
    pub fn new(config: &GatewayConfig) -> std::result::Result<Self, ClientBuildError> {
        let raw = config.base_url.trim_end_matches('/');
        let base_url = Url::parse(raw).map_err(|e| ClientBuildError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(ClientBuildError::InvalidBaseUrl {
                url: config.base_url.clone(),
                reason: "expected an http(s) URL".to_string(),
            });
        }

        let user_agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|e| ClientBuildError::InvalidUserAgent(e.to_string()))?;

        let builder = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(user_agent.clone());
        let http_client = tls::apply(builder, &config.tls, &base_url)?
            .build()
            .map_err(|e| ClientBuildError::Http(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url,
            user_agent,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve `endpoint` against the base URL.
    pub fn url_for(&self, endpoint: &Endpoint) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `new`: the base URL can be a base.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(endpoint.segments());
        }
        url
    }

    async fn round_trip(&self, endpoint: &Endpoint) -> Result<Value> {
        let url = self.url_for(endpoint);

        let response = self
            .http_client
            .get(url)
            .headers(endpoint.headers(&self.user_agent))
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        serde_json::from_slice(&bytes).map_err(|e| GatewayError::Decode(e.to_string()))
    }
}

#[async_trait]
impl BrokerageApi for GatewayClient {
    async fn fetch(&self, endpoint: &Endpoint) -> Result<Value> {
        tracing::debug!("GET {} ({})", endpoint.path(), endpoint.label());

        let result = self.round_trip(endpoint).await;
        match &result {
            Ok(_) => tracing::debug!("Fetched {}", endpoint.label()),
            Err(e) => tracing::warn!(
                endpoint = %endpoint.path(),
                kind = %e.kind(),
                "Failed to retrieve {}: {}",
                endpoint.label(),
                e
            ),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> GatewayClient {
        GatewayClient::new(&GatewayConfig::with_base_url(base_url)).unwrap()
    }

    #[test]
    fn test_base_url_normalization() {
        let client = client("https://localhost:5001/v1/api/");
        assert_eq!(client.base_url().as_str(), "https://localhost:5001/v1/api");
    }

    #[test]
    fn test_url_for_joins_segments() {
        let client = client("https://localhost:5001/v1/api");
        assert_eq!(
            client.url_for(&Endpoint::portfolio_summary("U111")).as_str(),
            "https://localhost:5001/v1/api/portfolio/U111/summary"
        );
        assert_eq!(
            client.url_for(&Endpoint::Accounts).as_str(),
            "https://localhost:5001/v1/api/iserver/accounts"
        );
    }

    #[test]
    fn test_url_for_encodes_identifiers() {
        let client = client("https://localhost:5001/v1/api");
        let url = client.url_for(&Endpoint::contract_info("12/../../x"));
        assert_eq!(
            url.as_str(),
            "https://localhost:5001/v1/api/iserver/contract/12%2F..%2F..%2Fx/info"
        );
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        let result = GatewayClient::new(&GatewayConfig::with_base_url("not a url"));
        assert!(matches!(result, Err(ClientBuildError::InvalidBaseUrl { .. })));

        let result = GatewayClient::new(&GatewayConfig::with_base_url("mailto:ops@example.com"));
        assert!(matches!(result, Err(ClientBuildError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn test_default_config_refuses_remote_insecure() {
        let result = GatewayClient::new(&GatewayConfig::with_base_url("https://api.ibkr.com/v1/api"));
        assert!(matches!(result, Err(ClientBuildError::InsecureNonLoopback(_))));
    }
}
