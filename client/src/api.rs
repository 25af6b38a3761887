//! Brokerage API abstraction.
//!
//! `BrokerageApi` is the seam presentation layers depend on. The gateway
//! client implements it over HTTP; tests substitute their own.

use async_trait::async_trait;
use serde_json::Value;

use crate::endpoint::Endpoint;
use crate::error::Result;

#[async_trait]
pub trait BrokerageApi: Send + Sync {
    /// Perform one round-trip for `endpoint` and return the decoded payload.
    async fn fetch(&self, endpoint: &Endpoint) -> Result<Value>;

    /// Payload or the absence value; `None` never stands for a JSON `null`.
    async fn fetch_optional(&self, endpoint: &Endpoint) -> Option<Value> {
        self.fetch(endpoint).await.ok()
    }

    async fn portfolio_summary(&self, account_id: &str) -> Result<Value> {
        self.fetch(&Endpoint::portfolio_summary(account_id)).await
    }

    async fn account_summary(&self, account_id: &str) -> Result<Value> {
        self.fetch(&Endpoint::account_summary(account_id)).await
    }

    async fn accounts(&self) -> Result<Value> {
        self.fetch(&Endpoint::Accounts).await
    }

    async fn auth_status(&self) -> Result<Value> {
        self.fetch(&Endpoint::AuthStatus).await
    }

    async fn contract_info(&self, conid: &str) -> Result<Value> {
        self.fetch(&Endpoint::contract_info(conid)).await
    }
}
