//! Typed descriptors for the gateway endpoints this client calls.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONNECTION, HOST, USER_AGENT};

/// Host the gateway expects on session-sensitive calls.
pub const AUTH_HOST_OVERRIDE: &str = "api.ibkr.com";

/// One gateway operation, resolved against the configured base URL per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// `portfolio/{account_id}/summary`
    PortfolioSummary { account_id: String },
    /// `iserver/account/{account_id}/summary`
    AccountSummary { account_id: String },
    /// `iserver/accounts`
    Accounts,
    /// `iserver/auth/status`
    AuthStatus,
    /// `iserver/contract/{conid}/info`
    ContractInfo { conid: String },
}

impl Endpoint {
    pub fn portfolio_summary(account_id: impl Into<String>) -> Self {
        Endpoint::PortfolioSummary {
            account_id: account_id.into(),
        }
    }

    pub fn account_summary(account_id: impl Into<String>) -> Self {
        Endpoint::AccountSummary {
            account_id: account_id.into(),
        }
    }

    pub fn contract_info(conid: impl Into<String>) -> Self {
        Endpoint::ContractInfo {
            conid: conid.into(),
        }
    }

    /// Path segments relative to the base URL.
    ///
    /// Identifiers are passed through as single segments; the URL builder
    /// percent-encodes them, so a stray `/` cannot address another endpoint.
    pub fn segments(&self) -> Vec<&str> {
        match self {
            Endpoint::PortfolioSummary { account_id } => vec!["portfolio", account_id.as_str(), "summary"],
            Endpoint::AccountSummary { account_id } => {
                vec!["iserver", "account", account_id.as_str(), "summary"]
            }
            Endpoint::Accounts => vec!["iserver", "accounts"],
            Endpoint::AuthStatus => vec!["iserver", "auth", "status"],
            Endpoint::ContractInfo { conid } => vec!["iserver", "contract", conid.as_str(), "info"],
        }
    }

    /// Unencoded relative path, for logs.
    pub fn path(&self) -> String {
        self.segments().join("/")
    }

    /// Human-readable name used in log lines and error messages.
    pub fn label(&self) -> &'static str {
        match self {
            Endpoint::PortfolioSummary { .. } => "portfolio summary",
            Endpoint::AccountSummary { .. } => "account summary",
            Endpoint::Accounts => "accounts",
            Endpoint::AuthStatus => "authentication status",
            Endpoint::ContractInfo { .. } => "contract info",
        }
    }

    /// Extra request headers for this endpoint.
    ///
    /// The auth status check carries a fixed header set with a host override
    /// and an explicit user agent; every other call uses client defaults.
    pub fn headers(&self, user_agent: &HeaderValue) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Endpoint::AuthStatus = self {
            headers.insert(HOST, HeaderValue::from_static(AUTH_HOST_OVERRIDE));
            headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
            headers.insert(USER_AGENT, user_agent.clone());
            headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
        }
        headers
    }
}
