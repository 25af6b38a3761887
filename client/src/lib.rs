//! IBKR Client Portal gateway client.
//!
//! Issues single GET round-trips against the locally running gateway and
//! returns the decoded JSON payload untouched, or a [`GatewayError`] that
//! callers may collapse to `None`.

pub mod api;
pub mod client;
pub mod config;
pub mod display;
pub mod endpoint;
pub mod error;
pub mod tls;

pub use api::BrokerageApi;
pub use client::GatewayClient;
pub use config::{GatewayConfig, TlsConfig, TlsMode};
pub use endpoint::Endpoint;
pub use error::{ClientBuildError, FailureKind, GatewayError, Result};
