//! Error types for gateway calls and client construction.

/// Coarse classification of a failed gateway call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Connection refused, DNS failure, TLS handshake, timeout.
    Transport,
    /// The gateway answered with a non-2xx status.
    Status,
    /// The body was not valid JSON.
    Decode,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Transport => "gateway_unreachable",
            FailureKind::Status => "gateway_error",
            FailureKind::Decode => "invalid_payload",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of a single gateway round-trip.
///
/// Callers that only need "payload or nothing" should use `Result::ok`;
/// the variants are kept for logging and for error bodies.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Gateway unreachable: {0}")]
    Transport(String),

    #[error("Gateway returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid JSON payload: {0}")]
    Decode(String),
}

impl GatewayError {
    pub fn kind(&self) -> FailureKind {
        match self {
            GatewayError::Transport(_) => FailureKind::Transport,
            GatewayError::Status { .. } => FailureKind::Status,
            GatewayError::Decode(_) => FailureKind::Decode,
        }
    }
}

/// Errors raised while building a [`crate::GatewayClient`] from configuration.
#[derive(Debug, thiserror::Error)]
pub enum ClientBuildError {
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Refusing to skip certificate verification for non-loopback host '{0}'")]
    InsecureNonLoopback(String),

    #[error("TLS mode custom_ca requires tls.ca_cert_path")]
    MissingCaCert,

    #[error("Failed to load CA certificate {path}: {reason}")]
    CaCert { path: String, reason: String },

    #[error("Invalid user agent: {0}")]
    InvalidUserAgent(String),

    #[error("Failed to build HTTP client: {0}")]
    Http(String),
}

pub type Result<T> = std::result::Result<T, GatewayError>;
