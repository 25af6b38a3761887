//! Error types for the web console.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use ibkr_client::GatewayError;
use serde_json::json;

/// Error returned by the proxy routes.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Failed to retrieve {label}")]
    Upstream {
        label: &'static str,
        #[source]
        source: GatewayError,
    },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, detail) = match &self {
            ApiError::Upstream { source, .. } => (
                StatusCode::BAD_GATEWAY,
                source.kind().as_str(),
                source.to_string(),
            ),
        };

        let body = Json(json!({
            "error": {
                "type": error_type,
                "message": self.to_string(),
                "detail": detail
            }
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
