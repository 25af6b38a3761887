//! IBKR web console - proxies the Client Portal gateway to a browser page.

pub mod config;
pub mod error;
pub mod logging;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::routing::get;
use axum::{middleware, Router};
use tower_http::cors::CorsLayer;

pub use config::WebConfig;
pub use state::AppState;

/// Build the full application router.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::page::index))
        .route("/health", get(routes::health::health))
        .nest("/api", routes::api::router())
        .layer(middleware::from_fn(logging::request_logger))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
