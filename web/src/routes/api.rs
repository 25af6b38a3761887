//! JSON proxy routes, one per gateway operation.
//!
//! Each route performs exactly one gateway call and returns its payload
//! verbatim. Any failure becomes a 502 with a structured error body; a
//! successful empty payload (`{}`, `[]`, `null`) is still a success.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use ibkr_client::Endpoint;
use serde::Serialize;
use serde_json::Value;

use crate::error::{ApiError, Result};
use crate::state::AppState;

/// Build the API router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/portfolio-summary/:account_id", get(portfolio_summary))
        .route("/account-summary/:account_id", get(account_summary))
        .route("/accounts", get(accounts))
        .route("/auth-status", get(auth_status))
        .route("/contract-info/:conid", get(contract_info))
        .route("/default-account", get(default_account))
}

async fn proxy(state: &AppState, endpoint: Endpoint) -> Result<Json<Value>> {
    state
        .api
        .fetch(&endpoint)
        .await
        .map(Json)
        .map_err(|source| ApiError::Upstream {
            label: endpoint.label(),
            source,
        })
}

/// GET /api/portfolio-summary/:account_id
async fn portfolio_summary(
    State(state): State<Arc<AppState>>,
    Path(account_id): Path<String>,
) -> Result<Json<Value>> {
    proxy(&state, Endpoint::portfolio_summary(account_id)).await
}

/// GET /api/account-summary/:account_id
async fn account_summary(
    State(state): State<Arc<AppState>>,
    Path(account_id): Path<String>,
) -> Result<Json<Value>> {
    proxy(&state, Endpoint::account_summary(account_id)).await
}

/// GET /api/accounts
async fn accounts(State(state): State<Arc<AppState>>) -> Result<Json<Value>> {
    proxy(&state, Endpoint::Accounts).await
}

/// GET /api/auth-status
async fn auth_status(State(state): State<Arc<AppState>>) -> Result<Json<Value>> {
    proxy(&state, Endpoint::AuthStatus).await
}

/// GET /api/contract-info/:conid
async fn contract_info(
    State(state): State<Arc<AppState>>,
    Path(conid): Path<String>,
) -> Result<Json<Value>> {
    proxy(&state, Endpoint::contract_info(conid)).await
}

#[derive(Debug, Serialize)]
struct DefaultAccountResponse {
    account_id: Option<String>,
}

/// GET /api/default-account
async fn default_account(State(state): State<Arc<AppState>>) -> Json<DefaultAccountResponse> {
    Json(DefaultAccountResponse {
        account_id: state.default_account.clone(),
    })
}
