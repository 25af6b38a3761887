//! Shared application state.

use std::sync::Arc;

use ibkr_client::BrokerageApi;

/// Shared application state passed to all handlers.
pub struct AppState {
    pub api: Arc<dyn BrokerageApi>,
    /// Prefills the account field of the page.
    pub default_account: Option<String>,
}

impl AppState {
    pub fn new(api: Arc<dyn BrokerageApi>, default_account: Option<String>) -> Self {
        Self {
            api,
            default_account,
        }
    }
}
