//! IBKR web console - serves the dashboard page and proxies gateway calls.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ibkr_client::GatewayClient;
use ibkr_web::{app, AppState, WebConfig};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Web console for a Client Portal gateway
#[derive(Debug, Parser)]
#[command(name = "ibkr-web", version)]
struct Args {
    /// Configuration file (default: ./ibkr.toml if present)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration
    let config = WebConfig::load(args.config.as_deref()).map_err(|e| {
        format!(
            "Failed to load configuration: {}. \
             Check ibkr.toml or the IBKR__SECTION__KEY environment variables.",
            e
        )
    })?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting ibkr-web {}", VERSION);

    let client = GatewayClient::new(&config.gateway)?;
    tracing::info!(
        "Gateway at {} (tls mode: {:?})",
        client.base_url(),
        config.gateway.tls.mode
    );

    let state = Arc::new(AppState::new(
        Arc::new(client),
        config.gateway.default_account.clone(),
    ));

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Listening on http://{}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_args() {
        let args = Args::try_parse_from(["ibkr-web", "--config", "/etc/ibkr.toml"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("/etc/ibkr.toml")));

        assert!(Args::try_parse_from(["ibkr-web"]).unwrap().config.is_none());
        assert_eq!(
            Args::try_parse_from(["ibkr-web", "-V"]).unwrap_err().kind(),
            ErrorKind::DisplayVersion
        );
        assert!(Args::try_parse_from(["ibkr-web", "--config"]).is_err());
    }
}
