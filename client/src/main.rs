//! ibkr-query - one-shot gateway queries from the terminal.

use std::process::ExitCode;

use clap::{error::ErrorKind, CommandFactory, Parser};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ibkr_client::{display, BrokerageApi, GatewayClient, GatewayConfig};

mod cli;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays parseable
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = GatewayConfig::load(cli.config.as_deref()).map_err(|e| {
        format!(
            "Failed to load configuration: {}. \
             Check ibkr.toml or the IBKR__GATEWAY__* environment variables.",
            e
        )
    })?;

    let endpoint = match cli.operation.endpoint(config.default_account.as_deref()) {
        Ok(endpoint) => endpoint,
        Err(e) => Cli::command()
            .error(ErrorKind::MissingRequiredArgument, e)
            .exit(),
    };

    let client = GatewayClient::new(&config)?;
    tracing::debug!("Querying {} at {}", endpoint.label(), client.base_url());

    match client.fetch(&endpoint).await {
        Ok(payload) => {
            if cli.raw {
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                println!("{}", display::render_text(&endpoint, &payload));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!(
                "error: Failed to retrieve {} ({}: {})",
                endpoint.label(),
                e.kind(),
                e
            );
            Ok(ExitCode::FAILURE)
        }
    }
}
