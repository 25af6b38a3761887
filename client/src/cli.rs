//! Command-line interface for `ibkr-query`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ibkr_client::Endpoint;

/// One-shot queries against a running Client Portal gateway
#[derive(Debug, Parser)]
#[command(name = "ibkr-query", version)]
#[command(after_help = "ACCOUNT defaults to gateway.default_account from ibkr.toml \
                        or IBKR__GATEWAY__DEFAULT_ACCOUNT.")]
pub struct Cli {
    /// Print the payload as pretty JSON instead of the formatted view
    #[arg(long, global = true)]
    pub raw: bool,

    /// Configuration file (default: ./ibkr.toml if present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub operation: Operation,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Operation {
    /// Portfolio summary (portfolio/{account}/summary)
    PortfolioSummary { account: Option<String> },

    /// Account summary (iserver/account/{account}/summary)
    AccountSummary { account: Option<String> },

    /// Accounts visible to the session (iserver/accounts)
    Accounts,

    /// Session authentication status (iserver/auth/status)
    AuthStatus,

    /// Contract details (iserver/contract/{conid}/info)
    ContractInfo { conid: String },
}

impl Operation {
    /// Resolve to an endpoint, falling back to `default_account`.
    pub fn endpoint(&self, default_account: Option<&str>) -> Result<Endpoint, String> {
        let account = |given: &Option<String>, name: &str| {
            given
                .as_deref()
                .or(default_account)
                .map(str::to_string)
                .ok_or_else(|| {
                    format!("{} needs an ACCOUNT argument or gateway.default_account", name)
                })
        };

        match self {
            Operation::PortfolioSummary { account: given } => {
                Ok(Endpoint::portfolio_summary(account(given, "portfolio-summary")?))
            }
            Operation::AccountSummary { account: given } => {
                Ok(Endpoint::account_summary(account(given, "account-summary")?))
            }
            Operation::Accounts => Ok(Endpoint::Accounts),
            Operation::AuthStatus => Ok(Endpoint::AuthStatus),
            Operation::ContractInfo { conid } => Ok(Endpoint::contract_info(conid.as_str())),
        }
    }
}
