//! CLI command definitions for the `wpilot` binary.
//!
//! Uses clap derive macros for argument parsing. Flags override the values
//! loaded from `config.toml` in the data directory.

pub mod chat;
pub mod wallet;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Chat with an LLM agent that operates your on-chain wallet.
#[derive(Parser)]
#[command(name = "wpilot", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Export spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Port to listen on.
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to.
        #[arg(long)]
        host: Option<String>,

        /// Chat model bound to every agent.
        #[arg(long, env = "WALLETPILOT_MODEL")]
        model: Option<String>,

        /// OpenAI-compatible API base URL.
        #[arg(long)]
        base_url: Option<String>,

        /// Network used when a request does not name one.
        #[arg(long, env = "WALLETPILOT_NETWORK_ID")]
        network: Option<String>,

        /// Directory holding a built web client to serve.
        #[arg(long, env = "WALLETPILOT_WEB_DIR")]
        web_dir: Option<String>,
    },

    /// Chat with the agent through a running server.
    Chat {
        /// Base URL of the WalletPilot server.
        #[arg(long, default_value = "http://127.0.0.1:3000")]
        server: String,
    },

    /// Show the persisted wallet and the agent's actions.
    Wallet,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::parse_from([
            "wpilot",
            "serve",
            "--port",
            "8080",
            "--network",
            "base-mainnet",
        ]);
        match cli.command {
            Commands::Serve { port, network, .. } => {
                assert_eq!(port, Some(8080));
                assert_eq!(network.as_deref(), Some("base-mainnet"));
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["wpilot", "wallet", "--json", "-vv"]);
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Wallet));
    }
}
