//! WalletPilot CLI and REST API entry point.
//!
//! Binary name: `wpilot`
//!
//! Parses CLI arguments, loads configuration from the data directory, then
//! starts the REST API server or runs one of the client commands.

mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;

use walletpilot_infra::config::load_server_config;
use walletpilot_infra::filesystem::resolve_data_dir;
use walletpilot_observe::tracing_setup::{TracingOptions, init_tracing, shutdown_tracing};
use walletpilot_types::config::ServerConfig;
use walletpilot_types::credential::NetworkId;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Shell completions don't need tracing or config
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "wpilot", &mut std::io::stdout());
        return Ok(());
    }

    let default_filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 if matches!(cli.command, Commands::Serve { .. }) => "info",
        0 => "warn",
        1 => "info,walletpilot_core=debug,walletpilot_infra=debug,wpilot=debug",
        _ => "trace",
    };
    init_tracing(&TracingOptions {
        default_filter: default_filter.to_string(),
        json: cli.json_logs,
        enable_otel: cli.otel,
    })
    .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let data_dir = resolve_data_dir();
    let mut config = load_server_config(&data_dir).await;

    let result = match cli.command {
        Commands::Serve {
            port,
            host,
            model,
            base_url,
            network,
            web_dir,
        } => {
            apply_overrides(&mut config, port, host, model, base_url, network, web_dir)?;
            serve(config, &data_dir).await
        }

        Commands::Chat { server } => cli::chat::loop_runner::run_chat_loop(&server).await,

        Commands::Wallet => cli::wallet::show_wallet(&data_dir, &config, cli.json).await,

        Commands::Completions { .. } => unreachable!("handled above"),
    };

    shutdown_tracing();
    result
}

fn apply_overrides(
    config: &mut ServerConfig,
    port: Option<u16>,
    host: Option<String>,
    model: Option<String>,
    base_url: Option<String>,
    network: Option<String>,
    web_dir: Option<String>,
) -> anyhow::Result<()> {
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(model) = model.filter(|m| !m.trim().is_empty()) {
        config.model = model;
    }
    if let Some(base_url) = base_url {
        config.llm_base_url = base_url;
    }
    if let Some(network) = network.filter(|n| !n.trim().is_empty()) {
        config.default_network = network.parse::<NetworkId>().map_err(anyhow::Error::msg)?;
    }
    if web_dir.is_some() {
        config.web_dir = web_dir;
    }
    Ok(())
}

async fn serve(config: ServerConfig, data_dir: &std::path::Path) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let state = AppState::init(config, data_dir).await?;
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    println!(
        "  {} WalletPilot API listening on {}",
        console::style("⚡").bold(),
        console::style(format!("http://{addr}")).cyan()
    );
    println!("  {}", console::style("Press Ctrl+C to stop").dim());

    let router = http::router::build_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    println!("\n  Server stopped.");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_replace_file_values() {
        let mut config = ServerConfig::default();
        apply_overrides(
            &mut config,
            Some(8080),
            None,
            Some("gpt-4o".to_string()),
            None,
            Some("base-mainnet".to_string()),
            None,
        )
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.default_network, NetworkId::Mainnet);
    }

    #[test]
    fn test_unknown_network_override_fails() {
        let mut config = ServerConfig::default();
        let err = apply_overrides(
            &mut config,
            None,
            None,
            None,
            None,
            Some("ethereum".to_string()),
            None,
        );
        assert!(err.is_err());
    }
}
