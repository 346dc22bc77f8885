//! `wpilot wallet`: show the persisted wallet and the agent's actions.
//!
//! Reads the wallet record only. The private key is never printed.

use std::path::Path;

use anyhow::Result;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use console::style;

use walletpilot_infra::wallet::store::WalletStore;
use walletpilot_types::config::ServerConfig;
use walletpilot_types::wallet::ActionCapability;

/// Print the wallet summary.
pub async fn show_wallet(data_dir: &Path, config: &ServerConfig, json: bool) -> Result<()> {
    let store = WalletStore::new(data_dir);
    let record = store.load().await?;
    let address = record
        .as_ref()
        .map(|r| r.wallet_address.trim())
        .filter(|a| !a.is_empty());
    let has_key = record
        .as_ref()
        .and_then(|r| r.private_key.as_deref())
        .is_some_and(|k| !k.trim().is_empty());

    if json {
        let actions: Vec<_> = ActionCapability::ALL
            .iter()
            .map(|a| {
                serde_json::json!({
                    "name": a.name(),
                    "description": a.description(),
                    "mutating": a.is_mutating(),
                })
            })
            .collect();
        let summary = serde_json::json!({
            "record": store.path().display().to_string(),
            "wallet_address": address,
            "has_private_key": has_key,
            "default_network": config.default_network.as_str(),
            "chain_id": config.default_network.chain_id(),
            "actions": actions,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!();
    match address {
        Some(address) => {
            println!(
                "  {}  {}",
                style("Wallet:").bold(),
                style(address).cyan()
            );
            if !has_key {
                println!(
                    "  {} record has no private key; set WALLETPILOT_SIGNING_KEY to the matching key",
                    style("!").yellow().bold()
                );
            }
        }
        None => {
            println!(
                "  {}  {}",
                style("Wallet:").bold(),
                style("none yet (created on the first agent request)").dim()
            );
        }
    }
    println!(
        "  {}  {}",
        style("Record:").bold(),
        style(store.path().display()).dim()
    );
    println!(
        "  {} {} (chain {})",
        style("Network:").bold(),
        config.default_network,
        config.default_network.chain_id()
    );
    println!();
    println!("{}", actions_table());
    println!();

    Ok(())
}

fn actions_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Action", "Description", "Moves funds"]);

    for action in ActionCapability::ALL {
        let mutating = if action.is_mutating() {
            Cell::new("yes").fg(Color::Yellow)
        } else {
            Cell::new("no")
        };
        table.add_row(vec![
            Cell::new(action.name()),
            Cell::new(action.description()),
            mutating,
        ]);
    }

    table
}
