//! Welcome banner display for chat sessions.

use console::style;

/// Print the banner shown once the credentials are accepted.
pub fn print_welcome_banner(server: &str, server_version: Option<&str>, network: &str) {
    println!();
    println!("  * {}", style("WalletPilot").cyan().bold());
    println!(
        "  {}",
        style("Ask about your wallet, balances and transfers.").dim()
    );
    println!();
    println!("  {}   {}", style("Server:").bold(), style(server).dim());
    if let Some(version) = server_version {
        println!("  {}  {}", style("Version:").bold(), style(version).dim());
    }
    println!("  {}  {}", style("Network:").bold(), style(network).dim());
    println!();
    println!(
        "  {}",
        style("Type /help for commands, Ctrl+D to exit").dim()
    );
    println!("  {}", style("---").dim());
    println!();
}
