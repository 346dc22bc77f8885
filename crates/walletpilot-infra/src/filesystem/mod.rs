//! Data directory layout for WalletPilot.

use std::path::PathBuf;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "WALLETPILOT_DATA_DIR";

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `WALLETPILOT_DATA_DIR` environment variable
/// 2. `~/.walletpilot`
/// 3. `.walletpilot` in the current directory
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".walletpilot");
    }

    PathBuf::from(".walletpilot")
}
