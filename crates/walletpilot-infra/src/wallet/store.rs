//! Wallet record persistence and signing-key resolution.
//!
//! One record per data directory at `{data_dir}/wallet_data.json`:
//!
//! ```json
//! { "privateKey": "0x...", "walletAddress": "0x..." }
//! ```

use std::path::{Path, PathBuf};

use walletpilot_types::error::WalletError;
use walletpilot_types::wallet::WalletRecord;

use super::signer::{WalletSigner, same_address};

/// File name of the wallet record inside the data directory.
pub const WALLET_RECORD_FILE: &str = "wallet_data.json";

/// Environment variable holding a pre-provisioned signing key.
pub const SIGNING_KEY_ENV: &str = "WALLETPILOT_SIGNING_KEY";

/// Reads and writes the wallet record.
#[derive(Debug, Clone)]
pub struct WalletStore {
    path: PathBuf,
}

impl WalletStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(WALLET_RECORD_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the record, or `None` when no record exists yet.
    pub async fn load(&self) -> Result<Option<WalletRecord>, WalletError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(WalletError::FileSystem(format!(
                    "failed to read {}: {e}",
                    self.path.display()
                )));
            }
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| WalletError::CorruptRecord(format!("{}: {e}", self.path.display())))
    }

    /// Overwrite the record.
    pub async fn save(&self, record: &WalletRecord) -> Result<(), WalletError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                WalletError::FileSystem(format!("failed to create {}: {e}", parent.display()))
            })?;
        }

        let json = serde_json::to_string_pretty(record)
            .map_err(|e| WalletError::CorruptRecord(e.to_string()))?;
        tokio::fs::write(&self.path, json).await.map_err(|e| {
            WalletError::FileSystem(format!("failed to write {}: {e}", self.path.display()))
        })
    }

    /// Resolve the signing key for this data directory.
    ///
    /// See [`resolve_signer`] for the rules.
    pub fn resolve_signer(
        &self,
        record: Option<&WalletRecord>,
        env_key: Option<&str>,
    ) -> Result<WalletSigner, WalletError> {
        resolve_signer(record, env_key, &self.path.display().to_string())
    }
}

/// Pick the signing key from the record, the environment fallback or a new
/// key, in that order.
///
/// A record that names an address binds the wallet to that address: a key
/// must be available and must derive the same address, otherwise resolution
/// fails and nothing is generated.
pub fn resolve_signer(
    record: Option<&WalletRecord>,
    env_key: Option<&str>,
    record_name: &str,
) -> Result<WalletSigner, WalletError> {
    let env_key = env_key.map(str::trim).filter(|k| !k.is_empty());

    let Some(record) = record.filter(|r| !r.wallet_address.trim().is_empty()) else {
        return match env_key {
            Some(key) => {
                tracing::info!("using signing key from {SIGNING_KEY_ENV}");
                WalletSigner::from_hex(key)
            }
            None => {
                tracing::info!("no wallet record found, generating a new signing key");
                Ok(WalletSigner::generate())
            }
        };
    };

    let recorded_key = record
        .private_key
        .as_deref()
        .map(str::trim)
        .filter(|k| !k.is_empty());

    let Some(key) = recorded_key.or(env_key) else {
        return Err(WalletError::MissingPrivateKey {
            address: record.wallet_address.clone(),
            record: record_name.to_string(),
        });
    };

    let signer = WalletSigner::from_hex(key)?;
    if !same_address(signer.address(), &record.wallet_address) {
        return Err(WalletError::AddressMismatch {
            recorded: record.wallet_address.clone(),
            derived: signer.address().to_string(),
            record: record_name.to_string(),
        });
    }

    Ok(signer)
}
