//! Transient wallet-platform credential file.
//!
//! The wallet platform loads its API key from a JSON file
//! (`{ "name": ..., "privateKey": ... }`). The file is written into the data
//! directory immediately before loading and removed before
//! [`with_credential_file`] returns, whether or not loading succeeded.
//! [`materialize`] runs the whole round trip on the blocking pool.

use std::io::Write;
use std::path::Path;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use walletpilot_types::credential::{CredentialSet, PrivateKeyEncoding};
use walletpilot_types::error::WalletError;

const FILE_PREFIX: &str = ".wallet-credentials-";

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CredentialFile {
    name: String,
    private_key: String,
}

impl CredentialFile {
    fn from_credentials(credentials: &CredentialSet) -> Self {
        Self {
            name: credentials.wallet_key_id().to_string(),
            private_key: credentials.wallet_private_key().expose_secret().to_string(),
        }
    }
}

/// Wallet-platform API credentials, as loaded from the credential file.
pub struct WalletPlatformConfig {
    pub key_name: String,
    pub private_key: SecretString,
    pub encoding: PrivateKeyEncoding,
}

impl std::fmt::Debug for WalletPlatformConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletPlatformConfig")
            .field("key_name", &self.key_name)
            .field("encoding", &self.encoding)
            .finish_non_exhaustive()
    }
}

/// Write `credentials` to a temporary file in `dir`, run `f` on its path and
/// delete the file.
pub fn with_credential_file<T>(
    dir: &Path,
    credentials: &CredentialSet,
    f: impl FnOnce(&Path) -> Result<T, WalletError>,
) -> Result<T, WalletError> {
    write_scoped(dir, &CredentialFile::from_credentials(credentials), f)
}

fn write_scoped<T>(
    dir: &Path,
    contents: &CredentialFile,
    f: impl FnOnce(&Path) -> Result<T, WalletError>,
) -> Result<T, WalletError> {
    std::fs::create_dir_all(dir).map_err(|e| {
        WalletError::FileSystem(format!("failed to create {}: {e}", dir.display()))
    })?;

    // NamedTempFile is created with owner-only permissions and unlinks on drop.
    let mut file = tempfile::Builder::new()
        .prefix(FILE_PREFIX)
        .suffix(".json")
        .tempfile_in(dir)
        .map_err(|e| WalletError::CredentialFile(format!("failed to create: {e}")))?;

    serde_json::to_writer(&mut file, contents)
        .map_err(|e| WalletError::CredentialFile(format!("failed to write: {e}")))?;
    file.flush()
        .map_err(|e| WalletError::CredentialFile(format!("failed to flush: {e}")))?;

    let result = f(file.path());

    if let Err(e) = file.close() {
        tracing::warn!(error = %e, "failed to remove wallet credential file");
    }

    result
}

/// Load wallet-platform credentials from a credential file.
pub fn load_platform_config(path: &Path) -> Result<WalletPlatformConfig, WalletError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| WalletError::CredentialFile(format!("failed to read: {e}")))?;
    let parsed: CredentialFile = serde_json::from_str(&raw)
        .map_err(|e| WalletError::CredentialFile(format!("failed to parse: {e}")))?;

    let encoding = PrivateKeyEncoding::detect(&parsed.private_key).ok_or_else(|| {
        WalletError::CredentialFile("unrecognized private key encoding".to_string())
    })?;

    Ok(WalletPlatformConfig {
        key_name: parsed.name,
        private_key: SecretString::from(parsed.private_key),
        encoding,
    })
}

/// Materialize `credentials` and load them back as a platform config.
pub async fn materialize(
    dir: &Path,
    credentials: &CredentialSet,
) -> Result<WalletPlatformConfig, WalletError> {
    let dir = dir.to_path_buf();
    let contents = CredentialFile::from_credentials(credentials);
    tokio::task::spawn_blocking(move || write_scoped(&dir, &contents, load_platform_config))
        .await
        .map_err(|e| WalletError::CredentialFile(format!("loader task failed: {e}")))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use walletpilot_types::credential::NetworkId;

    const HEX_KEY: &str = "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";

    fn creds() -> CredentialSet {
        CredentialSet::new("sk-test", "organizations/acme/apiKeys/1", HEX_KEY, NetworkId::Testnet)
            .unwrap()
    }

    fn entries(dir: &Path) -> usize {
        std::fs::read_dir(dir).unwrap().count()
    }

    #[tokio::test]
    async fn test_materialize_loads_fields_and_leaves_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = materialize(tmp.path(), &creds()).await.unwrap();
        assert_eq!(config.key_name, "organizations/acme/apiKeys/1");
        assert_eq!(config.private_key.expose_secret(), HEX_KEY);
        assert_eq!(config.encoding, PrivateKeyEncoding::Hex);
        assert_eq!(entries(tmp.path()), 0);
    }

    #[test]
    fn test_file_is_json_with_expected_fields_while_open() {
        let tmp = TempDir::new().unwrap();
        let raw = with_credential_file(tmp.path(), &creds(), |path| {
            assert!(path.starts_with(tmp.path()));
            Ok(std::fs::read_to_string(path).unwrap())
        })
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["name"], "organizations/acme/apiKeys/1");
        assert_eq!(value["privateKey"], HEX_KEY);
    }

    #[test]
    fn test_file_is_removed_when_loading_fails() {
        let tmp = TempDir::new().unwrap();
        let result: Result<(), _> = with_credential_file(tmp.path(), &creds(), |_| {
            Err(WalletError::CredentialFile("platform rejected".into()))
        });
        assert!(result.is_err());
        assert_eq!(entries(tmp.path()), 0);
    }

    #[tokio::test]
    async fn test_debug_hides_private_key() {
        let tmp = TempDir::new().unwrap();
        let config = materialize(tmp.path(), &creds()).await.unwrap();
        assert!(!format!("{config:?}").contains(&HEX_KEY[2..]));
    }
}
