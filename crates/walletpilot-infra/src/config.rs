//! Server configuration loader for WalletPilot.
//!
//! Reads `config.toml` from the data directory (`~/.walletpilot/` in
//! production) and deserializes it into [`ServerConfig`]. Falls back to
//! defaults when the file is missing or malformed.

use std::path::Path;

use walletpilot_types::config::ServerConfig;

/// Load server configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`ServerConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - If the file exists and parses successfully, returns the parsed config.
pub async fn load_server_config(data_dir: &Path) -> ServerConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return ServerConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return ServerConfig::default();
        }
    };

    match toml::from_str::<ServerConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            ServerConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use walletpilot_types::credential::NetworkId;

    #[tokio::test]
    async fn load_server_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_server_config(tmp.path()).await;
        assert_eq!(config, ServerConfig::default());
    }

    #[tokio::test]
    async fn load_server_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            r#"
port = 8080
model = "gpt-4o"
default_network = "base-mainnet"
"#,
        )
        .await
        .unwrap();

        let config = load_server_config(tmp.path()).await;
        assert_eq!(config.port, 8080);
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.default_network, NetworkId::Mainnet);
        assert_eq!(config.host, "127.0.0.1");
    }

    #[tokio::test]
    async fn load_server_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_server_config(tmp.path()).await;
        assert_eq!(config, ServerConfig::default());
    }
}
