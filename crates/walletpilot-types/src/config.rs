//! Server configuration types for WalletPilot.
//!
//! `ServerConfig` represents the top-level `config.toml` in the data
//! directory. Every field has a default; CLI flags and environment variables
//! override the file.

use serde::{Deserialize, Serialize};

use crate::credential::NetworkId;

/// Top-level configuration for the WalletPilot server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Chat model bound to every agent and used by the key liveness probe.
    #[serde(default = "default_model")]
    pub model: String,

    /// OpenAI-compatible API base URL.
    #[serde(default = "default_base_url")]
    pub llm_base_url: String,

    /// Network used when a request does not name one.
    #[serde(default)]
    pub default_network: NetworkId,

    /// Directory holding a built web client to serve, if any.
    #[serde(default)]
    pub web_dir: Option<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            model: default_model(),
            llm_base_url: default_base_url(),
            default_network: NetworkId::default(),
            web_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_default_values() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.default_network, NetworkId::Testnet);
        assert!(config.web_dir.is_none());
    }

    #[test]
    fn test_server_config_partial_toml_fills_defaults() {
        let config: ServerConfig = toml::from_str(
            r#"
port = 8080
default_network = "base-mainnet"
"#,
        )
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.default_network, NetworkId::Mainnet);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.llm_base_url, "https://api.openai.com/v1");
    }
}
