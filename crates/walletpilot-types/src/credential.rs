//! Credential types for WalletPilot.
//!
//! A [`CredentialPayload`] is the raw, untrusted shape that arrives over the
//! wire (every field optional). It is converted exactly once into a validated
//! [`CredentialSet`] before reaching any internal component.

use std::fmt;
use std::str::FromStr;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::error::AgentError;

/// EVM network the agent's wallet is bound to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NetworkId {
    /// Base Sepolia testnet.
    #[default]
    #[serde(rename = "base-sepolia", alias = "testnet")]
    Testnet,
    /// Base mainnet.
    #[serde(rename = "base-mainnet", alias = "mainnet")]
    Mainnet,
}

impl NetworkId {
    /// Canonical network identifier used on the wire and by the wallet platform.
    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkId::Testnet => "base-sepolia",
            NetworkId::Mainnet => "base-mainnet",
        }
    }

    /// EIP-155 chain id.
    pub fn chain_id(&self) -> u64 {
        match self {
            NetworkId::Testnet => 84_532,
            NetworkId::Mainnet => 8_453,
        }
    }

    /// Whether transfers on this network move real funds.
    pub fn is_mainnet(&self) -> bool {
        matches!(self, NetworkId::Mainnet)
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NetworkId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "base-sepolia" | "testnet" => Ok(NetworkId::Testnet),
            "base-mainnet" | "mainnet" => Ok(NetworkId::Mainnet),
            other => Err(format!("invalid network id: '{other}'")),
        }
    }
}

/// Textual encodings accepted for a wallet-platform private key.
///
/// This is a shape check only: it says nothing about whether the key is
/// cryptographically valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrivateKeyEncoding {
    /// PEM block with `-----BEGIN` / `-----END` delimiters.
    Pem,
    /// `0x`-prefixed hex with at least 64 hex digits.
    Hex,
    /// Base64 alphabet, longer than 20 characters.
    Base64,
}

impl PrivateKeyEncoding {
    /// Minimum number of hex digits after the `0x` prefix.
    pub const MIN_HEX_DIGITS: usize = 64;

    /// Base64 keys must be strictly longer than this.
    pub const MIN_BASE64_LEN: usize = 20;

    /// Detect which recognized encoding `key` uses, if any.
    pub fn detect(key: &str) -> Option<Self> {
        let key = key.trim();
        if key.is_empty() {
            return None;
        }

        if key.contains("-----BEGIN") && key.contains("-----END") {
            return Some(PrivateKeyEncoding::Pem);
        }

        if let Some(digits) = key.strip_prefix("0x") {
            if digits.len() >= Self::MIN_HEX_DIGITS
                && digits.chars().all(|c| c.is_ascii_hexdigit())
            {
                return Some(PrivateKeyEncoding::Hex);
            }
        }

        let is_base64_alphabet = key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '/' || c == '=');
        if is_base64_alphabet && key.len() > Self::MIN_BASE64_LEN {
            return Some(PrivateKeyEncoding::Base64);
        }

        None
    }
}

impl fmt::Display for PrivateKeyEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrivateKeyEncoding::Pem => write!(f, "pem"),
            PrivateKeyEncoding::Hex => write!(f, "hex"),
            PrivateKeyEncoding::Base64 => write!(f, "base64"),
        }
    }
}

/// Raw credential fields as they arrive in a request body.
///
/// Field names follow the browser client's camelCase JSON. Debug output
/// never includes secret values.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openai_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_key_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_private_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_id: Option<String>,
}

impl CredentialPayload {
    /// Wire names of the required fields that are absent or blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let blank = |v: &Option<String>| v.as_deref().map(str::trim).unwrap_or("").is_empty();

        let mut missing = Vec::new();
        if blank(&self.openai_key) {
            missing.push("openaiKey");
        }
        if blank(&self.wallet_key_id) {
            missing.push("walletKeyId");
        }
        if blank(&self.wallet_private_key) {
            missing.push("walletPrivateKey");
        }
        missing
    }

    /// Convert into a validated [`CredentialSet`].
    ///
    /// `default_network` applies when `networkId` is absent or blank.
    pub fn into_credentials(self, default_network: NetworkId) -> Result<CredentialSet, AgentError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(AgentError::Input(format!(
                "API keys are required. Missing: {}",
                missing.join(", ")
            )));
        }

        let network_id = match self.network_id.as_deref().map(str::trim) {
            None | Some("") => default_network,
            Some(raw) => raw.parse().map_err(AgentError::Input)?,
        };

        CredentialSet::new(
            self.openai_key.unwrap_or_default(),
            self.wallet_key_id.unwrap_or_default(),
            self.wallet_private_key.unwrap_or_default(),
            network_id,
        )
    }
}

impl fmt::Debug for CredentialPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let presence = |v: &Option<String>| if v.is_some() { "<set>" } else { "<unset>" };
        f.debug_struct("CredentialPayload")
            .field("openai_key", &presence(&self.openai_key))
            .field("wallet_key_id", &self.wallet_key_id)
            .field("wallet_private_key", &presence(&self.wallet_private_key))
            .field("network_id", &self.network_id)
            .finish()
    }
}

/// A validated credential set.
///
/// Invariants: every field is non-empty and the wallet private key matches one
/// of the [`PrivateKeyEncoding`]s. Secret fields are wrapped in
/// [`SecretString`] so they never leak through `Debug`.
#[derive(Debug)]
pub struct CredentialSet {
    model_api_key: SecretString,
    wallet_key_id: String,
    wallet_private_key: SecretString,
    network_id: NetworkId,
}

impl CredentialSet {
    /// Build a credential set, enforcing the field invariants.
    pub fn new(
        model_api_key: impl Into<String>,
        wallet_key_id: impl Into<String>,
        wallet_private_key: impl Into<String>,
        network_id: NetworkId,
    ) -> Result<Self, AgentError> {
        let model_api_key = model_api_key.into().trim().to_string();
        let wallet_key_id = wallet_key_id.into().trim().to_string();
        let wallet_private_key = wallet_private_key.into().trim().to_string();

        if model_api_key.is_empty() || wallet_key_id.is_empty() || wallet_private_key.is_empty() {
            return Err(AgentError::Input("All API keys are required".to_string()));
        }

        if PrivateKeyEncoding::detect(&wallet_private_key).is_none() {
            return Err(AgentError::CredentialFormat(
                "Invalid wallet private key format".to_string(),
            ));
        }

        Ok(Self {
            model_api_key: SecretString::from(model_api_key),
            wallet_key_id,
            wallet_private_key: SecretString::from(wallet_private_key),
            network_id,
        })
    }

    pub fn model_api_key(&self) -> &SecretString {
        &self.model_api_key
    }

    pub fn wallet_key_id(&self) -> &str {
        &self.wallet_key_id
    }

    pub fn wallet_private_key(&self) -> &SecretString {
        &self.wallet_private_key
    }

    pub fn network_id(&self) -> NetworkId {
        self.network_id
    }

    /// Encoding of the wallet private key (always `Some` by construction).
    pub fn wallet_key_encoding(&self) -> Option<PrivateKeyEncoding> {
        PrivateKeyEncoding::detect(self.wallet_private_key.expose_secret())
    }
}
