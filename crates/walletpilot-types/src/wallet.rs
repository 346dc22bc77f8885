//! Wallet and on-chain action types.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::credential::{NetworkId, PrivateKeyEncoding};

/// Persisted wallet-data record (`wallet_data.json`).
///
/// Single global record per data directory. The private key is optional on
/// disk: a record may carry only the address, in which case the key must be
/// supplied from the environment.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
    #[serde(default)]
    pub wallet_address: String,
}

impl fmt::Debug for WalletRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletRecord")
            .field("private_key", &self.private_key.as_ref().map(|_| "***"))
            .field("wallet_address", &self.wallet_address)
            .finish()
    }
}

/// A wallet bound to a network: what the agent acts on behalf of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletBinding {
    /// Lowercase `0x`-prefixed 20-byte address.
    pub address: String,
    pub network: NetworkId,
    /// Wallet-platform API key name the wallet is operated through.
    pub platform_key: String,
    pub platform_key_encoding: PrivateKeyEncoding,
}

/// One on-chain operation the agent may invoke.
///
/// The list is fixed; it is not configurable per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionCapability {
    WalletDetails,
    NativeBalance,
    NativeTransfer,
    Erc20Balance,
    Erc20Transfer,
    ContractCall,
}

impl ActionCapability {
    /// Every action attached to an agent, in the order they are advertised.
    pub const ALL: [ActionCapability; 6] = [
        ActionCapability::WalletDetails,
        ActionCapability::NativeBalance,
        ActionCapability::NativeTransfer,
        ActionCapability::Erc20Balance,
        ActionCapability::Erc20Transfer,
        ActionCapability::ContractCall,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ActionCapability::WalletDetails => "get_wallet_details",
            ActionCapability::NativeBalance => "get_balance",
            ActionCapability::NativeTransfer => "native_transfer",
            ActionCapability::Erc20Balance => "erc20_balance",
            ActionCapability::Erc20Transfer => "erc20_transfer",
            ActionCapability::ContractCall => "contract_call",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ActionCapability::WalletDetails => {
                "Report the wallet address, network and chain id."
            }
            ActionCapability::NativeBalance => "Check the wallet's native ETH balance.",
            ActionCapability::NativeTransfer => {
                "Send native ETH from the wallet to a destination address."
            }
            ActionCapability::Erc20Balance => "Check the wallet's balance of an ERC-20 token.",
            ActionCapability::Erc20Transfer => {
                "Transfer an ERC-20 token amount to a destination address."
            }
            ActionCapability::ContractCall => {
                "Invoke a function on a deployed contract with the given arguments."
            }
        }
    }

    /// Whether the action moves funds.
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            ActionCapability::NativeTransfer
                | ActionCapability::Erc20Transfer
                | ActionCapability::ContractCall
        )
    }
}

impl fmt::Display for ActionCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
