//! Wallet-bound agent construction.
//!
//! [`WalletAgentBackend`] implements the `AgentBackend` trait from
//! `walletpilot-core`: it configures the wallet platform from the request's
//! credentials, resolves the signing key against the wallet record, binds
//! the wallet to the requested network and attaches an LLM agent.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use secrecy::{ExposeSecret, SecretString};
use tokio::sync::Mutex;

use walletpilot_core::agent::AgentRuntime;
use walletpilot_core::agent::backend::AgentBackend;
use walletpilot_core::agent::llm_agent::LlmAgent;
use walletpilot_core::llm::ProviderFactory;
use walletpilot_types::credential::CredentialSet;
use walletpilot_types::error::AgentError;
use walletpilot_types::wallet::{WalletBinding, WalletRecord};

use crate::wallet::credential_file;
use crate::wallet::store::{SIGNING_KEY_ENV, WalletStore};

/// Builds LLM agents bound to the wallet recorded in the data directory.
pub struct WalletAgentBackend {
    data_dir: PathBuf,
    store: WalletStore,
    factory: Arc<dyn ProviderFactory>,
    signing_key: Option<SecretString>,
    // The wallet record is one file shared by every construction.
    record_lock: Mutex<()>,
}

impl WalletAgentBackend {
    pub fn new(data_dir: &Path, factory: Arc<dyn ProviderFactory>) -> Self {
        Self {
            data_dir: data_dir.to_path_buf(),
            store: WalletStore::new(data_dir),
            factory,
            signing_key: None,
            record_lock: Mutex::new(()),
        }
    }

    /// Pre-provisioned signing key used when the record holds none.
    pub fn with_signing_key(mut self, key: Option<SecretString>) -> Self {
        self.signing_key = key;
        self
    }

    /// Read the pre-provisioned signing key from `WALLETPILOT_SIGNING_KEY`.
    pub fn with_signing_key_from_env(self) -> Self {
        let key = std::env::var(SIGNING_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .map(SecretString::from);
        self.with_signing_key(key)
    }

    pub fn store(&self) -> &WalletStore {
        &self.store
    }
}

impl AgentBackend for WalletAgentBackend {
    async fn construct(
        &self,
        credentials: &CredentialSet,
    ) -> Result<Arc<dyn AgentRuntime>, AgentError> {
        let start = Instant::now();

        let platform = credential_file::materialize(&self.data_dir, credentials).await?;
        tracing::debug!(
            key_name = %platform.key_name,
            encoding = %platform.encoding,
            "wallet platform configured"
        );

        let _guard = self.record_lock.lock().await;

        let record = self.store.load().await?;
        let env_key = self.signing_key.as_ref().map(|k| k.expose_secret());
        let signer = self.store.resolve_signer(record.as_ref(), env_key)?;

        let binding = WalletBinding {
            address: signer.address().to_string(),
            network: credentials.network_id(),
            platform_key: platform.key_name,
            platform_key_encoding: platform.encoding,
        };

        let provider = self.factory.build(credentials.model_api_key());
        let agent = LlmAgent::new(provider, self.factory.model(), binding.clone());

        self.store
            .save(&WalletRecord {
                private_key: Some(signer.export_hex()),
                wallet_address: binding.address.clone(),
            })
            .await?;

        tracing::info!(
            wallet = %binding.address,
            network = %binding.network,
            model = %self.factory.model(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "agent constructed"
        );

        Ok(Arc::new(agent))
    }
}
