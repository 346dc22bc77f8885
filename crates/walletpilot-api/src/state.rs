//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by the REST API.
//! The core services are generic over provider/backend/store traits; this
//! module pins them to the infra implementations.

use std::path::Path;
use std::sync::Arc;

use walletpilot_core::agent::backend::BoxAgentBackend;
use walletpilot_core::chat::handler::ChatRequestHandler;
use walletpilot_core::llm::ProviderFactory;
use walletpilot_core::session::cache::AgentSessionCache;
use walletpilot_core::session::store::InMemorySessionStore;
use walletpilot_core::validator::CredentialValidator;
use walletpilot_infra::agent::backend::WalletAgentBackend;
use walletpilot_infra::crypto::fingerprint::Sha256Fingerprinter;
use walletpilot_infra::llm::OpenAiProviderFactory;
use walletpilot_types::config::ServerConfig;

/// Shared application state, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub handler: Arc<ChatRequestHandler>,
    pub validator: Arc<CredentialValidator>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Wire the production services for `config`.
    pub async fn init(config: ServerConfig, data_dir: &Path) -> anyhow::Result<Self> {
        tokio::fs::create_dir_all(data_dir).await?;

        let factory: Arc<dyn ProviderFactory> = Arc::new(OpenAiProviderFactory::new(
            config.llm_base_url.clone(),
            config.model.clone(),
        ));
        let backend = WalletAgentBackend::new(data_dir, factory.clone()).with_signing_key_from_env();

        tracing::info!(
            data_dir = %data_dir.display(),
            model = %config.model,
            base_url = %config.llm_base_url,
            default_network = %config.default_network,
            "application state initialized"
        );

        Ok(Self::from_parts(config, factory, BoxAgentBackend::new(backend)))
    }

    /// Assemble state from already-built collaborators.
    pub fn from_parts(
        config: ServerConfig,
        factory: Arc<dyn ProviderFactory>,
        backend: BoxAgentBackend,
    ) -> Self {
        let cache = Arc::new(AgentSessionCache::new(
            Arc::new(InMemorySessionStore::new()),
            backend,
            Arc::new(Sha256Fingerprinter::new()),
        ));

        Self {
            handler: Arc::new(ChatRequestHandler::new(cache, config.default_network)),
            validator: Arc::new(CredentialValidator::new(factory)),
            config: Arc::new(config),
        }
    }
}
