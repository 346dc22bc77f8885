//! Chat request handler.
//!
//! Request checks run before any cache lookup, so a malformed request never
//! reaches the agent backend.

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use walletpilot_types::chat::AgentRequest;
use walletpilot_types::credential::NetworkId;
use walletpilot_types::error::AgentError;

use crate::session::cache::AgentSessionCache;

const MISSING_KEYS: &str =
    "API keys are required. Please configure your OpenAI and wallet API keys.";
const MISSING_MESSAGE: &str = "A message is required.";

/// Turns one `/agent` request into an agent reply.
pub struct ChatRequestHandler {
    cache: Arc<AgentSessionCache>,
    default_network: NetworkId,
}

impl ChatRequestHandler {
    pub fn new(cache: Arc<AgentSessionCache>, default_network: NetworkId) -> Self {
        Self {
            cache,
            default_network,
        }
    }

    pub fn cache(&self) -> &AgentSessionCache {
        &self.cache
    }

    pub fn default_network(&self) -> NetworkId {
        self.default_network
    }

    /// Handle one request end to end.
    ///
    /// Errors are returned, not raised: the HTTP layer turns both outcomes
    /// into a 200 body.
    pub async fn handle(&self, request: AgentRequest) -> Result<String, AgentError> {
        let start = Instant::now();

        let Some(payload) = request.api_keys else {
            warn!(outcome = "rejected", reason = "no_api_keys", "agent request rejected");
            return Err(AgentError::Input(MISSING_KEYS.to_string()));
        };

        let missing = payload.missing_fields();
        if !missing.is_empty() {
            warn!(
                outcome = "rejected",
                missing = %missing.join(","),
                "agent request rejected"
            );
            return Err(AgentError::Input(format!(
                "API keys are required. Missing: {}",
                missing.join(", ")
            )));
        }

        let message = request.user_message.unwrap_or_default();
        if message.trim().is_empty() {
            warn!(outcome = "rejected", reason = "empty_message", "agent request rejected");
            return Err(AgentError::Input(MISSING_MESSAGE.to_string()));
        }

        let credentials = payload.into_credentials(self.default_network)?;
        let fingerprint = self.cache.fingerprint(&credentials);

        let result = match self.cache.get_or_create(&credentials).await {
            Ok(handle) => handle.send(&message).await,
            Err(e) => Err(e),
        };

        let elapsed_ms = start.elapsed().as_millis() as u64;
        match &result {
            Ok(reply) => info!(
                fingerprint = %fingerprint,
                outcome = "ok",
                reply_len = reply.len(),
                elapsed_ms,
                "agent request handled"
            ),
            Err(e) => warn!(
                fingerprint = %fingerprint,
                outcome = "error",
                kind = e.kind(),
                error = %e,
                elapsed_ms,
                "agent request failed"
            ),
        }

        result
    }
}
