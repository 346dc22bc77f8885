//! AgentBackend trait and its object-safe wrapper.
//!
//! Follows the same blanket-impl pattern as `BoxLlmProvider`:
//! 1. `AgentBackend` uses RPITIT for `construct`
//! 2. `AgentBackendDyn` is the object-safe, boxed-future twin
//! 3. `BoxAgentBackend` wraps `Box<dyn AgentBackendDyn>` and delegates

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use walletpilot_types::credential::CredentialSet;
use walletpilot_types::error::AgentError;

use super::AgentRuntime;

/// Builds agent runtimes from credentials.
///
/// Construction binds a wallet, attaches the fixed action list and binds the
/// LLM. It is expensive and may touch the network and the filesystem;
/// callers cache the result.
///
/// Implementations live in walletpilot-infra.
pub trait AgentBackend: Send + Sync {
    fn construct(
        &self,
        credentials: &CredentialSet,
    ) -> impl Future<Output = Result<Arc<dyn AgentRuntime>, AgentError>> + Send;
}

/// Object-safe version of [`AgentBackend`].
pub trait AgentBackendDyn: Send + Sync {
    fn construct_boxed<'a>(
        &'a self,
        credentials: &'a CredentialSet,
    ) -> Pin<Box<dyn Future<Output = Result<Arc<dyn AgentRuntime>, AgentError>> + Send + 'a>>;
}

impl<T: AgentBackend> AgentBackendDyn for T {
    fn construct_boxed<'a>(
        &'a self,
        credentials: &'a CredentialSet,
    ) -> Pin<Box<dyn Future<Output = Result<Arc<dyn AgentRuntime>, AgentError>> + Send + 'a>> {
        Box::pin(self.construct(credentials))
    }
}

/// Type-erased agent backend.
pub struct BoxAgentBackend {
    inner: Box<dyn AgentBackendDyn + Send + Sync>,
}

impl BoxAgentBackend {
    pub fn new<T: AgentBackend + 'static>(backend: T) -> Self {
        Self {
            inner: Box::new(backend),
        }
    }

    pub async fn construct(
        &self,
        credentials: &CredentialSet,
    ) -> Result<Arc<dyn AgentRuntime>, AgentError> {
        self.inner.construct_boxed(credentials).await
    }
}
