//! Agent wrapper: the single seam to the delegated on-chain agent.
//!
//! - [`AgentRuntime`]: a constructed agent that turns one message into a
//!   stream of text chunks
//! - [`AgentHandle`]: cheap, cloneable capability bound to one credential set
//! - [`backend`]: constructs runtimes from credentials
//! - [`llm_agent`]: the LLM-bound runtime used in production

pub mod backend;
pub mod llm_agent;

use std::fmt;
use std::pin::Pin;
use std::sync::Arc;

use futures_util::{Stream, StreamExt};

use walletpilot_types::error::AgentError;
use walletpilot_types::wallet::{ActionCapability, WalletBinding};

use crate::session::fingerprint::SessionFingerprint;

/// Stream of reply chunks produced by an agent for one message.
pub type ReplyStream = Pin<Box<dyn Stream<Item = Result<String, AgentError>> + Send + 'static>>;

/// A constructed agent.
///
/// Owns its wallet binding and a fixed action list for its whole lifetime.
pub trait AgentRuntime: Send + Sync {
    /// Wallet and network the agent acts for.
    fn binding(&self) -> &WalletBinding;

    /// Actions the agent may invoke.
    fn actions(&self) -> &[ActionCapability];

    /// Hand one message to the agent. Chunks arrive in generation order.
    fn stream(&self, message: &str) -> ReplyStream;
}

/// Opaque handle to a constructed agent, bound 1:1 to a credential set.
///
/// Cloning shares the underlying runtime.
#[derive(Clone)]
pub struct AgentHandle {
    fingerprint: SessionFingerprint,
    runtime: Arc<dyn AgentRuntime>,
}

impl AgentHandle {
    pub fn new(fingerprint: SessionFingerprint, runtime: Arc<dyn AgentRuntime>) -> Self {
        Self {
            fingerprint,
            runtime,
        }
    }

    pub fn fingerprint(&self) -> &SessionFingerprint {
        &self.fingerprint
    }

    pub fn binding(&self) -> &WalletBinding {
        self.runtime.binding()
    }

    pub fn actions(&self) -> &[ActionCapability] {
        self.runtime.actions()
    }

    /// Whether both handles share one runtime instance.
    pub fn same_runtime(&self, other: &AgentHandle) -> bool {
        Arc::ptr_eq(&self.runtime, &other.runtime)
    }

    /// Send one message and wait for the aggregated reply.
    pub async fn send(&self, message: &str) -> Result<String, AgentError> {
        send(self, message).await
    }
}

impl fmt::Debug for AgentHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentHandle")
            .field("fingerprint", &self.fingerprint)
            .field("binding", self.runtime.binding())
            .finish()
    }
}

/// Pass `message` to the agent and concatenate its streamed output in order.
///
/// No timeout is applied here: an unresponsive agent holds the caller until
/// the caller's own deadline fires. The first stream error aborts the
/// exchange and is returned as-is.
pub async fn send(handle: &AgentHandle, message: &str) -> Result<String, AgentError> {
    let mut stream = handle.runtime.stream(message);
    let mut reply = String::new();

    while let Some(chunk) = stream.next().await {
        reply.push_str(&chunk?);
    }

    Ok(reply)
}
