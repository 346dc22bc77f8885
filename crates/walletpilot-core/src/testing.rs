//! Shared test doubles for the core crate.

use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use futures_util::Stream;
use secrecy::{ExposeSecret, SecretString};

use walletpilot_types::credential::{CredentialSet, NetworkId, PrivateKeyEncoding};
use walletpilot_types::error::AgentError;
use walletpilot_types::llm::{
    CompletionRequest, CompletionResponse, LlmError, ProviderCapabilities, StopReason,
    StreamEvent, Usage,
};
use walletpilot_types::wallet::{ActionCapability, WalletBinding};

use crate::agent::backend::AgentBackend;
use crate::agent::{AgentHandle, AgentRuntime, ReplyStream};
use crate::llm::ProviderFactory;
use crate::llm::box_provider::BoxLlmProvider;
use crate::llm::provider::LlmProvider;
use crate::session::fingerprint::{Fingerprinter, SessionFingerprint};

pub const HEX_KEY: &str = "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";
pub const KEY_ID: &str = "organizations/acme/apiKeys/1";
pub const ADDRESS: &str = "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf";

/// Valid credential set that differs from others only by model key.
pub fn credentials(model_api_key: &str) -> CredentialSet {
    CredentialSet::new(model_api_key, KEY_ID, HEX_KEY, NetworkId::Testnet).unwrap()
}

// ---------------------------------------------------------------------------
// LLM provider doubles
// ---------------------------------------------------------------------------

pub struct MockProvider {
    chunks: Vec<String>,
    fail: bool,
    completions: Arc<AtomicUsize>,
    capabilities: ProviderCapabilities,
}

impl MockProvider {
    pub fn chunks(chunks: &[&str]) -> Self {
        Self::build(chunks, false, Arc::default())
    }

    pub fn failing() -> Self {
        Self::build(&[], true, Arc::default())
    }

    fn build(chunks: &[&str], fail: bool, completions: Arc<AtomicUsize>) -> Self {
        Self {
            chunks: chunks.iter().map(|c| c.to_string()).collect(),
            fail,
            completions,
            capabilities: ProviderCapabilities {
                streaming: true,
                tool_calling: false,
                max_context_tokens: 128_000,
                max_output_tokens: 4_096,
            },
        }
    }
}

impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn capabilities(&self) -> &ProviderCapabilities {
        &self.capabilities
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.completions.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(LlmError::AuthenticationFailed);
        }
        Ok(CompletionResponse {
            id: "mock-1".into(),
            content: self.chunks.concat(),
            model: request.model.clone(),
            stop_reason: StopReason::EndTurn,
            usage: Usage::default(),
        })
    }

    fn stream(
        &self,
        _request: CompletionRequest,
    ) -> Pin<Box<dyn Stream<Item = Result<StreamEvent, LlmError>> + Send + 'static>> {
        let events: Vec<Result<StreamEvent, LlmError>> = if self.fail {
            vec![Err(LlmError::Provider {
                message: "connection refused".into(),
            })]
        } else {
            std::iter::once(Ok(StreamEvent::Connected))
                .chain(self.chunks.iter().enumerate().map(|(i, text)| {
                    Ok(StreamEvent::TextDelta {
                        index: i as u32,
                        text: text.clone(),
                    })
                }))
                .chain(std::iter::once(Ok(StreamEvent::MessageDelta {
                    stop_reason: StopReason::EndTurn,
                })))
                .chain(std::iter::once(Ok(StreamEvent::Done)))
                .collect()
        };
        Box::pin(futures_util::stream::iter(events))
    }
}

/// Factory that counts how many providers it built and how many completions
/// those providers served.
pub struct MockFactory {
    chunks: Vec<String>,
    fail: bool,
    builds: AtomicUsize,
    completions: Arc<AtomicUsize>,
}

impl MockFactory {
    pub fn ok(chunks: &[&str]) -> Self {
        Self {
            chunks: chunks.iter().map(|c| c.to_string()).collect(),
            fail: false,
            builds: AtomicUsize::new(0),
            completions: Arc::default(),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::ok(&[])
        }
    }

    pub fn builds(&self) -> usize {
        self.builds.load(Ordering::SeqCst)
    }

    pub fn completions(&self) -> usize {
        self.completions.load(Ordering::SeqCst)
    }
}

impl ProviderFactory for MockFactory {
    fn model(&self) -> &str {
        "gpt-4o-mini"
    }

    fn build(&self, _api_key: &SecretString) -> BoxLlmProvider {
        self.builds.fetch_add(1, Ordering::SeqCst);
        let chunks: Vec<&str> = self.chunks.iter().map(String::as_str).collect();
        BoxLlmProvider::new(MockProvider::build(
            &chunks,
            self.fail,
            self.completions.clone(),
        ))
    }
}

// ---------------------------------------------------------------------------
// Agent doubles
// ---------------------------------------------------------------------------

/// Agent that replays a fixed list of chunks, optionally ending in an error.
pub struct ScriptedAgent {
    chunks: Vec<String>,
    failure: Option<String>,
    binding: WalletBinding,
    actions: Vec<ActionCapability>,
}

impl ScriptedAgent {
    pub fn new(chunks: &[&str]) -> Self {
        Self::on_network(chunks, NetworkId::Testnet)
    }

    pub fn on_network(chunks: &[&str], network: NetworkId) -> Self {
        Self {
            chunks: chunks.iter().map(|c| c.to_string()).collect(),
            failure: None,
            binding: WalletBinding {
                address: ADDRESS.into(),
                network,
                platform_key: "organizations/test/apiKeys/1".into(),
                platform_key_encoding: PrivateKeyEncoding::Hex,
            },
            actions: ActionCapability::ALL.to_vec(),
        }
    }

    pub fn failing_after(chunks: &[&str], message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::new(chunks)
        }
    }
}

impl AgentRuntime for ScriptedAgent {
    fn binding(&self) -> &WalletBinding {
        &self.binding
    }

    fn actions(&self) -> &[ActionCapability] {
        &self.actions
    }

    fn stream(&self, _message: &str) -> ReplyStream {
        let items: Vec<Result<String, AgentError>> = self
            .chunks
            .iter()
            .cloned()
            .map(Ok)
            .chain(self.failure.clone().map(|m| Err(AgentError::Invocation(m))))
            .collect();
        Box::pin(futures_util::stream::iter(items))
    }
}

pub fn scripted_handle(fingerprint: &str, chunks: &[&str]) -> AgentHandle {
    AgentHandle::new(
        SessionFingerprint::new(fingerprint),
        Arc::new(ScriptedAgent::new(chunks)),
    )
}

/// Backend that counts constructions and builds scripted agents.
#[derive(Clone)]
pub struct SpyBackend {
    constructions: Arc<AtomicUsize>,
    chunks: Vec<String>,
    failure: Option<String>,
    delay: Duration,
}

impl SpyBackend {
    pub fn replying(chunks: &[&str]) -> Self {
        Self {
            constructions: Arc::default(),
            chunks: chunks.iter().map(|c| c.to_string()).collect(),
            failure: None,
            delay: Duration::ZERO,
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::replying(&[])
        }
    }

    pub fn with_delay_ms(mut self, ms: u64) -> Self {
        self.delay = Duration::from_millis(ms);
        self
    }

    pub fn constructions(&self) -> usize {
        self.constructions.load(Ordering::SeqCst)
    }
}

impl AgentBackend for SpyBackend {
    async fn construct(
        &self,
        credentials: &CredentialSet,
    ) -> Result<Arc<dyn AgentRuntime>, AgentError> {
        self.constructions.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if let Some(message) = &self.failure {
            return Err(AgentError::Construction(message.clone()));
        }
        let chunks: Vec<&str> = self.chunks.iter().map(String::as_str).collect();
        Ok(Arc::new(ScriptedAgent::on_network(
            &chunks,
            credentials.network_id(),
        )))
    }
}

/// Readable fingerprint: the fields joined with separators.
pub struct StubFingerprinter;

impl Fingerprinter for StubFingerprinter {
    fn fingerprint(&self, credentials: &CredentialSet) -> SessionFingerprint {
        SessionFingerprint::new(format!(
            "{}|{}|{}|{}",
            credentials.model_api_key().expose_secret(),
            credentials.wallet_key_id(),
            credentials.wallet_private_key().expose_secret(),
            credentials.network_id(),
        ))
    }
}
