//! LLM-bound agent runtime.
//!
//! The agent hands each user message to its bound model together with a
//! system prompt describing the wallet, the network and the fixed action
//! list, and relays the model's text deltas as reply chunks.

use std::sync::Arc;

use futures_util::StreamExt;

use walletpilot_types::error::AgentError;
use walletpilot_types::llm::{CompletionRequest, Message, StreamEvent};
use walletpilot_types::wallet::{ActionCapability, WalletBinding};

use crate::llm::box_provider::BoxLlmProvider;

use super::{AgentRuntime, ReplyStream};

const DEFAULT_MAX_TOKENS: u32 = 1024;
const DEFAULT_TEMPERATURE: f64 = 0.2;

/// Agent runtime backed by an LLM provider.
pub struct LlmAgent {
    provider: Arc<BoxLlmProvider>,
    model: String,
    binding: WalletBinding,
    actions: Vec<ActionCapability>,
    system_prompt: String,
}

impl LlmAgent {
    /// Bind `provider` to `binding` with the full action list attached.
    pub fn new(provider: BoxLlmProvider, model: impl Into<String>, binding: WalletBinding) -> Self {
        let actions = ActionCapability::ALL.to_vec();
        let system_prompt = build_system_prompt(&binding, &actions);
        Self {
            provider: Arc::new(provider),
            model: model.into(),
            binding,
            actions,
            system_prompt,
        }
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    fn build_request(&self, message: &str) -> CompletionRequest {
        CompletionRequest {
            model: self.model.clone(),
            messages: vec![Message::user(message)],
            system: Some(self.system_prompt.clone()),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: Some(DEFAULT_TEMPERATURE),
            stream: true,
        }
    }
}

impl AgentRuntime for LlmAgent {
    fn binding(&self) -> &WalletBinding {
        &self.binding
    }

    fn actions(&self) -> &[ActionCapability] {
        &self.actions
    }

    fn stream(&self, message: &str) -> ReplyStream {
        let events = self.provider.stream(self.build_request(message));

        Box::pin(events.filter_map(|event| async move {
            match event {
                Ok(StreamEvent::TextDelta { text, .. }) => Some(Ok(text)),
                Ok(_) => None,
                Err(e) => Some(Err(AgentError::Invocation(e.to_string()))),
            }
        }))
    }
}

/// Describe the wallet and actions to the model.
fn build_system_prompt(binding: &WalletBinding, actions: &[ActionCapability]) -> String {
    let mut prompt = format!(
        "You are a helpful agent that acts on-chain through a wallet platform.\n\
         Wallet address: {address}\n\
         Network: {network} (chain id {chain_id})\n\
         Wallet platform key: {key} ({encoding})\n\n\
         Available actions:\n",
        address = binding.address,
        network = binding.network,
        chain_id = binding.network.chain_id(),
        key = binding.platform_key,
        encoding = binding.platform_key_encoding,
    );

    for action in actions {
        prompt.push_str(&format!("- {}: {}\n", action.name(), action.description()));
    }

    prompt.push('\n');
    if binding.network.is_mainnet() {
        prompt.push_str(
            "This wallet holds real funds. Confirm the destination and amount with the \
             user before any transfer or contract call.\n",
        );
    } else {
        prompt.push_str(
            "This is a test network. If the wallet needs funds, tell the user to request \
             test ETH from a faucet for the wallet address.\n",
        );
    }
    prompt.push_str(
        "If a request needs an action that is not listed, say so and suggest what the \
         user can do instead. Be concise.",
    );

    prompt
}
