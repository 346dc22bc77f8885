//! LLM provider implementations.
//!
//! Credentials arrive per request, so providers are built on demand through
//! [`OpenAiProviderFactory`] rather than once at startup.

pub mod openai_compat;

use secrecy::{ExposeSecret, SecretString};

use walletpilot_core::llm::ProviderFactory;
use walletpilot_core::llm::box_provider::BoxLlmProvider;

use self::openai_compat::OpenAiCompatibleProvider;
use self::openai_compat::config::{OPENAI_BASE_URL, with_base_url};

/// Builds [`OpenAiCompatibleProvider`]s for caller-supplied API keys.
#[derive(Debug, Clone)]
pub struct OpenAiProviderFactory {
    base_url: String,
    model: String,
}

impl OpenAiProviderFactory {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
        }
    }

    /// Factory targeting the public OpenAI API.
    pub fn openai(model: impl Into<String>) -> Self {
        Self::new(OPENAI_BASE_URL, model)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl ProviderFactory for OpenAiProviderFactory {
    fn model(&self) -> &str {
        &self.model
    }

    fn build(&self, api_key: &SecretString) -> BoxLlmProvider {
        let config = with_base_url(
            &self.base_url,
            SecretString::from(api_key.expose_secret().to_owned()),
            &self.model,
        );
        BoxLlmProvider::new(OpenAiCompatibleProvider::new(config))
    }
}
