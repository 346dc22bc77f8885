//! Configuration types and defaults for the OpenAI-compatible provider.

use secrecy::SecretString;

use walletpilot_types::llm::ProviderCapabilities;

/// Default base URL of the OpenAI API.
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Configuration for an OpenAI-compatible LLM provider.
///
/// Used to construct an [`super::OpenAiCompatibleProvider`].
pub struct OpenAiCompatConfig {
    /// Human-readable provider name (e.g., "openai").
    pub provider_name: String,
    /// Base URL for the API (e.g., "https://api.openai.com/v1").
    pub base_url: String,
    /// API key for authentication.
    pub api_key: SecretString,
    /// Model identifier (e.g., "gpt-4o-mini").
    pub model: String,
    /// What this provider supports.
    pub capabilities: ProviderCapabilities,
}

/// OpenAI default configuration.
///
/// Capabilities: streaming, tool calling; 128K context, 16K output.
pub fn openai_defaults(api_key: SecretString, model: &str) -> OpenAiCompatConfig {
    with_base_url(OPENAI_BASE_URL, api_key, model)
}

/// Configuration for any endpoint speaking the OpenAI chat completions
/// protocol (proxies, gateways, local servers).
///
/// The provider is named "openai" when `base_url` is the OpenAI API and
/// "openai_compatible" otherwise.
pub fn with_base_url(base_url: &str, api_key: SecretString, model: &str) -> OpenAiCompatConfig {
    let base_url = base_url.trim_end_matches('/');
    let provider_name = if base_url == OPENAI_BASE_URL {
        "openai"
    } else {
        "openai_compatible"
    };

    OpenAiCompatConfig {
        provider_name: provider_name.into(),
        base_url: base_url.into(),
        api_key,
        model: model.into(),
        capabilities: ProviderCapabilities {
            streaming: true,
            tool_calling: true,
            max_context_tokens: 128_000,
            max_output_tokens: 16_384,
        },
    }
}
