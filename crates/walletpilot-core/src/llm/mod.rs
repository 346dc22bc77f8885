//! LLM provider abstraction.
//!
//! - [`provider::LlmProvider`]: the RPITIT trait concrete providers implement
//! - [`box_provider::BoxLlmProvider`]: type-erased wrapper for runtime dispatch
//! - [`ProviderFactory`]: builds a provider bound to a caller-supplied API key

pub mod box_provider;
pub mod provider;

use secrecy::SecretString;

use self::box_provider::BoxLlmProvider;

/// Builds an LLM provider for a given API key.
///
/// Credentials arrive per request, so providers cannot be built at startup.
/// The validator uses the factory for its liveness probe and the agent
/// backend uses it to bind the agent's model.
pub trait ProviderFactory: Send + Sync {
    /// Model identifier the built providers default to.
    fn model(&self) -> &str;

    /// Build a provider authenticated with `api_key`.
    fn build(&self, api_key: &SecretString) -> BoxLlmProvider;
}
