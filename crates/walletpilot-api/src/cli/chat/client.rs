//! HTTP client for a running WalletPilot server.

use anyhow::{Context, Result};
use serde::Deserialize;

use walletpilot_types::chat::{AgentReply, AgentRequest, ValidateKeysResponse};
use walletpilot_types::credential::CredentialPayload;

#[derive(Debug, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
}

/// Thin JSON client over the server's REST endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// GET /health
    pub async fn health(&self) -> Result<HealthStatus> {
        let response = self
            .http
            .get(self.url("/health"))
            .send()
            .await
            .with_context(|| format!("cannot reach server at {}", self.base_url))?;
        Ok(response.error_for_status()?.json().await?)
    }

    /// POST /validate-keys
    pub async fn validate_keys(&self, payload: &CredentialPayload) -> Result<ValidateKeysResponse> {
        let response = self
            .http
            .post(self.url("/validate-keys"))
            .json(payload)
            .send()
            .await
            .context("validate-keys request failed")?;
        Ok(response.error_for_status()?.json().await?)
    }

    /// POST /agent
    pub async fn send(&self, request: &AgentRequest) -> Result<AgentReply> {
        let response = self
            .http
            .post(self.url("/agent"))
            .json(request)
            .send()
            .await
            .context("agent request failed")?;
        Ok(response.error_for_status()?.json().await?)
    }
}
