//! Credential validation endpoint.

use std::time::Instant;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use tracing::Instrument;

use walletpilot_types::chat::ValidateKeysResponse;
use walletpilot_types::credential::{CredentialPayload, NetworkId};
use walletpilot_types::error::AgentError;

use crate::http::error::AppError;
use crate::state::AppState;

/// POST /validate-keys - Check a credential set before the chat view unlocks.
pub async fn validate_keys(
    State(state): State<AppState>,
    body: Result<Json<CredentialPayload>, JsonRejection>,
) -> Json<ValidateKeysResponse> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();
    let span = tracing::info_span!("validate_keys", %request_id);

    let result = match body {
        Ok(Json(payload)) => check(&state, &payload).instrument(span.clone()).await,
        Err(rejection) => Err(AppError::from(rejection).into_agent_error()),
    };
    let response = ValidateKeysResponse::from(result);

    span.in_scope(|| {
        tracing::info!(
            valid = response.valid,
            kind = response.kind.as_deref().unwrap_or("-"),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "validate-keys answered"
        );
    });

    Json(response)
}

async fn check(state: &AppState, payload: &CredentialPayload) -> Result<(), AgentError> {
    if let Some(raw) = payload.network_id.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        raw.parse::<NetworkId>().map_err(AgentError::Input)?;
    }

    state
        .validator
        .validate(
            payload.openai_key.as_deref().unwrap_or_default(),
            payload.wallet_key_id.as_deref().unwrap_or_default(),
            payload.wallet_private_key.as_deref().unwrap_or_default(),
        )
        .await
}
