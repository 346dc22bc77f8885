//! Agent chat endpoint handlers.

use std::time::Instant;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use tracing::Instrument;

use walletpilot_types::chat::{AgentReply, AgentRequest};
use walletpilot_types::wallet::ActionCapability;

use crate::http::error::AppError;
use crate::state::AppState;

/// POST /agent - Hand one user message to the caller's agent.
///
/// Always answers 200; failures come back as `{ error, kind }`.
pub async fn post_agent(
    State(state): State<AppState>,
    body: Result<Json<AgentRequest>, JsonRejection>,
) -> Result<Json<AgentReply>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();
    let span = tracing::info_span!("agent_request", %request_id);

    let Json(request) = body.inspect_err(|rejection| {
        span.in_scope(|| tracing::warn!(error = %rejection, "unreadable agent request body"));
    })?;

    let reply = state.handler.handle(request).instrument(span.clone()).await?;

    span.in_scope(|| {
        tracing::debug!(
            reply_len = reply.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "agent request answered"
        );
    });

    Ok(Json(AgentReply::response(reply)))
}

/// GET /agent - Static status payload.
pub async fn agent_status() -> Json<serde_json::Value> {
    let actions: Vec<&str> = ActionCapability::ALL.iter().map(|a| a.name()).collect();
    Json(serde_json::json!({
        "status": "ok",
        "message": "Agent API is running. POST a userMessage with apiKeys to chat.",
        "actions": actions,
    }))
}
