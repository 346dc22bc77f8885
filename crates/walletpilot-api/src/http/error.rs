//! Application error type and its mapping to response bodies.
//!
//! Every failure is answered with HTTP 200 and an `{ error, kind }` body;
//! clients branch on which field is present, then on `kind`.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use walletpilot_types::chat::AgentReply;
use walletpilot_types::error::AgentError;

/// Application-level error returned by handlers.
#[derive(Debug)]
pub enum AppError {
    /// Failure raised by the core services.
    Agent(AgentError),
    /// The request body was not valid JSON of the expected shape.
    Body(JsonRejection),
}

impl From<AgentError> for AppError {
    fn from(e: AgentError) -> Self {
        AppError::Agent(e)
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::Body(e)
    }
}

impl AppError {
    /// Collapse into the shared error taxonomy.
    pub fn into_agent_error(self) -> AgentError {
        match self {
            AppError::Agent(e) => e,
            AppError::Body(rejection) => {
                AgentError::Input(format!("Invalid request body: {}", rejection.body_text()))
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let reply = AgentReply::from(Err(self.into_agent_error()));
        (StatusCode::OK, Json(reply)).into_response()
    }
}
