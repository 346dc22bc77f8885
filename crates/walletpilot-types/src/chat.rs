//! Chat message and HTTP exchange types for WalletPilot.
//!
//! The request/response bodies here are shared by the server handlers and the
//! terminal client so both sides agree on the JSON shape.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::credential::CredentialPayload;
use crate::error::AgentError;

/// Who wrote a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Agent,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::User => write!(f, "user"),
            Sender::Agent => write!(f, "agent"),
        }
    }
}

impl FromStr for Sender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Sender::User),
            "agent" => Ok(Sender::Agent),
            other => Err(format!("invalid sender: '{other}'")),
        }
    }
}

/// A single entry in the client-side conversation log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
        }
    }

    pub fn agent(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Agent,
            text: text.into(),
        }
    }
}

/// Body of `POST /agent`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentRequest {
    #[serde(default)]
    pub user_message: Option<String>,
    #[serde(default)]
    pub api_keys: Option<CredentialPayload>,
}

/// Body returned by `POST /agent`.
///
/// Success and failure share the HTTP status; they differ only by which
/// field is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AgentReply {
    Response { response: String },
    Error {
        error: String,
        #[serde(default)]
        kind: String,
    },
}

impl AgentReply {
    pub fn response(text: impl Into<String>) -> Self {
        AgentReply::Response {
            response: text.into(),
        }
    }

    pub fn into_result(self) -> Result<String, String> {
        match self {
            AgentReply::Response { response } => Ok(response),
            AgentReply::Error { error, .. } => Err(error),
        }
    }
}

impl From<Result<String, AgentError>> for AgentReply {
    fn from(result: Result<String, AgentError>) -> Self {
        match result {
            Ok(response) => AgentReply::Response { response },
            Err(e) => AgentReply::Error {
                kind: e.kind().to_string(),
                error: e.to_string(),
            },
        }
    }
}

/// Body returned by `POST /validate-keys`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateKeysResponse {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl ValidateKeysResponse {
    pub fn accepted(message: impl Into<String>) -> Self {
        Self {
            valid: true,
            error: None,
            message: Some(message.into()),
            kind: None,
        }
    }

    pub fn rejected(error: impl Into<String>) -> Self {
        Self {
            valid: false,
            error: Some(error.into()),
            message: None,
            kind: None,
        }
    }
}

impl From<Result<(), AgentError>> for ValidateKeysResponse {
    fn from(result: Result<(), AgentError>) -> Self {
        match result {
            Ok(()) => ValidateKeysResponse::accepted("API keys validated successfully"),
            Err(e) => ValidateKeysResponse {
                kind: Some(e.kind().to_string()),
                ..ValidateKeysResponse::rejected(e.to_string())
            },
        }
    }
}
