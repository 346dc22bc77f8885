//! Chat client state machine.
//!
//! `ChatView` owns everything a chat client displays: whether credentials are
//! configured, the message log and the in-flight flag. It performs no IO; the
//! caller sends the [`AgentRequest`] it produces and feeds the outcome back
//! through [`ChatView::complete`].
//!
//! The transcript helpers write the log as plain text and read it back:
//!
//! ```text
//! ## user
//!   What's my balance?
//! ## agent
//!   Your balance is 0 ETH.
//! ```

use thiserror::Error;

use walletpilot_types::chat::{AgentRequest, ChatMessage, Sender, ValidateKeysResponse};
use walletpilot_types::credential::CredentialPayload;

const HEADER_PREFIX: &str = "## ";
const CONTENT_INDENT: &str = "  ";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UiError {
    #[error("{0}")]
    Rejected(String),

    #[error("configure your API keys first")]
    NotConfigured,

    #[error("a request is already in flight")]
    RequestInFlight,

    #[error("A message is required.")]
    EmptyMessage,

    #[error("transcript line {line}: {reason}")]
    Transcript { line: usize, reason: String },
}

/// Which screen the client is on.
#[derive(Debug, Clone, Default)]
pub enum ViewState {
    /// Credential form.
    #[default]
    Unconfigured,
    /// Chat view, holding the accepted credentials in memory only.
    Configured(CredentialPayload),
}

#[derive(Debug, Default)]
pub struct ChatView {
    state: ViewState,
    messages: Vec<ChatMessage>,
    in_flight: bool,
}

impl ChatView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_configured(&self) -> bool {
        matches!(self.state, ViewState::Configured(_))
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn credentials(&self) -> Option<&CredentialPayload> {
        match &self.state {
            ViewState::Configured(payload) => Some(payload),
            ViewState::Unconfigured => None,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Apply the outcome of a `validate-keys` call.
    ///
    /// Only an accepted response moves the view to `Configured`; a rejection
    /// leaves it on the credential form and returns the server's reason.
    pub fn configure(
        &mut self,
        payload: CredentialPayload,
        outcome: &ValidateKeysResponse,
    ) -> Result<(), UiError> {
        if !outcome.valid {
            let reason = outcome
                .error
                .clone()
                .unwrap_or_else(|| "API keys were rejected".to_string());
            return Err(UiError::Rejected(reason));
        }
        self.state = ViewState::Configured(payload);
        Ok(())
    }

    /// Start sending `text`.
    ///
    /// Appends the user message immediately and marks a request in flight.
    /// Returns the request body to post to `/agent`.
    pub fn begin_send(&mut self, text: &str) -> Result<AgentRequest, UiError> {
        let ViewState::Configured(payload) = &self.state else {
            return Err(UiError::NotConfigured);
        };
        if self.in_flight {
            return Err(UiError::RequestInFlight);
        }
        let text = text.trim();
        if text.is_empty() {
            return Err(UiError::EmptyMessage);
        }

        let request = AgentRequest {
            user_message: Some(text.to_string()),
            api_keys: Some(payload.clone()),
        };
        self.messages.push(ChatMessage::user(text));
        self.in_flight = true;
        Ok(request)
    }

    /// Finish the in-flight request. Errors are shown as agent messages.
    pub fn complete(&mut self, outcome: Result<String, String>) {
        if !self.in_flight {
            return;
        }
        let text = match outcome {
            Ok(reply) => reply,
            Err(error) => error,
        };
        self.messages.push(ChatMessage::agent(text));
        self.in_flight = false;
    }

    /// Drop the message log but keep the credentials.
    pub fn clear_messages(&mut self) {
        self.messages.clear();
    }

    /// Forget the credentials and the message log.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Render a message log as a plain-text transcript.
pub fn render_transcript(messages: &[ChatMessage]) -> String {
    let mut out = String::new();
    for message in messages {
        out.push_str(HEADER_PREFIX);
        out.push_str(&message.sender.to_string());
        out.push('\n');
        for line in message.text.split('\n') {
            out.push_str(CONTENT_INDENT);
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}

/// Read a transcript produced by [`render_transcript`] back into messages.
pub fn parse_transcript(transcript: &str) -> Result<Vec<ChatMessage>, UiError> {
    let mut messages: Vec<ChatMessage> = Vec::new();
    let mut current: Option<(Sender, Vec<&str>)> = None;

    let body = transcript.strip_suffix('\n').unwrap_or(transcript);
    if body.is_empty() {
        return Ok(messages);
    }

    for (i, line) in body.split('\n').enumerate() {
        let line_no = i + 1;
        if let Some(sender) = line.strip_prefix(HEADER_PREFIX) {
            let sender: Sender = sender.parse().map_err(|reason| UiError::Transcript {
                line: line_no,
                reason,
            })?;
            if let Some((sender, lines)) = current.take() {
                messages.push(finish(sender, lines));
            }
            current = Some((sender, Vec::new()));
        } else if let Some(content) = line.strip_prefix(CONTENT_INDENT) {
            match current.as_mut() {
                Some((_, lines)) => lines.push(content),
                None => {
                    return Err(UiError::Transcript {
                        line: line_no,
                        reason: "content before the first header".to_string(),
                    });
                }
            }
        } else {
            return Err(UiError::Transcript {
                line: line_no,
                reason: format!("unexpected line: '{line}'"),
            });
        }
    }

    if let Some((sender, lines)) = current {
        messages.push(finish(sender, lines));
    }
    Ok(messages)
}

fn finish(sender: Sender, lines: Vec<&str>) -> ChatMessage {
    ChatMessage {
        sender,
        text: lines.join("\n"),
    }
}
