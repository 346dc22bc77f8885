use thiserror::Error;

/// Errors surfaced by the agent request path.
///
/// Every variant carries a human-readable message that is shown to the user
/// verbatim. None of them are retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AgentError {
    /// Missing or malformed request fields. No external call was made.
    #[error("{0}")]
    Input(String),

    /// A credential failed its shape check. No external call was made.
    #[error("{0}")]
    CredentialFormat(String),

    /// The LLM liveness probe rejected the credentials.
    #[error("{0}")]
    Validation(String),

    /// Wallet or agent setup failed.
    #[error("{0}")]
    Construction(String),

    /// The agent failed while handling a message.
    #[error("{0}")]
    Invocation(String),
}

impl AgentError {
    /// Stable machine-readable name of the error class.
    pub fn kind(&self) -> &'static str {
        match self {
            AgentError::Input(_) => "input_error",
            AgentError::CredentialFormat(_) => "credential_format_error",
            AgentError::Validation(_) => "validation_error",
            AgentError::Construction(_) => "construction_error",
            AgentError::Invocation(_) => "invocation_error",
        }
    }

    /// The user-facing message.
    pub fn message(&self) -> &str {
        match self {
            AgentError::Input(m)
            | AgentError::CredentialFormat(m)
            | AgentError::Validation(m)
            | AgentError::Construction(m)
            | AgentError::Invocation(m) => m,
        }
    }
}

/// Errors from wallet resolution and persistence.
#[derive(Debug, Error)]
pub enum WalletError {
    #[error(
        "Wallet address {address} found in {record} but no private key is available. \
         Provide the wallet private key (set WALLETPILOT_SIGNING_KEY) or delete {record} \
         to create a new wallet."
    )]
    MissingPrivateKey { address: String, record: String },

    #[error(
        "The available private key controls {derived}, but {record} records {recorded}. \
         Provide the matching private key or delete {record} to create a new wallet."
    )]
    AddressMismatch {
        recorded: String,
        derived: String,
        record: String,
    },

    #[error("invalid signing key: {0}")]
    InvalidKey(String),

    #[error("wallet record is corrupt: {0}")]
    CorruptRecord(String),

    #[error("credential file error: {0}")]
    CredentialFile(String),

    #[error("filesystem error: {0}")]
    FileSystem(String),
}

impl From<WalletError> for AgentError {
    fn from(e: WalletError) -> Self {
        AgentError::Construction(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_stable() {
        assert_eq!(AgentError::Input("x".into()).kind(), "input_error");
        assert_eq!(
            AgentError::CredentialFormat("x".into()).kind(),
            "credential_format_error"
        );
        assert_eq!(AgentError::Validation("x".into()).kind(), "validation_error");
        assert_eq!(AgentError::Construction("x".into()).kind(), "construction_error");
        assert_eq!(AgentError::Invocation("x".into()).kind(), "invocation_error");
    }

    #[test]
    fn display_is_the_bare_message() {
        let err = AgentError::Invocation("stream closed".into());
        assert_eq!(err.to_string(), "stream closed");
        assert_eq!(err.message(), "stream closed");
    }

    #[test]
    fn missing_key_message_names_both_remedies() {
        let err = WalletError::MissingPrivateKey {
            address: "0xabc".into(),
            record: "wallet_data.json".into(),
        };
        let msg = AgentError::from(err).to_string();
        assert!(msg.contains("0xabc"));
        assert!(msg.contains("WALLETPILOT_SIGNING_KEY"));
        assert!(msg.contains("delete wallet_data.json"));
    }
}
