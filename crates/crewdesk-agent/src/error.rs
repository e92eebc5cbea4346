//! Error types for the agent crate

use thiserror::Error;

/// Errors raised at the inference and tool boundary.
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("authentication rejected by provider: {0}")]
    Auth(String),

    #[error("provider error ({status}): {message}")]
    Provider { status: u16, message: String },

    #[error("inference error: {0}")]
    Inference(String),

    #[error("model returned an empty completion")]
    EmptyCompletion,

    #[error("tool error: {0}")]
    Tool(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl AgentError {
    /// Whether this failure points at a credential problem.
    ///
    /// Auth rejections are typed; for provider-reported errors we keep the
    /// substring check on the message so hosted endpoints that report key
    /// problems as plain 4xx bodies still get the credential hint.
    pub fn is_credential_related(&self) -> bool {
        match self {
            AgentError::Auth(_) => true,
            AgentError::Provider { message, .. } => message.contains("API key"),
            AgentError::Inference(message) => message.contains("API key"),
            _ => false,
        }
    }
}

/// Result type alias for agent operations.
pub type Result<T> = std::result::Result<T, AgentError>;
