use thiserror::Error;

use crate::interview::prompts::PromptError;
use crate::interview::session::SessionId;
use crate::llm_client::LlmError;

/// Errors raised by the interview engine.
///
/// Lookup failures mean "start a new session", `CompletionFailed` means
/// "retry the same call", `ConfigurationMissing` means "the service is misconfigured".
#[derive(Debug, Error)]
pub enum InterviewError {
    #[error("Session {0} not found")]
    SessionNotFound(SessionId),

    #[error("Session {0} has expired")]
    SessionExpired(SessionId),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Unknown section: {0}")]
    UnknownSection(String),

    #[error("Completion failed: {0}")]
    CompletionFailed(#[from] LlmError),

    #[error("Configuration missing: {0}")]
    ConfigurationMissing(String),

    #[error("Prompt error: {0}")]
    Prompt(#[from] PromptError),
}
