//! Error types for the conversation engine.

use salus_core::SalusError;

/// Errors from the generative-text backend.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("generative request failed: {0}")]
    Request(String),
    #[error("generative API error {status}: {message}")]
    Api { status: u16, message: String },
    #[error("generative API returned no text")]
    EmptyResponse,
}

impl From<ChatError> for SalusError {
    fn from(err: ChatError) -> Self {
        SalusError::Chat(err.to_string())
    }
}
