//! Error types for voice input/output.

use salus_core::SalusError;

/// Errors from audio capture, recognition, and synthesis.
#[derive(Debug, thiserror::Error)]
pub enum VoiceError {
    #[error("voice input is not available: audio capture support is not installed")]
    CaptureUnavailable,
    #[error("audio capture failed: {0}")]
    Capture(String),
    #[error("could not understand audio")]
    Unrecognized,
    #[error("speech recognition request failed: {0}")]
    Recognition(String),
    #[error("speech synthesis failed: {0}")]
    Synthesis(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<VoiceError> for SalusError {
    fn from(err: VoiceError) -> Self {
        SalusError::Voice(err.to_string())
    }
}
