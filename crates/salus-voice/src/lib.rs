//! Salus voice crate - speech input and spoken replies.
//!
//! [`VoiceAssistant`] pairs microphone capture (optional `microphone`
//! feature) with cloud speech recognition, and text-to-speech synthesis
//! with local playback. Capture availability is checked before anything
//! else, so an environment without audio support answers immediately and
//! never touches the network.

pub mod capture;
pub mod error;
pub mod recognizer;
pub mod synthesis;

pub use capture::{MicrophoneCapture, Utterance};
pub use error::VoiceError;
pub use recognizer::SpeechClient;
pub use synthesis::{playback_delay, SpeechSynthesizer};

use std::path::Path;

use salus_core::config::VoiceConfig;

/// Voice input/output for one session.
pub struct VoiceAssistant {
    capture: MicrophoneCapture,
    recognizer: SpeechClient,
    synthesizer: SpeechSynthesizer,
}

impl VoiceAssistant {
    /// Assistant using the given cloud API key and voice settings, with
    /// synthesized audio stored under `data_dir`.
    pub fn new(api_key: &str, config: &VoiceConfig, data_dir: &Path) -> Self {
        let voice = if config.voice.is_empty() {
            None
        } else {
            Some(config.voice.clone())
        };
        Self {
            capture: MicrophoneCapture::new(),
            recognizer: SpeechClient::new(api_key, config.language.clone()),
            synthesizer: SpeechSynthesizer::new(
                api_key,
                config.language.clone(),
                voice,
                data_dir,
                config.playback_secs_per_word,
            ),
        }
    }

    /// Whether microphone capture can be attempted.
    pub fn is_available(&self) -> bool {
        self.capture.is_available()
    }

    /// Capture one utterance and transcribe it.
    ///
    /// When capture is unavailable this returns
    /// [`VoiceError::CaptureUnavailable`] without recording or calling the
    /// recognition service.
    pub async fn listen(&self) -> Result<String, VoiceError> {
        let utterance = self.capture.record()?;
        self.recognizer.recognize(&utterance).await
    }

    /// Speak `text` aloud. Failures are logged and swallowed.
    pub async fn speak(&self, text: &str) {
        self.synthesizer.speak(text).await;
    }
}
