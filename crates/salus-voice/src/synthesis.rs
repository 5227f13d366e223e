//! Cloud text-to-speech client and local playback.
//!
//! Synthesized audio lands at one fixed path per assistant, overwriting
//! any previous clip; overlapping playback requests are an acknowledged
//! unsafe point and are not guarded. Playback itself is delegated to the
//! platform's default media opener, with a wait proportional to word
//! count standing in for the real clip duration. The generated file is
//! removed once the wait elapses.

use std::path::{Path, PathBuf};
use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::VoiceError;

const BASE_URL: &str = "https://texttospeech.googleapis.com/v1";

/// Client for the cloud text-to-speech service plus local playback.
pub struct SpeechSynthesizer {
    client: Client,
    api_key: String,
    language: String,
    voice: Option<String>,
    audio_path: PathBuf,
    playback_secs_per_word: f64,
    base_url: String,
}

impl SpeechSynthesizer {
    /// Synthesizer writing clips to `<data_dir>/tmp/response.mp3`.
    pub fn new(
        api_key: impl Into<String>,
        language: impl Into<String>,
        voice: Option<String>,
        data_dir: &Path,
        playback_secs_per_word: f64,
    ) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            language: language.into(),
            voice,
            audio_path: data_dir.join("tmp").join("response.mp3"),
            playback_secs_per_word,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Override the endpoint root. Used by tests against a local server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// The fixed path synthesized audio is written to.
    pub fn audio_path(&self) -> &Path {
        &self.audio_path
    }

    /// Synthesize `text` to MP3 bytes.
    pub async fn synthesize(&self, text: &str) -> Result<Vec<u8>, VoiceError> {
        let request = SynthesizeRequest {
            input: SynthesisInput {
                text: text.to_string(),
            },
            voice: VoiceSelection {
                language_code: self.language.clone(),
                name: self.voice.clone(),
            },
            audio_config: AudioConfig {
                audio_encoding: "MP3".to_string(),
            },
        };

        let url = format!("{}/text:synthesize?key={}", self.base_url, self.api_key);
        let response = self
            .client
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(|e| VoiceError::Synthesis(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(VoiceError::Synthesis(format!("{}: {}", status, body)));
        }

        let parsed: SynthesizeResponse = response
            .json()
            .await
            .map_err(|e| VoiceError::Synthesis(e.to_string()))?;

        BASE64_STANDARD
            .decode(parsed.audio_content)
            .map_err(|e| VoiceError::Synthesis(e.to_string()))
    }

    /// Synthesize and play `text`, blocking for an approximate playback
    /// duration. Failures are logged and swallowed; this never errors.
    pub async fn speak(&self, text: &str) {
        if let Err(e) = self.speak_inner(text).await {
            warn!(error = %e, "Text-to-speech failed");
        }
    }

    async fn speak_inner(&self, text: &str) -> Result<(), VoiceError> {
        let audio = self.synthesize(text).await?;

        if let Some(parent) = self.audio_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.audio_path, audio)?;

        open_with_default_player(&self.audio_path)?;

        let delay = playback_delay(text, self.playback_secs_per_word);
        debug!(secs = delay.as_secs_f64(), "Waiting out approximate playback");
        tokio::time::sleep(delay).await;

        // Remove the generated clip once playback should be done.
        if let Err(e) = std::fs::remove_file(&self.audio_path) {
            warn!(path = %self.audio_path.display(), error = %e, "Failed to remove audio clip");
        }
        Ok(())
    }
}

/// Word-count heuristic standing in for the real clip duration.
pub fn playback_delay(text: &str, secs_per_word: f64) -> Duration {
    let words = text.split_whitespace().count();
    Duration::from_secs_f64(words as f64 * secs_per_word)
}

/// Hand the clip to the platform's default media opener, detached.
fn open_with_default_player(path: &Path) -> Result<(), VoiceError> {
    #[cfg(target_os = "windows")]
    let mut command = {
        let mut c = std::process::Command::new("cmd");
        c.args(["/C", "start", ""]).arg(path);
        c
    };
    #[cfg(target_os = "macos")]
    let mut command = {
        let mut c = std::process::Command::new("open");
        c.arg(path);
        c
    };
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    let mut command = {
        let mut c = std::process::Command::new("xdg-open");
        c.arg(path);
        c
    };

    command
        .spawn()
        .map(|_| ())
        .map_err(|e| VoiceError::Synthesis(format!("failed to launch player: {}", e)))
}

#[derive(Serialize)]
struct SynthesizeRequest {
    input: SynthesisInput,
    voice: VoiceSelection,
    #[serde(rename = "audioConfig")]
    audio_config: AudioConfig,
}

#[derive(Serialize)]
struct SynthesisInput {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceSelection {
    language_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig {
    audio_encoding: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    audio_content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playback_delay_scales_with_word_count() {
        let delay = playback_delay("please drink more water today", 0.3);
        assert!((delay.as_secs_f64() - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_playback_delay_empty_text() {
        assert_eq!(playback_delay("", 0.3), Duration::ZERO);
        assert_eq!(playback_delay("   ", 0.3), Duration::ZERO);
    }

    #[test]
    fn test_playback_delay_ignores_extra_whitespace() {
        let a = playback_delay("one  two\tthree", 0.3);
        let b = playback_delay("one two three", 0.3);
        assert_eq!(a, b);
    }

    #[test]
    fn test_audio_path_is_fixed_under_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let synth = SpeechSynthesizer::new("key", "en-US", None, dir.path(), 0.3);
        assert_eq!(
            synth.audio_path(),
            dir.path().join("tmp").join("response.mp3")
        );
    }

    #[test]
    fn test_voice_selection_omits_empty_name() {
        let selection = VoiceSelection {
            language_code: "en-US".to_string(),
            name: None,
        };
        let json = serde_json::to_string(&selection).unwrap();
        assert_eq!(json, r#"{"languageCode":"en-US"}"#);
    }

    #[tokio::test]
    async fn test_speak_swallows_synthesis_failure() {
        let dir = tempfile::tempdir().unwrap();
        let synth = SpeechSynthesizer::new("key", "en-US", None, dir.path(), 0.0)
            .with_base_url("http://127.0.0.1:9/v1");
        // Unreachable endpoint: speak must return without error or panic.
        synth.speak("hello there").await;
        assert!(!synth.audio_path().exists());
    }
}
