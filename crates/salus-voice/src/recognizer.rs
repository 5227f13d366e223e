//! Cloud speech-to-text client.

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::capture::Utterance;
use crate::error::VoiceError;

const BASE_URL: &str = "https://speech.googleapis.com/v1";

/// Client for the cloud speech-recognition service.
pub struct SpeechClient {
    client: Client,
    api_key: String,
    language: String,
    base_url: String,
}

impl SpeechClient {
    pub fn new(api_key: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            language: language.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Override the endpoint root. Used by tests against a local server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Transcribe one utterance.
    pub async fn recognize(&self, utterance: &Utterance) -> Result<String, VoiceError> {
        let request = RecognizeRequest {
            config: RecognitionConfig {
                encoding: "LINEAR16".to_string(),
                sample_rate_hertz: utterance.sample_rate,
                language_code: self.language.clone(),
            },
            audio: RecognitionAudio {
                content: encode_linear16(&utterance.samples),
            },
        };

        let url = format!("{}/speech:recognize?key={}", self.base_url, self.api_key);
        let response = self
            .client
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(|e| VoiceError::Recognition(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(VoiceError::Recognition(format!("{}: {}", status, body)));
        }

        let parsed: RecognizeResponse = response
            .json()
            .await
            .map_err(|e| VoiceError::Recognition(e.to_string()))?;

        first_transcript(parsed)
    }
}

#[derive(Serialize)]
struct RecognizeRequest {
    config: RecognitionConfig,
    audio: RecognitionAudio,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RecognitionConfig {
    encoding: String,
    sample_rate_hertz: u32,
    language_code: String,
}

#[derive(Serialize)]
struct RecognitionAudio {
    content: String,
}

#[derive(Deserialize)]
struct RecognizeResponse {
    #[serde(default)]
    results: Vec<RecognitionResult>,
}

#[derive(Deserialize)]
struct RecognitionResult {
    #[serde(default)]
    alternatives: Vec<RecognitionAlternative>,
}

#[derive(Deserialize)]
struct RecognitionAlternative {
    transcript: Option<String>,
}

/// Base64-encode PCM16 samples as little-endian bytes.
fn encode_linear16(samples: &[i16]) -> String {
    let mut bytes = Vec::with_capacity(samples.len() * 2);
    for sample in samples {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }
    BASE64_STANDARD.encode(bytes)
}

/// The top alternative of the first result, or [`VoiceError::Unrecognized`]
/// when the service heard nothing it could transcribe.
fn first_transcript(response: RecognizeResponse) -> Result<String, VoiceError> {
    response
        .results
        .into_iter()
        .next()
        .and_then(|result| result.alternatives.into_iter().next())
        .and_then(|alternative| alternative.transcript)
        .ok_or(VoiceError::Unrecognized)
}
