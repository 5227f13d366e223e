//! Generative-text backends.
//!
//! [`GeminiClient`] talks to the Gemini REST API directly; [`MockBackend`]
//! records prompts and returns canned replies for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::ChatError;

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// A service that completes a single prompt into text.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, ChatError>;
}

/// Backend implementation that talks to the Gemini HTTP API.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Client with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Override the endpoint root. Used by tests against a local server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// The configured model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl GenerativeBackend for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, ChatError> {
        let url = format!(
            "{}/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ChatError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::Api {
                status,
                message: extract_api_error(&body),
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ChatError::Request(e.to_string()))?;

        extract_text(parsed)
    }
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

fn extract_text(response: GenerateContentResponse) -> Result<String, ChatError> {
    response
        .candidates
        .and_then(|mut candidates| candidates.pop())
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
        .ok_or(ChatError::EmptyResponse)
}

fn extract_api_error(body: &str) -> String {
    serde_json::from_str::<ErrorWrapper>(body)
        .map(|wrapper| {
            let status = wrapper.error.status.unwrap_or_default();
            let message = wrapper.error.message.unwrap_or_else(|| body.to_string());
            if status.is_empty() {
                message
            } else {
                format!("{}: {}", status, message)
            }
        })
        .unwrap_or_else(|_| body.to_string())
}

/// Canned backend for tests. Records every prompt it receives.
pub struct MockBackend {
    reply: Result<String, String>,
    prompts: Mutex<Vec<String>>,
}

impl MockBackend {
    /// Mock that replies with the given text.
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Mock whose every call fails with a request error.
    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerativeBackend for MockBackend {
    async fn generate(&self, prompt: &str) -> Result<String, ChatError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(message) => Err(ChatError::Request(message.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> GenerateContentResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_extract_text_from_candidate() {
        let response = parse(
            r#"{"candidates": [{"content": {"parts": [{"text": "Stay hydrated."}]}}]}"#,
        );
        assert_eq!(extract_text(response).unwrap(), "Stay hydrated.");
    }

    #[test]
    fn test_extract_text_no_candidates() {
        let response = parse(r#"{"candidates": []}"#);
        assert!(matches!(
            extract_text(response),
            Err(ChatError::EmptyResponse)
        ));
    }

    #[test]
    fn test_extract_text_missing_field() {
        let response = parse(r#"{}"#);
        assert!(matches!(
            extract_text(response),
            Err(ChatError::EmptyResponse)
        ));
    }

    #[test]
    fn test_extract_api_error_structured() {
        let body = r#"{"error": {"code": 429, "message": "quota", "status": "RESOURCE_EXHAUSTED"}}"#;
        assert_eq!(extract_api_error(body), "RESOURCE_EXHAUSTED: quota");
    }

    #[test]
    fn test_extract_api_error_unstructured_falls_back_to_body() {
        assert_eq!(extract_api_error("gateway timeout"), "gateway timeout");
    }

    #[tokio::test]
    async fn test_mock_backend_records_prompts() {
        let backend = MockBackend::replying("ok");
        backend.generate("first").await.unwrap();
        backend.generate("second").await.unwrap();
        assert_eq!(backend.prompts(), vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_mock_backend_failing() {
        let backend = MockBackend::failing("boom");
        let err = backend.generate("prompt").await.unwrap_err();
        assert!(matches!(err, ChatError::Request(m) if m == "boom"));
    }

    #[tokio::test]
    async fn test_gemini_unreachable_endpoint_is_request_error() {
        let client =
            GeminiClient::new("key", "gemini-1.5-pro").with_base_url("http://127.0.0.1:9/models");
        let err = client.generate("hello").await.unwrap_err();
        assert!(matches!(err, ChatError::Request(_)));
    }
}
