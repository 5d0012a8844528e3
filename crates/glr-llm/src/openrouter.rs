//! OpenRouter Provider Implementation
//!
//! Chat-completions client for OpenRouter-hosted models.
//!
//! # Behavior
//!
//! - Exactly one synchronous request per call: no retries, and no timeout
//!   beyond the transport's default.
//! - Authentication is a bearer credential threaded in at construction,
//!   plus the `HTTP-Referer` header OpenRouter uses to attribute traffic.
//!
//! # Examples
//!
//! ```no_run
//! use glr_llm::OpenRouterProvider;
//!
//! let provider = OpenRouterProvider::new("sk-or-...", "http://localhost:8080");
//! ```

use crate::LlmError;
use glr_domain::CompletionProvider;
use serde::{Deserialize, Serialize};

/// Default chat-completions endpoint
pub const DEFAULT_ENDPOINT: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Default model identifier
pub const DEFAULT_MODEL: &str = "mistralai/mixtral-8x7b";

/// Provider for OpenRouter's chat-completions API
pub struct OpenRouterProvider {
    endpoint: String,
    model: String,
    api_key: String,
    referer: String,
}

/// Request body for the chat-completions API
#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

/// A single chat message
#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

/// Response envelope from the chat-completions API
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessageBody,
}

#[derive(Deserialize)]
struct ChatMessageBody {
    content: String,
}

impl OpenRouterProvider {
    /// Create a provider with the default endpoint and model
    ///
    /// # Parameters
    ///
    /// - `api_key`: bearer credential for the `Authorization` header
    /// - `referer`: value for the `HTTP-Referer` header
    pub fn new(api_key: impl Into<String>, referer: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: api_key.into(),
            referer: referer.into(),
        }
    }

    /// Override the model identifier
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the endpoint URL
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

impl CompletionProvider for OpenRouterProvider {
    type Error = LlmError;

    fn complete(&self, prompt: &str) -> Result<String, Self::Error> {
        // Built per call: the whole pipeline makes one request per run, and
        // a blocking client must not be constructed on an async runtime
        // thread.
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(|e| LlmError::RequestBuild(e.to_string()))?;

        let body = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content: prompt.to_string(),
            }],
        };

        let response = client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .header("HTTP-Referer", &self.referer)
            .json(&body)
            .send()
            .map_err(|e| LlmError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .unwrap_or_else(|_| "unreadable body".to_string());
            return Err(LlmError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response.json().map_err(|e| LlmError::Parse(e.to_string()))?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::Parse("no choices in response".to_string()))?;

        Ok(choice.message.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_defaults() {
        let provider = OpenRouterProvider::new("test-key", "http://localhost:8080");
        assert_eq!(provider.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(provider.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_provider_overrides() {
        let provider = OpenRouterProvider::new("test-key", "http://localhost:8080")
            .with_model("mistralai/mistral-7b-instruct")
            .with_endpoint("http://localhost:9999/v1/chat/completions");

        assert_eq!(provider.model, "mistralai/mistral-7b-instruct");
        assert_eq!(
            provider.endpoint,
            "http://localhost:9999/v1/chat/completions"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let body = ChatRequest {
            model: DEFAULT_MODEL.to_string(),
            messages: vec![ChatMessage {
                role: "user",
                content: "extract the fields".to_string(),
            }],
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "mistralai/mixtral-8x7b");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "extract the fields");
    }

    #[test]
    fn test_response_envelope_parsing() {
        let raw = r#"{
            "id": "gen-1234",
            "choices": [
                {
                    "message": {
                        "role": "assistant",
                        "content": "{\"DATE_LOSS\": \"2024-11-13\"}"
                    },
                    "finish_reason": "stop"
                }
            ]
        }"#;

        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(
            parsed.choices[0].message.content,
            "{\"DATE_LOSS\": \"2024-11-13\"}"
        );
    }

    #[test]
    fn test_complete_unreachable_endpoint() {
        // Nothing listens on port 9; the connection fails immediately.
        let provider = OpenRouterProvider::new("test-key", "http://localhost:8080")
            .with_endpoint("http://127.0.0.1:9/v1/chat/completions");

        let result = provider.complete("test prompt");
        assert!(matches!(result, Err(LlmError::Transport(_))));
    }
}
