//! GLR Completion Providers
//!
//! Implementations of the `CompletionProvider` trait from `glr-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: deterministic test double with call counting
//! - `OpenRouterProvider`: OpenRouter chat-completions API
//!
//! # Examples
//!
//! ```
//! use glr_llm::MockProvider;
//! use glr_domain::CompletionProvider;
//!
//! let provider = MockProvider::new(r#"{"DATE_LOSS": "2024-11-13"}"#);
//! let result = provider.complete("any prompt").unwrap();
//! assert!(result.contains("DATE_LOSS"));
//! ```

#![warn(missing_docs)]

pub mod openrouter;

use glr_domain::CompletionProvider;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use openrouter::OpenRouterProvider;

/// Errors that can occur during a completion call.
///
/// The kinds are deliberately closed: a caller can tell a malformed
/// response apart from an unreachable service, even when it handles both
/// the same way.
#[derive(Error, Debug)]
pub enum LlmError {
    /// The HTTP client or request could not be constructed
    #[error("Request build error: {0}")]
    RequestBuild(String),

    /// The request could not be sent or the connection failed
    #[error("Transport error: {0}")]
    Transport(String),

    /// The service answered with a non-success HTTP status
    #[error("HTTP {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, as far as it could be read
        body: String,
    },

    /// The response envelope was not in the expected shape
    #[error("Invalid response: {0}")]
    Parse(String),
}

/// Mock completion provider for deterministic testing
///
/// Returns pre-configured responses without making any network calls and
/// records how many times it was called.
///
/// # Examples
///
/// ```
/// use glr_llm::MockProvider;
/// use glr_domain::CompletionProvider;
///
/// // Fixed response for every prompt
/// let provider = MockProvider::new("Fixed response");
/// assert_eq!(provider.complete("any prompt").unwrap(), "Fixed response");
/// assert_eq!(provider.call_count(), 1);
///
/// // A provider that always fails
/// let provider = MockProvider::failing();
/// assert!(provider.complete("any prompt").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    fail: bool,
    responses: Arc<Mutex<HashMap<String, String>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockProvider {
    /// Create a provider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            fail: false,
            responses: Arc::new(Mutex::new(HashMap::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Create a provider that fails every call with a transport error
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new("")
        }
    }

    /// Add a specific response for an exact prompt
    pub fn add_response(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(prompt.into(), response.into());
    }

    /// Number of times `complete` was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *self.call_count.lock().unwrap() = 0;
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl CompletionProvider for MockProvider {
    type Error = LlmError;

    fn complete(&self, prompt: &str) -> Result<String, Self::Error> {
        *self.call_count.lock().unwrap() += 1;

        if self.fail {
            return Err(LlmError::Transport("mock transport failure".to_string()));
        }

        let responses = self.responses.lock().unwrap();
        if let Some(response) = responses.get(prompt) {
            return Ok(response.clone());
        }

        Ok(self.default_response.clone())
    }
}
