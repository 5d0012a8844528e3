//! Trait definitions for external interactions
//!
//! These traits define the boundary between pipeline logic and
//! infrastructure. Implementations live in other crates.

/// Trait for chat-completion providers
///
/// Implemented by the infrastructure layer (glr-llm). A provider performs
/// exactly one completion per call; retry policy, if any, belongs to the
/// implementation, not the callers.
pub trait CompletionProvider {
    /// Error type for provider operations
    type Error;

    /// Request a single completion for the prompt, returning the raw
    /// model-generated text
    fn complete(&self, prompt: &str) -> Result<String, Self::Error>;
}
