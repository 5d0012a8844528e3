//! Extraction client orchestrating prompt, provider, and parsing

use std::fmt::Display;

use glr_domain::{CompletionProvider, FieldValues, PlaceholderSet};
use tracing::{debug, warn};

use crate::error::ExtractorError;
use crate::parser::parse_field_values;
use crate::prompt::build_prompt;

/// Client that turns report text and a placeholder set into a field
/// mapping by querying a completion provider.
pub struct ExtractionClient<P> {
    provider: P,
}

impl<P> ExtractionClient<P>
where
    P: CompletionProvider,
    P::Error: Display,
{
    /// Create a client backed by the given provider.
    pub fn new(provider: P) -> Self {
        ExtractionClient { provider }
    }

    /// Extract field values, returning an error when the provider
    /// fails or its response cannot be parsed.
    pub fn try_extract(
        &self,
        source_text: &str,
        placeholders: &PlaceholderSet,
    ) -> Result<FieldValues, ExtractorError> {
        let prompt = build_prompt(placeholders, source_text);
        debug!(
            prompt_chars = prompt.chars().count(),
            placeholder_count = placeholders.len(),
            "Sending extraction prompt"
        );

        let response = self
            .provider
            .complete(&prompt)
            .map_err(|e| ExtractorError::Provider(e.to_string()))?;

        parse_field_values(&response)
    }

    /// Extract field values, substituting an empty mapping when the
    /// provider fails or its response cannot be parsed.
    pub fn extract(&self, source_text: &str, placeholders: &PlaceholderSet) -> FieldValues {
        match self.try_extract(source_text, placeholders) {
            Ok(values) => values,
            Err(e) => {
                warn!("LLM call failed: {}", e);
                FieldValues::new()
            }
        }
    }
}
