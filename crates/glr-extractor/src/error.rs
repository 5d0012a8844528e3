//! Error types for the extraction layer

use thiserror::Error;

/// Errors that can occur while turning a model response into field values
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// The completion provider failed
    #[error("Provider error: {0}")]
    Provider(String),

    /// The response text was not a JSON object of string values
    #[error("Invalid field mapping: {0}")]
    InvalidMapping(String),
}

impl From<serde_json::Error> for ExtractorError {
    fn from(e: serde_json::Error) -> Self {
        ExtractorError::InvalidMapping(e.to_string())
    }
}
