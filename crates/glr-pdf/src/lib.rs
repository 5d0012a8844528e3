//! GLR PDF Extraction
//!
//! Reads uploaded PDF reports from memory and produces the combined text
//! the extraction layer works on.
//!
//! # Behavior
//!
//! - Pages are visited in document order and their text appended directly
//!   to one buffer. No separator is inserted between pages or between
//!   documents, so the last word of one source can abut the first word of
//!   the next.
//! - The combined text is sanitized (see [`sanitize`]) before it is
//!   returned.
//! - A malformed PDF is unrecoverable for the run: the error propagates to
//!   the orchestrator. There is no partial-result policy.

#![warn(missing_docs)]

pub mod sanitize;

use lopdf::Document;
use thiserror::Error;
use tracing::debug;

pub use sanitize::sanitize;

/// Errors that can occur while extracting text from PDF sources
#[derive(Error, Debug)]
pub enum PdfError {
    /// The byte stream could not be parsed as a PDF document
    #[error("Failed to load PDF: {0}")]
    Load(String),

    /// A page's text content could not be extracted
    #[error("Failed to extract text: {0}")]
    Extraction(String),
}

/// Extract the text of every page of one PDF, in document order.
///
/// Page texts are appended directly to each other, without separators.
/// The output is not yet sanitized; [`combined_text`] sanitizes once over
/// the full concatenation.
pub fn extract_text(pdf_bytes: &[u8]) -> Result<String, PdfError> {
    let doc = Document::load_mem(pdf_bytes).map_err(|e| PdfError::Load(e.to_string()))?;

    let mut text = String::new();
    for (page_num, _page_id) in doc.get_pages() {
        let content = doc
            .extract_text(&[page_num])
            .map_err(|e| PdfError::Extraction(e.to_string()))?;
        text.push_str(&content);
    }

    Ok(text)
}

/// Extract and concatenate the text of every uploaded PDF, in upload order,
/// then sanitize the result.
///
/// Any source failing to parse fails the whole call.
pub fn combined_text(sources: &[Vec<u8>]) -> Result<String, PdfError> {
    let mut combined = String::new();
    for source in sources {
        combined.push_str(&extract_text(source)?);
    }

    let text = sanitize(&combined);
    debug!(chars = text.len(), sources = sources.len(), "extracted report text");
    Ok(text)
}
