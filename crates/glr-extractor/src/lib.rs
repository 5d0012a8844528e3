//! GLR Field Extraction
//!
//! Turns unstructured report text into the field values a template needs,
//! using a completion provider behind the `glr-domain` trait seam.
//!
//! # Overview
//!
//! The extraction client builds one prompt (placeholder names plus the
//! report text, truncated to bound request size), performs one completion,
//! and parses the response as a JSON object mapping placeholder names to
//! string values. Failures never escape the client: every provider or
//! parse error degrades to an empty mapping, which callers replace with
//! the fixed fallback record.
//!
//! # Example
//!
//! ```
//! use glr_extractor::{fallback_values, ExtractionClient};
//! use glr_domain::PlaceholderSet;
//! use glr_llm::MockProvider;
//!
//! let provider = MockProvider::new(r#"{"DATE_LOSS": "2024-11-13"}"#);
//! let client = ExtractionClient::new(provider);
//!
//! let mut placeholders = PlaceholderSet::new();
//! placeholders.insert("DATE_LOSS".to_string());
//!
//! let mut values = client.extract("report text", &placeholders);
//! if values.is_empty() {
//!     values = fallback_values();
//! }
//! assert_eq!(values["DATE_LOSS"], "2024-11-13");
//! ```

#![warn(missing_docs)]

mod client;
mod error;
mod fallback;
mod parser;
mod prompt;

pub use client::ExtractionClient;
pub use error::ExtractorError;
pub use fallback::fallback_values;
pub use parser::parse_field_values;
pub use prompt::{build_prompt, MAX_SOURCE_CHARS};
