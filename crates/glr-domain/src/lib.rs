//! GLR Domain Layer
//!
//! Shared vocabulary for the GLR report pipeline: the field-value mapping
//! produced by extraction, the placeholder set scanned from templates, and
//! the trait seam behind which completion providers live.
//!
//! This crate has no external dependencies. Infrastructure implementations
//! (HTTP providers, document parsers) live in other crates and depend on
//! this one, never the reverse.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod traits;
pub mod types;

// Re-exports for convenience
pub use traits::CompletionProvider;
pub use types::{FieldValues, PlaceholderSet};
