//! Core value types shared across the pipeline

use std::collections::{BTreeMap, BTreeSet};

/// Mapping from placeholder name to its resolved textual value.
///
/// Produced either by the extraction layer (parsed from a model response)
/// or substituted wholesale by the fixed fallback record. The two sources
/// are never merged: a run uses one or the other in full.
pub type FieldValues = BTreeMap<String, String>;

/// The distinct placeholder names found in a template.
///
/// Set semantics dedupe repeated tokens. Iteration order is deterministic
/// but not part of the contract; consumers must not depend on it.
pub type PlaceholderSet = BTreeSet<String>;
