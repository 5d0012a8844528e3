//! Prompt construction for field extraction

use glr_domain::PlaceholderSet;

/// Maximum number of source characters included in a prompt.
///
/// Report text beyond this is dropped to bound request size.
pub const MAX_SOURCE_CHARS: usize = 6000;

const INSTRUCTION_HEADER: &str =
    "You are an insurance claim assistant. Extract values for the following placeholders:";

const OUTPUT_FORMAT_REMINDER: &str = r#"Return only valid JSON. Example:
{
  "DATE_LOSS": "2024-11-13",
  "INSURED_NAME": "Richard Daly"
}"#;

/// Build the extraction prompt for the given placeholders and source text.
///
/// The source text is truncated to its first [`MAX_SOURCE_CHARS`]
/// characters, cut on a character boundary.
pub fn build_prompt(placeholders: &PlaceholderSet, source_text: &str) -> String {
    let mut prompt = String::new();

    prompt.push_str(INSTRUCTION_HEADER);
    prompt.push_str("\n\n");

    let names: Vec<&str> = placeholders.iter().map(String::as_str).collect();
    prompt.push_str(&names.join(", "));
    prompt.push_str("\n\n");

    prompt.push_str("Text:\n\"\"\"\n");
    prompt.push_str(truncate_chars(source_text, MAX_SOURCE_CHARS));
    prompt.push_str("\n\"\"\"\n\n");

    prompt.push_str(OUTPUT_FORMAT_REMINDER);

    prompt
}

/// The first `max` characters of `text`.
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placeholders(names: &[&str]) -> PlaceholderSet {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_prompt_includes_placeholder_names() {
        let prompt = build_prompt(&placeholders(&["DATE_LOSS", "INSURED_NAME"]), "text");
        assert!(prompt.contains("DATE_LOSS"));
        assert!(prompt.contains("INSURED_NAME"));
    }

    #[test]
    fn test_prompt_includes_source_text() {
        let prompt = build_prompt(
            &placeholders(&["DATE_LOSS"]),
            "Hail event on 2024-11-13 in San Antonio",
        );
        assert!(prompt.contains("Hail event on 2024-11-13 in San Antonio"));
    }

    #[test]
    fn test_prompt_includes_instructions() {
        let prompt = build_prompt(&placeholders(&["A"]), "text");
        assert!(prompt.contains("insurance claim assistant"));
        assert!(prompt.contains("Return only valid JSON"));
    }

    #[test]
    fn test_prompt_truncates_long_source_text() {
        let long_text = format!("{}TAIL_MARKER", "a".repeat(MAX_SOURCE_CHARS));
        let prompt = build_prompt(&placeholders(&["A"]), &long_text);
        assert!(!prompt.contains("TAIL_MARKER"));
    }

    #[test]
    fn test_truncate_chars_counts_characters_not_bytes() {
        // Three bytes per char in UTF-8.
        let text = "\u{20AC}".repeat(10);
        assert_eq!(truncate_chars(&text, 4).chars().count(), 4);
        assert_eq!(truncate_chars(&text, 20), text.as_str());
    }

    #[test]
    fn test_truncate_chars_exact_boundary() {
        let text = "abcdef";
        assert_eq!(truncate_chars(text, 6), "abcdef");
        assert_eq!(truncate_chars(text, 3), "abc");
        assert_eq!(truncate_chars(text, 0), "");
    }
}
