//! Parsing of provider responses into field mappings

use glr_domain::FieldValues;

use crate::error::ExtractorError;

/// Parse a provider response into a field mapping.
///
/// Markdown code fences around the JSON body are stripped before
/// parsing. The response must contain a single JSON object whose
/// values are all strings.
pub fn parse_field_values(response: &str) -> Result<FieldValues, ExtractorError> {
    let json_text = extract_json(response);
    let values: FieldValues = serde_json::from_str(&json_text)?;
    Ok(values)
}

/// Strip markdown code fences from a response, if present.
fn extract_json(response: &str) -> String {
    let trimmed = response.trim();

    if trimmed.starts_with("```") {
        let mut lines: Vec<&str> = trimmed.lines().collect();
        lines.remove(0);
        if let Some(last) = lines.last() {
            if last.trim() == "```" {
                lines.pop();
            }
        }
        return lines.join("\n");
    }

    trimmed.to_string()
}
