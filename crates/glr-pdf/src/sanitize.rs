//! Normalization of extracted page text
//!
//! PDF text extraction can surface lossy-decode replacement characters and
//! stray control bytes. Downstream consumers (prompt construction, template
//! text) expect clean printable text, so those are dropped here rather than
//! escaped.

/// Drop characters that would not survive re-encoding to clean text.
///
/// Removes the Unicode replacement character and control characters other
/// than `\n`, `\r`, and `\t`. Never fails, and is idempotent: sanitizing
/// already-sanitized text returns it unchanged.
pub fn sanitize(text: &str) -> String {
    text.chars()
        .filter(|&c| {
            c != char::REPLACEMENT_CHARACTER && (!c.is_control() || matches!(c, '\n' | '\r' | '\t'))
        })
        .collect()
}
