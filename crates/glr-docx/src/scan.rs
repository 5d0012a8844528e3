//! Placeholder scanning
//!
//! Finds the distinct `[NAME]` tokens a template expects values for.

use crate::{read_document_xml, DocxError};
use glr_domain::PlaceholderSet;
use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::debug;

/// Scan a DOCX template for bracketed placeholder tokens.
///
/// Each paragraph's text is split on whitespace; a token qualifies when it
/// starts with `[` and ends with `]`, and its bracket-stripped name joins
/// the set. A template with zero qualifying tokens yields an empty set,
/// which is a valid outcome, not an error.
pub fn scan_placeholders(docx: &[u8]) -> Result<PlaceholderSet, DocxError> {
    let xml = read_document_xml(docx)?;
    let mut placeholders = PlaceholderSet::new();

    for text in paragraph_texts(&xml)? {
        for token in text.split_whitespace() {
            if let Some(name) = placeholder_name(token) {
                placeholders.insert(name.to_string());
            }
        }
    }

    debug!(count = placeholders.len(), "scanned template placeholders");
    Ok(placeholders)
}

/// The bracket-stripped name of a qualifying token, if any.
///
/// A token qualifies only as a whole word: trailing punctuation such as
/// `[NAME],` disqualifies it.
fn placeholder_name(token: &str) -> Option<&str> {
    if token.starts_with('[') && token.ends_with(']') {
        Some(token.trim_matches(|c| c == '[' || c == ']'))
    } else {
        None
    }
}

/// Collect the aggregate text of every body paragraph, in document order.
///
/// Only `w:t` content directly under a body paragraph counts; paragraphs
/// nested inside other paragraphs (text boxes) are not body text.
pub(crate) fn paragraph_texts(xml: &str) -> Result<Vec<String>, DocxError> {
    let mut reader = Reader::from_str(xml);

    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut p_depth = 0usize;
    let mut in_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:p" => p_depth += 1,
                b"w:t" if p_depth == 1 => in_text = true,
                _ => {}
            },
            Event::End(e) => match e.name().as_ref() {
                b"w:p" => {
                    p_depth = p_depth.saturating_sub(1);
                    if p_depth == 0 {
                        paragraphs.push(std::mem::take(&mut current));
                    }
                }
                b"w:t" => in_text = false,
                _ => {}
            },
            Event::Text(t) => {
                if in_text {
                    current.push_str(&t.unescape()?);
                }
            }
            Event::CData(t) => {
                if in_text {
                    current.push_str(&String::from_utf8_lossy(&t));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}
