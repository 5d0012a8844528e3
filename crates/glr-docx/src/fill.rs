//! Template filling
//!
//! Replaces `[name]` tokens in paragraph text with resolved values and
//! serializes a new document.
//!
//! Replacement is paragraph-level, matching the behavior this pipeline
//! inherits: a paragraph whose aggregate text matches any placeholder is
//! re-emitted as its paragraph properties plus a single run carrying the
//! rewritten text. That collapses per-run formatting (bold or italic spans
//! inside the paragraph) but guarantees every occurrence of every matched
//! placeholder is replaced even when a token spans run boundaries.
//! Paragraphs without a match are replayed event-for-event, untouched.

use crate::{read_document_xml, DocxError};
use glr_domain::FieldValues;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::io::{Cursor, Write};
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

/// Fill a DOCX template with the resolved field values.
///
/// For every body paragraph and every `(name, value)` pair, all occurrences
/// of the literal `[name]` in that paragraph's text are replaced by
/// `value`. Placeholders with no entry in the mapping are left as-is; that
/// is not an error. Returns the bytes of the rewritten archive.
pub fn fill_template(docx: &[u8], values: &FieldValues) -> Result<Vec<u8>, DocxError> {
    let xml = read_document_xml(docx)?;
    let (rewritten, replaced) = fill_document_xml(&xml, values)?;
    debug!(paragraphs = replaced, "filled template placeholders");
    rewrite_archive(docx, &rewritten)
}

/// Rewrite `word/document.xml`, returning the new bytes and the number of
/// paragraphs whose text changed.
fn fill_document_xml(xml: &str, values: &FieldValues) -> Result<(Vec<u8>, usize), DocxError> {
    let mut reader = Reader::from_str(xml);
    let mut writer = Writer::new(Cursor::new(Vec::new()));

    let mut paragraph: Option<ParagraphBuffer> = None;
    let mut replaced = 0usize;

    loop {
        let event = reader.read_event()?;
        match event {
            Event::Eof => break,
            Event::Start(e) if e.name().as_ref() == b"w:p" && paragraph.is_none() => {
                paragraph = Some(ParagraphBuffer::new(e.into_owned()));
            }
            event => {
                if let Some(mut open) = paragraph.take() {
                    if open.absorb(event)? {
                        if open.flush(&mut writer, values)? {
                            replaced += 1;
                        }
                    } else {
                        paragraph = Some(open);
                    }
                } else {
                    writer.write_event(event)?;
                }
            }
        }
    }

    Ok((writer.into_inner().into_inner(), replaced))
}

/// One body paragraph being buffered until its closing tag, so the whole
/// paragraph's text can be inspected before deciding how to emit it.
struct ParagraphBuffer {
    start: BytesStart<'static>,
    events: Vec<Event<'static>>,
    /// Aggregate of `w:t` text directly under this paragraph
    text: String,
    /// Nesting depth of inner `w:p` elements (text boxes)
    depth: usize,
    in_text: bool,
}

impl ParagraphBuffer {
    fn new(start: BytesStart<'static>) -> Self {
        Self {
            start,
            events: Vec::new(),
            text: String::new(),
            depth: 0,
            in_text: false,
        }
    }

    /// Buffer one event. Returns `true` when the paragraph's own closing
    /// tag was reached (the event is consumed, not buffered).
    fn absorb(&mut self, event: Event<'_>) -> Result<bool, DocxError> {
        match event {
            Event::Start(e) => {
                match e.name().as_ref() {
                    b"w:p" => self.depth += 1,
                    b"w:t" if self.depth == 0 => self.in_text = true,
                    _ => {}
                }
                self.events.push(Event::Start(e.into_owned()));
            }
            Event::End(e) => {
                match e.name().as_ref() {
                    b"w:p" => {
                        if self.depth == 0 {
                            return Ok(true);
                        }
                        self.depth -= 1;
                    }
                    b"w:t" => self.in_text = false,
                    _ => {}
                }
                self.events.push(Event::End(e.into_owned()));
            }
            Event::Text(t) => {
                if self.in_text {
                    self.text.push_str(&t.unescape()?);
                }
                self.events.push(Event::Text(t.into_owned()));
            }
            Event::CData(t) => {
                if self.in_text {
                    self.text.push_str(&String::from_utf8_lossy(&t));
                }
                self.events.push(Event::CData(t.into_owned()));
            }
            other => self.events.push(other.into_owned()),
        }
        Ok(false)
    }

    /// Emit the paragraph. Returns `true` if its text was rewritten.
    fn flush<W: Write>(
        self,
        writer: &mut Writer<W>,
        values: &FieldValues,
    ) -> Result<bool, DocxError> {
        match replace_placeholders(&self.text, values) {
            None => {
                writer.write_event(Event::Start(self.start))?;
                for event in self.events {
                    writer.write_event(event)?;
                }
                writer.write_event(Event::End(BytesEnd::new("w:p")))?;
                Ok(false)
            }
            Some(new_text) => {
                writer.write_event(Event::Start(self.start))?;
                // Paragraph properties survive; the runs are replaced
                // wholesale by a single run carrying the rewritten text.
                for event in paragraph_properties(&self.events) {
                    writer.write_event(event.clone())?;
                }

                let mut text_tag = BytesStart::new("w:t");
                text_tag.push_attribute(("xml:space", "preserve"));

                writer.write_event(Event::Start(BytesStart::new("w:r")))?;
                writer.write_event(Event::Start(text_tag))?;
                writer.write_event(Event::Text(BytesText::new(&new_text)))?;
                writer.write_event(Event::End(BytesEnd::new("w:t")))?;
                writer.write_event(Event::End(BytesEnd::new("w:r")))?;
                writer.write_event(Event::End(BytesEnd::new("w:p")))?;
                Ok(true)
            }
        }
    }
}

/// Apply every `(name, value)` pair to the paragraph text, replacing all
/// occurrences of `[name]`. Returns `None` when nothing matched.
fn replace_placeholders(text: &str, values: &FieldValues) -> Option<String> {
    let mut result = text.to_string();
    let mut changed = false;

    for (name, value) in values {
        let token = format!("[{}]", name);
        if result.contains(&token) {
            result = result.replace(&token, value);
            changed = true;
        }
    }

    changed.then_some(result)
}

/// The leading `w:pPr` subtree of a buffered paragraph, if present.
fn paragraph_properties<'a>(events: &'a [Event<'static>]) -> &'a [Event<'static>] {
    let mut idx = 0;
    while matches!(events.get(idx), Some(Event::Text(_))) {
        idx += 1;
    }

    match events.get(idx) {
        Some(Event::Empty(e)) if e.name().as_ref() == b"w:pPr" => &events[..=idx],
        Some(Event::Start(e)) if e.name().as_ref() == b"w:pPr" => {
            let mut depth = 0usize;
            for (i, event) in events.iter().enumerate().skip(idx) {
                match event {
                    Event::Start(_) => depth += 1,
                    Event::End(_) => {
                        depth -= 1;
                        if depth == 0 {
                            return &events[..=i];
                        }
                    }
                    _ => {}
                }
            }
            events
        }
        _ => &[],
    }
}

/// Produce a new archive with `word/document.xml` replaced and every other
/// entry copied through unchanged.
fn rewrite_archive(docx: &[u8], document_xml: &[u8]) -> Result<Vec<u8>, DocxError> {
    let mut archive = ZipArchive::new(Cursor::new(docx))?;
    let mut out = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        let name = entry.name().to_string();

        if entry.is_dir() {
            out.add_directory(name, options)?;
            continue;
        }

        out.start_file(name.as_str(), options)?;
        if name == "word/document.xml" {
            out.write_all(document_xml)?;
        } else {
            std::io::copy(&mut entry, &mut out)?;
        }
    }

    Ok(out.finish()?.into_inner())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: an empty mapping never changes any paragraph text
        #[test]
        fn test_empty_mapping_is_identity(text in any::<String>()) {
            prop_assert!(replace_placeholders(&text, &FieldValues::new()).is_none());
        }

        /// Property: text without brackets is never changed
        #[test]
        fn test_bracket_free_text_untouched(
            text in "[a-zA-Z0-9 .,]*",
            name in "[A-Z_]{1,12}",
            value in "[a-z0-9 ]{0,12}",
        ) {
            let mut mapping = FieldValues::new();
            mapping.insert(name, value);
            prop_assert!(replace_placeholders(&text, &mapping).is_none());
        }

        /// Property: after filling, the matched token never survives
        #[test]
        fn test_matched_token_never_survives(
            prefix in "[a-z ]{0,8}",
            suffix in "[a-z ]{0,8}",
            name in "[A-Z_]{1,12}",
            value in "[a-z0-9 ]{0,12}",
        ) {
            let token = format!("[{}]", name);
            let text = format!("{}{}{}{}", prefix, token, suffix, token);
            let mut mapping = FieldValues::new();
            mapping.insert(name, value);

            let result = replace_placeholders(&text, &mapping).unwrap();
            prop_assert!(!result.contains(&token));
        }
    }
}
