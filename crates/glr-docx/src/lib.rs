//! GLR DOCX Templates
//!
//! Placeholder scanning and template filling over DOCX files. A DOCX is a
//! ZIP archive whose main body lives in `word/document.xml`
//! (WordprocessingML): paragraphs are `w:p` elements and their visible text
//! is carried by `w:t` elements inside runs.
//!
//! Both operations work on whole uploaded byte buffers; nothing is written
//! to disk. Filling produces a new archive in which every part other than
//! `word/document.xml` is copied through unchanged.

#![warn(missing_docs)]

pub mod fill;
pub mod scan;

#[cfg(test)]
mod tests;

use std::io::{Cursor, Read};
use thiserror::Error;

pub use fill::fill_template;
pub use scan::scan_placeholders;

/// Errors that can occur while reading or rewriting a DOCX template
#[derive(Error, Debug)]
pub enum DocxError {
    /// The byte stream is not a readable ZIP archive
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// The archive has no `word/document.xml` part
    #[error("Not a Word document: missing word/document.xml")]
    MissingDocument,

    /// The document part is not well-formed WordprocessingML
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// An archive entry could not be read or written
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Read the main document part out of a DOCX archive.
pub(crate) fn read_document_xml(docx: &[u8]) -> Result<String, DocxError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(docx))?;
    let mut part = match archive.by_name("word/document.xml") {
        Ok(part) => part,
        Err(zip::result::ZipError::FileNotFound) => return Err(DocxError::MissingDocument),
        Err(e) => return Err(e.into()),
    };

    let mut xml = String::new();
    part.read_to_string(&mut xml)?;
    Ok(xml)
}
