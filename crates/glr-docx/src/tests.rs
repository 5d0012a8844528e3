//! Archive-level tests over real DOCX byte streams.

use crate::scan::paragraph_texts;
use crate::{fill_template, read_document_xml, scan_placeholders, DocxError};
use glr_domain::FieldValues;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

fn build_docx(document_xml: &str) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    writer.start_file("[Content_Types].xml", options).unwrap();
    writer.write_all(CONTENT_TYPES.as_bytes()).unwrap();
    writer.start_file("_rels/.rels", options).unwrap();
    writer.write_all(RELS.as_bytes()).unwrap();
    writer.start_file("word/document.xml", options).unwrap();
    writer.write_all(document_xml.as_bytes()).unwrap();

    writer.finish().unwrap().into_inner()
}

fn document(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
        body
    )
}

fn values(pairs: &[(&str, &str)]) -> FieldValues {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn output_paragraphs(docx: &[u8]) -> Vec<String> {
    let xml = read_document_xml(docx).unwrap();
    paragraph_texts(&xml).unwrap()
}

#[test]
fn test_scan_finds_distinct_names() {
    let docx = build_docx(&document(
        "<w:p><w:r><w:t>Loss on [DATE_LOSS] for [INSURED_NAME]</w:t></w:r></w:p>\
         <w:p><w:r><w:t>Inspected [DATE_LOSS]</w:t></w:r></w:p>",
    ));

    let placeholders = scan_placeholders(&docx).unwrap();
    assert_eq!(placeholders.len(), 2);
    assert!(placeholders.contains("DATE_LOSS"));
    assert!(placeholders.contains("INSURED_NAME"));
}

#[test]
fn test_scan_zero_tokens_is_empty_set() {
    let docx = build_docx(&document("<w:p><w:r><w:t>nothing to fill</w:t></w:r></w:p>"));
    let placeholders = scan_placeholders(&docx).unwrap();
    assert!(placeholders.is_empty());
}

#[test]
fn test_scan_rejects_non_zip_input() {
    let result = scan_placeholders(b"not a zip archive");
    assert!(matches!(result, Err(DocxError::Zip(_))));
}

#[test]
fn test_scan_requires_document_part() {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file("[Content_Types].xml", SimpleFileOptions::default())
        .unwrap();
    writer.write_all(CONTENT_TYPES.as_bytes()).unwrap();
    let bytes = writer.finish().unwrap().into_inner();

    let result = scan_placeholders(&bytes);
    assert!(matches!(result, Err(DocxError::MissingDocument)));
}

#[test]
fn test_fill_repeated_and_multiple_placeholders() {
    let docx = build_docx(&document(
        "<w:p><w:r><w:t>[A] then [B] then [A]</w:t></w:r></w:p>",
    ));

    let filled = fill_template(&docx, &values(&[("A", "x"), ("B", "y")])).unwrap();
    assert_eq!(output_paragraphs(&filled), vec!["x then y then x".to_string()]);
}

#[test]
fn test_fill_missing_key_leaves_token_literal() {
    let docx = build_docx(&document("<w:p><w:r><w:t>[A] and [C]</w:t></w:r></w:p>"));

    let filled = fill_template(&docx, &values(&[("A", "x")])).unwrap();
    assert_eq!(output_paragraphs(&filled), vec!["x and [C]".to_string()]);
}

#[test]
fn test_fill_zero_tokens_returns_document_unchanged() {
    let body = "<w:p><w:r><w:t>no tokens at all</w:t></w:r></w:p>";
    let docx = build_docx(&document(body));

    let filled = fill_template(&docx, &values(&[("A", "x")])).unwrap();
    assert_eq!(
        output_paragraphs(&filled),
        vec!["no tokens at all".to_string()]
    );
    assert_eq!(read_document_xml(&filled).unwrap(), document(body));
}

#[test]
fn test_fill_preserves_other_archive_entries() {
    let docx = build_docx(&document("<w:p><w:r><w:t>[A]</w:t></w:r></w:p>"));
    let filled = fill_template(&docx, &values(&[("A", "x")])).unwrap();

    let mut archive = zip::ZipArchive::new(Cursor::new(filled.as_slice())).unwrap();
    assert_eq!(archive.len(), 3);

    let mut content_types = String::new();
    std::io::Read::read_to_string(
        &mut archive.by_name("[Content_Types].xml").unwrap(),
        &mut content_types,
    )
    .unwrap();
    assert_eq!(content_types, CONTENT_TYPES);
}

#[test]
fn test_fill_claim_number_scenario() {
    let docx = build_docx(&document(
        "<w:p><w:r><w:t>Claim: [XM8_CLAIM_NUM]</w:t></w:r></w:p>",
    ));

    let filled = fill_template(&docx, &values(&[("XM8_CLAIM_NUM", "WJ-789456")])).unwrap();
    assert_eq!(output_paragraphs(&filled), vec!["Claim: WJ-789456".to_string()]);

    // Every placeholder was resolved, so a rescan finds nothing.
    assert!(scan_placeholders(&filled).unwrap().is_empty());
}
