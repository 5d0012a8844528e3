//! The processing pipeline run once per upload.
//!
//! Five stages, strictly in order, each gated on the previous: input
//! validation, PDF text extraction, placeholder scanning, field extraction,
//! template filling. Nothing carries over between runs.

use std::fmt::Display;

use glr_docx::DocxError;
use glr_domain::CompletionProvider;
use glr_extractor::{fallback_values, ExtractionClient};
use glr_pdf::PdfError;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that abort a pipeline run
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The template or the PDF reports were not supplied
    #[error("Please upload both the DOCX template and at least one PDF report.")]
    MissingInput,

    /// A source PDF could not be read. Fatal for the run; there is no
    /// partial-result policy.
    #[error("PDF extraction failed: {0}")]
    Pdf(#[from] PdfError),

    /// The template could not be read or rewritten
    #[error("Template processing failed: {0}")]
    Docx(#[from] DocxError),
}

/// Result of a successful pipeline run
pub struct PipelineOutcome {
    /// The filled template, serialized as a DOCX byte stream
    pub document: Vec<u8>,

    /// Whether fallback data was substituted for extracted values
    pub used_fallback: bool,
}

/// One-shot document pipeline over a completion provider.
pub struct Pipeline<P> {
    client: ExtractionClient<P>,
}

impl<P> Pipeline<P>
where
    P: CompletionProvider,
    P::Error: Display,
{
    /// Create a pipeline backed by the given provider.
    pub fn new(provider: P) -> Self {
        Pipeline {
            client: ExtractionClient::new(provider),
        }
    }

    /// Run the pipeline over an uploaded template and PDF reports.
    ///
    /// Validation failures and malformed PDFs abort the run before any
    /// provider call is made. When extraction yields no values the
    /// fallback mapping is substituted wholesale and the outcome is
    /// flagged accordingly.
    pub fn run(
        &self,
        template: Option<Vec<u8>>,
        reports: &[Vec<u8>],
    ) -> Result<PipelineOutcome, PipelineError> {
        let template = match template {
            Some(template) if !reports.is_empty() => template,
            _ => return Err(PipelineError::MissingInput),
        };

        let source_text = glr_pdf::combined_text(reports)?;
        let placeholders = glr_docx::scan_placeholders(&template)?;
        info!(
            reports = reports.len(),
            placeholders = placeholders.len(),
            source_chars = source_text.chars().count(),
            "processing uploaded template"
        );

        let mut values = self.client.extract(&source_text, &placeholders);
        let used_fallback = values.is_empty();
        if used_fallback {
            warn!("No values extracted, falling back to mock data");
            values = fallback_values();
        }

        let document = glr_docx::fill_template(&template, &values)?;
        Ok(PipelineOutcome {
            document,
            used_fallback,
        })
    }
}
