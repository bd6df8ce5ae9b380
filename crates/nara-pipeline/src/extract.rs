//! PDF text extraction.

use std::sync::Arc;

use crate::error::PipelineError;

/// Pulls plain text out of a PDF.
pub trait TextExtractor: Send + Sync {
    /// # Errors
    ///
    /// Returns [`PipelineError::Extract`] if the document cannot be read.
    fn extract(&self, pdf: &[u8]) -> Result<String, PipelineError>;
}

/// Extractor backed by `pdf-extract`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, pdf: &[u8]) -> Result<String, PipelineError> {
        pdf_extract::extract_text_from_mem(pdf).map_err(|e| PipelineError::Extract(e.to_string()))
    }
}

/// Run `extractor` off the async runtime and reject documents with no text.
///
/// # Errors
///
/// Returns [`PipelineError::Extract`] on extraction failure, an empty
/// result, or a panicked worker.
pub async fn extract_text(
    extractor: Arc<dyn TextExtractor>,
    pdf: Vec<u8>,
) -> Result<String, PipelineError> {
    let text = tokio::task::spawn_blocking(move || extractor.extract(&pdf))
        .await
        .map_err(|e| PipelineError::Extract(format!("extraction worker failed: {e}")))??;
    if text.trim().is_empty() {
        return Err(PipelineError::Extract("no text found in PDF".into()));
    }
    Ok(text)
}
