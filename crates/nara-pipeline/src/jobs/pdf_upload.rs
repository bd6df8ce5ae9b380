//! Upload PDFs for catalogue items straight from their source URLs.

use chrono::{DateTime, Utc};
use nara_core::entities::CatalogueItem;
use nara_core::responses::RunSummary;
use nara_sources::SourceClient;
use nara_sources::download::pdf_candidates;
use nara_store::BlobStore;

use super::{open_catalogue, store_catalogue_pdf};
use crate::context::JobContext;
use crate::error::PipelineError;
use crate::runner::{BatchRunner, ItemOutcome, ItemProcessor};

pub const JOB: &str = "upload_pdfs";

/// Tries each candidate source in order and uploads the first good PDF.
pub struct PdfUploader<'a> {
    sources: &'a SourceClient,
    blobs: &'a BlobStore,
}

impl<'a> PdfUploader<'a> {
    pub const fn new(sources: &'a SourceClient, blobs: &'a BlobStore) -> Self {
        Self { sources, blobs }
    }
}

impl ItemProcessor<CatalogueItem> for PdfUploader<'_> {
    fn needs_work(&self, item: &CatalogueItem) -> bool {
        item.needs_pdf_upload()
    }

    fn label(&self, item: &CatalogueItem) -> String {
        item.short_title(60)
    }

    async fn process(&self, item: &mut CatalogueItem) -> Result<ItemOutcome, PipelineError> {
        let candidates = pdf_candidates(item);
        if candidates.is_empty() {
            return Err(PipelineError::MissingField("item has no download source".into()));
        }
        let (pdf, kind) = self.sources.download_first(&candidates).await?;
        tracing::debug!(source = kind, size = pdf.len(), "PDF downloaded");
        store_catalogue_pdf(self.blobs, item, pdf).await?;
        Ok(ItemOutcome::Done)
    }

    fn record_failure(&self, item: &mut CatalogueItem, error: &PipelineError, at: DateTime<Utc>) {
        item.mark_upload_failed(error.to_string(), at);
    }
}

/// Upload a PDF for every item with a source URL and no stored copy or an
/// expiring signed URL.
///
/// # Errors
///
/// Fails if the catalogue cannot be loaded, backed up, or checkpointed.
pub async fn run(ctx: &JobContext, limit: Option<usize>) -> Result<RunSummary, PipelineError> {
    let (mut file, mut items) = open_catalogue(ctx, "pdfs")?;
    let processor = PdfUploader::new(&ctx.sources, &ctx.blobs);
    BatchRunner::new(JOB, ctx.config.pacing.pdf)
        .with_limit(limit)
        .run(&mut items, &processor, &mut file, ctx.observer.as_ref())
        .await
}
