//! Copy Internet Archive PDFs into the library bucket.

use chrono::{DateTime, Utc};
use nara_core::entities::CatalogueItem;
use nara_core::responses::RunSummary;
use nara_sources::SourceClient;
use nara_store::BlobStore;

use super::{open_catalogue, store_catalogue_pdf};
use crate::context::JobContext;
use crate::error::PipelineError;
use crate::runner::{BatchRunner, ItemOutcome, ItemProcessor};

pub const JOB: &str = "upload_archive";

/// Resolves the item's archive identifier to a PDF, downloads it, and uploads it.
pub struct ArchiveUploader<'a> {
    sources: &'a SourceClient,
    blobs: &'a BlobStore,
}

impl<'a> ArchiveUploader<'a> {
    pub const fn new(sources: &'a SourceClient, blobs: &'a BlobStore) -> Self {
        Self { sources, blobs }
    }
}

impl ItemProcessor<CatalogueItem> for ArchiveUploader<'_> {
    fn needs_work(&self, item: &CatalogueItem) -> bool {
        item.needs_archive_upload()
    }

    fn label(&self, item: &CatalogueItem) -> String {
        item.short_title(60)
    }

    async fn process(&self, item: &mut CatalogueItem) -> Result<ItemOutcome, PipelineError> {
        let source_url = item
            .source_url
            .clone()
            .ok_or_else(|| PipelineError::MissingField("item has no source_url".into()))?;
        let pdf_url = self.sources.resolve_archive_pdf(&source_url).await?;
        tracing::debug!(%pdf_url, "archive PDF resolved");
        let pdf = self.sources.download_pdf(&pdf_url).await?;
        store_catalogue_pdf(self.blobs, item, pdf).await?;
        Ok(ItemOutcome::Done)
    }

    fn record_failure(&self, item: &mut CatalogueItem, error: &PipelineError, at: DateTime<Utc>) {
        item.mark_upload_failed(error.to_string(), at);
    }
}

/// Upload every archive-sourced item that has no stored copy yet.
///
/// # Errors
///
/// Fails if the catalogue cannot be loaded, backed up, or checkpointed.
pub async fn run(ctx: &JobContext, limit: Option<usize>) -> Result<RunSummary, PipelineError> {
    let (mut file, mut items) = open_catalogue(ctx, "archive")?;
    let processor = ArchiveUploader::new(&ctx.sources, &ctx.blobs);
    BatchRunner::new(JOB, ctx.config.pacing.archive)
        .with_limit(limit)
        .run(&mut items, &processor, &mut file, ctx.observer.as_ref())
        .await
}
