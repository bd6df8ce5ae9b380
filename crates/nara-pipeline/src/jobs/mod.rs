//! The ingestion jobs. Each one is an [`ItemProcessor`](crate::runner::ItemProcessor)
//! plus a `run` function that loads its collection and hands it to the
//! [`BatchRunner`](crate::runner::BatchRunner).

pub mod archive_upload;
pub mod daily;
pub mod pdf_upload;
pub mod seed;
pub mod translate;

use chrono::Utc;
use nara_core::entities::CatalogueItem;
use nara_core::naming::storage_path;
use nara_store::{BlobStore, CatalogueFile};

use crate::context::JobContext;
use crate::error::PipelineError;

/// Load the catalogue, writing a `label` backup first when enabled.
fn open_catalogue(
    ctx: &JobContext,
    label: &str,
) -> Result<(CatalogueFile, Vec<CatalogueItem>), PipelineError> {
    let file = ctx.catalogue();
    let items = file.load()?;
    if ctx.config.library.backup {
        file.backup(label, Utc::now())?;
    }
    tracing::info!(path = %file.path().display(), items = items.len(), "catalogue loaded");
    Ok((file, items))
}

/// Store a downloaded PDF under the item's storage path and record it.
async fn store_catalogue_pdf(
    blobs: &BlobStore,
    item: &mut CatalogueItem,
    pdf: Vec<u8>,
) -> Result<(), PipelineError> {
    let path = storage_path(item);
    let size = pdf.len() as u64;
    let url = blobs.put_pdf(&path, pdf).await?;
    item.mark_uploaded(url, path, size, Utc::now());
    Ok(())
}
