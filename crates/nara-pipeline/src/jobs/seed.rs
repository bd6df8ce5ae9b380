//! Write the maritime demo dataset into its document collections.

use chrono::Utc;
use nara_core::demo::{
    ALERTS_COLLECTION, PORTS_COLLECTION, SERVICES_COLLECTION, VESSELS_COLLECTION, maritime_dataset,
};
use nara_core::responses::RunSummary;
use nara_store::DocumentStore;
use serde::Serialize;
use tokio::time::Instant;

use crate::context::JobContext;
use crate::error::PipelineError;

pub const JOB: &str = "seed_maritime";

async fn put_all<T: Serialize + Sync>(
    docs: &DocumentStore,
    collection: &str,
    records: &[T],
    id: impl Fn(&T) -> &str,
) -> Result<u32, PipelineError> {
    for record in records {
        docs.put(collection, id(record), record).await?;
    }
    tracing::info!(collection, count = records.len(), "collection seeded");
    Ok(u32::try_from(records.len()).unwrap_or(u32::MAX))
}

/// Create or replace every demo vessel, port, service, and alert.
///
/// # Errors
///
/// Stops at the first document that cannot be written.
pub async fn run(ctx: &JobContext) -> Result<RunSummary, PipelineError> {
    let started = Instant::now();
    let docs = DocumentStore::new(ctx.blobs.clone());
    let dataset = maritime_dataset(Utc::now());

    let mut summary = RunSummary::new(JOB);
    summary.total = u32::try_from(dataset.len()).unwrap_or(u32::MAX);
    summary.success += put_all(&docs, VESSELS_COLLECTION, &dataset.vessels, |v| v.id.as_str()).await?;
    summary.success += put_all(&docs, PORTS_COLLECTION, &dataset.ports, |p| p.id.as_str()).await?;
    summary.success += put_all(&docs, SERVICES_COLLECTION, &dataset.services, |s| s.id.as_str()).await?;
    summary.success += put_all(&docs, ALERTS_COLLECTION, &dataset.alerts, |a| a.id.as_str()).await?;
    summary.duration_secs = started.elapsed().as_secs_f64();
    Ok(summary)
}
