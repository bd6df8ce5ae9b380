//! The daily agent: harvest new works from CORE into the upload queue, then
//! upload everything still pending.

use std::path::Path;

use chrono::{DateTime, Utc};
use nara_core::categorize::categorize;
use nara_core::entities::QueueItem;
use nara_core::enums::QueueStatus;
use nara_core::naming::{queue_storage_path, slugify};
use nara_core::responses::{RunRecord, RunSummary};
use nara_sources::core_api::CoreWork;
use nara_store::queue::is_queued;
use nara_store::{BlobStore, QueueFile};
use tokio::time::Instant;

use crate::context::JobContext;
use crate::error::PipelineError;
use crate::notify::{RunStatus, render};
use crate::runner::{BatchRunner, ItemOutcome, ItemProcessor};

pub const SCAN_JOB: &str = "scan_core";
pub const QUEUE_JOB: &str = "process_queue";

/// Source tag written on queue items harvested from CORE.
pub const CORE_SOURCE: &str = "CORE";

enum WorkOutcome {
    Queued,
    Skipped,
    Failed,
}

/// Search every configured query and queue the works that have a PDF.
///
/// Queries run one at a time with the configured delay between them. A
/// query that is still rate limited after retries stops the scan; any
/// other query error is counted and the scan moves on.
///
/// # Errors
///
/// Fails if the queue file cannot be read or written.
pub async fn scan_core(ctx: &JobContext) -> Result<RunSummary, PipelineError> {
    let started = Instant::now();
    let core = &ctx.config.core;
    let mut summary = RunSummary::new(SCAN_JOB);

    if core.api_key.is_empty() {
        tracing::warn!("no CORE API key configured, rate limits will be very restrictive");
    }

    let queue_file = ctx.queue();
    let mut queue = queue_file.load_or_default()?;

    for (i, query) in core.queries.iter().enumerate() {
        tracing::info!(query, "searching CORE");
        match ctx.sources.search_core_with_retry(query).await {
            Ok(works) => {
                tracing::info!(query, results = works.len(), "CORE results");
                for work in &works {
                    summary.total += 1;
                    match queue_work(ctx, &queue_file, &mut queue, work).await? {
                        WorkOutcome::Queued => summary.success += 1,
                        WorkOutcome::Skipped => summary.skipped += 1,
                        WorkOutcome::Failed => summary.failed += 1,
                    }
                }
            }
            Err(error) if error.is_rate_limited() => {
                tracing::error!(query, %error, "still rate limited, skipping remaining queries");
                summary.failed += 1;
                break;
            }
            Err(error) => {
                tracing::error!(query, %error, "CORE search failed");
                summary.failed += 1;
            }
        }

        if i + 1 < core.queries.len() {
            tracing::info!(delay_ms = core.request_delay_ms, "waiting before next query");
            tokio::time::sleep(core.request_delay()).await;
        }
    }

    summary.duration_secs = started.elapsed().as_secs_f64();
    Ok(summary)
}

/// Download one work's PDF and append it to the queue.
async fn queue_work(
    ctx: &JobContext,
    queue_file: &QueueFile,
    queue: &mut Vec<QueueItem>,
    work: &CoreWork,
) -> Result<WorkOutcome, PipelineError> {
    let source_id = work.source_id();
    let title: String = work
        .title
        .as_deref()
        .unwrap_or("Untitled")
        .chars()
        .take(50)
        .collect();

    if is_queued(queue, CORE_SOURCE, &source_id) {
        tracing::info!(%source_id, %title, "already queued");
        return Ok(WorkOutcome::Skipped);
    }
    let Some(download_url) = work.download_url.as_deref() else {
        tracing::debug!(%source_id, %title, "no download URL");
        return Ok(WorkOutcome::Skipped);
    };

    let mut file_stem = slugify(&source_id);
    if file_stem.is_empty() {
        file_stem = String::from("work");
    }
    let dest = ctx.config.library.temp_dir().join(format!("{file_stem}.pdf"));
    if let Err(error) = ctx.sources.download_pdf_to(download_url, &dest).await {
        tracing::error!(%source_id, url = download_url, %error, "PDF download failed");
        return Ok(WorkOutcome::Failed);
    }

    let metadata = work.to_metadata();
    let category = categorize(&metadata);
    queue.push(QueueItem::pending(
        metadata,
        dest.display().to_string(),
        category,
        CORE_SOURCE,
        source_id,
        Utc::now(),
    ));
    queue_file.save(queue)?;
    tracing::info!(%title, %category, "queued");
    Ok(WorkOutcome::Queued)
}

/// Uploads a queued PDF to `pdfs/{category}/{file}`.
pub struct QueueUploader<'a> {
    blobs: &'a BlobStore,
}

impl<'a> QueueUploader<'a> {
    pub const fn new(blobs: &'a BlobStore) -> Self {
        Self { blobs }
    }
}

impl ItemProcessor<QueueItem> for QueueUploader<'_> {
    /// Pending items, and failed ones which get another attempt.
    fn needs_work(&self, item: &QueueItem) -> bool {
        item.status != QueueStatus::Uploaded
    }

    fn label(&self, item: &QueueItem) -> String {
        item.metadata.title.chars().take(60).collect()
    }

    async fn process(&self, item: &mut QueueItem) -> Result<ItemOutcome, PipelineError> {
        if item.status == QueueStatus::Failed {
            item.transition(QueueStatus::Pending)?;
        }
        let pdf = tokio::fs::read(&item.pdf_path)
            .await
            .map_err(|source| PipelineError::Io {
                path: item.pdf_path.clone(),
                source,
            })?;
        let path = queue_storage_path(item.category, Path::new(&item.pdf_path));
        let url = self.blobs.put_pdf(&path, pdf).await?;
        item.mark_uploaded(path, url, Utc::now())?;
        Ok(ItemOutcome::Done)
    }

    fn record_failure(&self, item: &mut QueueItem, error: &PipelineError, _at: DateTime<Utc>) {
        if item.status == QueueStatus::Failed {
            item.error = Some(error.to_string());
        } else if let Err(transition) = item.mark_failed(error.to_string()) {
            tracing::warn!(%transition, "could not mark queue item failed");
        }
    }
}

/// Upload every queue item that is not uploaded yet.
///
/// # Errors
///
/// Fails if the queue cannot be read or checkpointed.
pub async fn process_queue(ctx: &JobContext) -> Result<RunSummary, PipelineError> {
    let mut file = ctx.queue();
    let mut queue = file.load_or_default()?;
    if queue.is_empty() {
        tracing::info!("upload queue is empty");
        return Ok(RunSummary::new(QUEUE_JOB));
    }
    let processor = QueueUploader::new(&ctx.blobs);
    BatchRunner::new(QUEUE_JOB, ctx.config.pacing.queue)
        .run(&mut queue, &processor, &mut file, ctx.observer.as_ref())
        .await
}

async fn run_steps(ctx: &JobContext) -> Result<Vec<RunSummary>, PipelineError> {
    let scan = if ctx.config.core.enabled {
        scan_core(ctx).await?
    } else {
        tracing::info!("CORE scan disabled");
        RunSummary::new(SCAN_JOB)
    };
    let queue = process_queue(ctx).await?;
    Ok(vec![scan, queue])
}

/// One full daily run: scan, upload, log, record history, notify.
///
/// Never fails; a step error ends the run early and lands in
/// [`RunRecord::error`].
pub async fn run(ctx: &JobContext) -> RunRecord {
    let started_at = Utc::now();
    tracing::info!("daily run starting");

    let (summaries, error) = match run_steps(ctx).await {
        Ok(summaries) => (summaries, None),
        Err(error) => {
            tracing::error!(%error, "daily run failed");
            (Vec::new(), Some(error.to_string()))
        }
    };
    let record = RunRecord {
        started_at,
        finished_at: Utc::now(),
        summaries,
        error,
    };

    let queued = record
        .summaries
        .iter()
        .find(|s| s.job == SCAN_JOB)
        .map_or(0, |s| s.success);
    let failed: u32 = record.summaries.iter().map(|s| s.failed).sum();
    tracing::info!(
        queued,
        failed,
        duration_secs = (record.finished_at - record.started_at)
            .to_std()
            .unwrap_or_default()
            .as_secs_f64(),
        "daily run finished"
    );

    if let Err(error) = ctx.history().append(&record) {
        tracing::warn!(%error, "could not append run history");
    }

    let status = if record.error.is_some() {
        RunStatus::Error
    } else {
        RunStatus::Success
    };
    if let Some(notification) = render(
        &ctx.config.notification,
        status,
        queued,
        &record.summaries,
        record.error.as_deref(),
    ) {
        ctx.notifier.send(&notification);
    }

    record
}
