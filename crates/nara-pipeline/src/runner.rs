//! Bounded, paced, checkpointing batch runner.
//!
//! Every batch job has the same shape: pick the records that still need
//! work, process them one at a time with pauses in between, rewrite the
//! whole collection after each batch, and keep going when one record fails.
//! The job supplies an [`ItemProcessor`]; where the collection is written is
//! a [`CheckpointSink`].

use std::future::Future;

use chrono::{DateTime, Utc};
use nara_config::PacingProfile;
use nara_core::responses::RunSummary;
use nara_store::JsonArrayFile;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::time::Instant;

use crate::error::PipelineError;

/// What happened to one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    Done,
    /// Nothing to do after all; counted as skipped.
    Skipped(String),
    /// The processor recorded the failure on the record itself.
    Failed(String),
}

/// Per-record work for one job.
pub trait ItemProcessor<T> {
    /// True when the record has no success marker yet.
    fn needs_work(&self, item: &T) -> bool;

    /// Short description for log lines and progress.
    fn label(&self, item: &T) -> String;

    /// Do the work and record the result on `item`.
    fn process(
        &self,
        item: &mut T,
    ) -> impl Future<Output = Result<ItemOutcome, PipelineError>> + Send;

    /// Record an error returned by [`Self::process`] on `item`.
    fn record_failure(&self, item: &mut T, error: &PipelineError, at: DateTime<Utc>);
}

/// Where checkpoints go.
pub trait CheckpointSink<T> {
    /// Persist the full collection.
    ///
    /// # Errors
    ///
    /// A failed checkpoint aborts the run.
    fn checkpoint(&mut self, items: &[T]) -> Result<(), PipelineError>;
}

impl<T: Serialize + DeserializeOwned> CheckpointSink<T> for JsonArrayFile<T> {
    fn checkpoint(&mut self, items: &[T]) -> Result<(), PipelineError> {
        self.save(items)?;
        Ok(())
    }
}

/// Progress callbacks. Every method defaults to doing nothing.
pub trait RunObserver: Send + Sync {
    fn started(&self, _job: &str, _selected: usize) {}
    fn item(&self, _position: usize, _label: &str) {}
    fn finished(&self, _summary: &RunSummary) {}
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl RunObserver for Silent {}

/// Runs one job over a collection.
#[derive(Debug, Clone)]
pub struct BatchRunner {
    job: String,
    pacing: PacingProfile,
    limit: Option<usize>,
}

impl BatchRunner {
    pub fn new(job: impl Into<String>, pacing: PacingProfile) -> Self {
        Self {
            job: job.into(),
            pacing,
            limit: None,
        }
    }

    /// Process at most `limit` records this run.
    #[must_use]
    pub const fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    /// Indices of the records this run would process.
    pub fn select<T, P: ItemProcessor<T>>(&self, items: &[T], processor: &P) -> Vec<usize> {
        let selected = items
            .iter()
            .enumerate()
            .filter(|(_, item)| processor.needs_work(item))
            .map(|(i, _)| i);
        match self.limit {
            Some(limit) => selected.take(limit).collect(),
            None => selected.collect(),
        }
    }

    /// Process every selected record and checkpoint after each batch and at the end.
    ///
    /// # Errors
    ///
    /// Only a failed checkpoint stops the run. Per-record errors are
    /// recorded on the record and counted in the summary.
    pub async fn run<T, P, S>(
        &self,
        items: &mut [T],
        processor: &P,
        sink: &mut S,
        observer: &dyn RunObserver,
    ) -> Result<RunSummary, PipelineError>
    where
        P: ItemProcessor<T>,
        S: CheckpointSink<T>,
    {
        let started = Instant::now();
        let mut summary = RunSummary::new(&self.job);
        let selected = self.select(items, processor);
        let already_done = items.iter().filter(|i| !processor.needs_work(i)).count();
        summary.skipped = u32::try_from(already_done).unwrap_or(u32::MAX);
        summary.total = u32::try_from(selected.len()).unwrap_or(u32::MAX);

        tracing::info!(
            job = %self.job,
            selected = selected.len(),
            already_done,
            "batch run starting"
        );
        observer.started(&self.job, selected.len());

        let batch_size = self.pacing.batch_size();
        let batches: Vec<&[usize]> = selected.chunks(batch_size).collect();
        let mut position = 0;

        for (batch_no, batch) in batches.iter().enumerate() {
            tracing::info!(
                job = %self.job,
                batch = batch_no + 1,
                batches = batches.len(),
                "batch starting"
            );
            for (j, &idx) in batch.iter().enumerate() {
                position += 1;
                let item = &mut items[idx];
                let label = processor.label(item);
                observer.item(position, &label);

                match processor.process(item).await {
                    Ok(ItemOutcome::Done) => {
                        summary.success += 1;
                        tracing::info!(job = %self.job, item = %label, "item done");
                    }
                    Ok(ItemOutcome::Skipped(reason)) => {
                        summary.skipped += 1;
                        tracing::info!(job = %self.job, item = %label, %reason, "item skipped");
                    }
                    Ok(ItemOutcome::Failed(reason)) => {
                        summary.failed += 1;
                        tracing::warn!(job = %self.job, item = %label, %reason, "item failed");
                    }
                    Err(error) => {
                        summary.failed += 1;
                        tracing::warn!(job = %self.job, item = %label, %error, "item failed");
                        processor.record_failure(item, &error, Utc::now());
                    }
                }

                if j + 1 < batch.len() && !self.pacing.item_delay().is_zero() {
                    tokio::time::sleep(self.pacing.item_delay()).await;
                }
            }

            sink.checkpoint(items)?;
            tracing::debug!(job = %self.job, batch = batch_no + 1, "checkpoint written");

            if batch_no + 1 < batches.len() && !self.pacing.batch_delay().is_zero() {
                tokio::time::sleep(self.pacing.batch_delay()).await;
            }
        }

        sink.checkpoint(items)?;

        summary.duration_secs = started.elapsed().as_secs_f64();
        tracing::info!(
            job = %self.job,
            success = summary.success,
            failed = summary.failed,
            skipped = summary.skipped,
            total = summary.total,
            duration_secs = summary.duration_secs,
            "batch run finished"
        );
        observer.finished(&summary);
        Ok(summary)
    }
}
