//! Daily cron trigger for the daily agent.
//!
//! One recurring job runs [`daily::run`]. A shared [`RunGuard`] keeps a
//! second run from starting while one is still in flight; a tick that finds
//! the guard taken is logged and dropped, never queued.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use nara_config::ConfigError;
use nara_core::responses::RunRecord;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::context::JobContext;
use crate::error::PipelineError;
use crate::jobs::daily;

/// Accept 5-field cron expressions by prefixing a seconds field.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] unless the expression has 5, 6,
/// or 7 fields.
pub fn normalize_cron(expr: &str) -> Result<String, PipelineError> {
    let fields: Vec<&str> = expr.split_whitespace().collect();
    match fields.len() {
        5 => Ok(format!("0 {}", fields.join(" "))),
        6 | 7 => Ok(fields.join(" ")),
        n => Err(ConfigError::InvalidValue {
            field: "schedule.cron".into(),
            reason: format!("expected 5 to 7 fields, got {n}"),
        }
        .into()),
    }
}

/// Re-entrancy flag shared by every trigger of the daily run.
#[derive(Debug, Clone, Default)]
pub struct RunGuard(Arc<AtomicBool>);

/// Held while a run is in flight. Releases the guard on drop.
#[derive(Debug)]
pub struct RunPermit(Arc<AtomicBool>);

impl RunGuard {
    /// Take the guard, or `None` if a run already holds it.
    #[must_use]
    pub fn try_acquire(&self) -> Option<RunPermit> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| RunPermit(Arc::clone(&self.0)))
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

impl Drop for RunPermit {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Run the daily agent unless a run is already in flight.
///
/// # Errors
///
/// Returns [`PipelineError::AlreadyRunning`] when the guard is taken.
pub async fn trigger(ctx: &JobContext, guard: &RunGuard) -> Result<RunRecord, PipelineError> {
    let Some(_permit) = guard.try_acquire() else {
        tracing::warn!("previous daily run still in progress, skipping");
        return Err(PipelineError::AlreadyRunning);
    };
    Ok(daily::run(ctx).await)
}

/// Cron scheduler running the daily agent.
pub struct DailyScheduler {
    sched: JobScheduler,
    guard: RunGuard,
}

impl DailyScheduler {
    /// Register the daily job from `ctx.config.schedule` and start ticking.
    /// With `run_on_start` set, one run is also started right away.
    ///
    /// # Errors
    ///
    /// Returns an error for a malformed cron expression or if the
    /// scheduler cannot start.
    pub async fn start(ctx: Arc<JobContext>) -> Result<Self, PipelineError> {
        let cron = normalize_cron(&ctx.config.schedule.cron)?;
        let guard = RunGuard::default();
        let sched = JobScheduler::new().await?;

        let job_ctx = Arc::clone(&ctx);
        let job_guard = guard.clone();
        sched
            .add(Job::new_async(cron.as_str(), move |_, _| {
                let ctx = Arc::clone(&job_ctx);
                let guard = job_guard.clone();
                Box::pin(async move {
                    log_outcome(trigger(&ctx, &guard).await);
                })
            })?)
            .await?;
        sched.start().await?;
        tracing::info!(%cron, "daily schedule started");

        if ctx.config.schedule.run_on_start {
            let guard = guard.clone();
            tokio::spawn(async move {
                log_outcome(trigger(&ctx, &guard).await);
            });
        }

        Ok(Self { sched, guard })
    }

    #[must_use]
    pub const fn guard(&self) -> &RunGuard {
        &self.guard
    }

    /// Stop the scheduler. A run already in flight is not interrupted.
    ///
    /// # Errors
    ///
    /// Returns the scheduler's shutdown error.
    pub async fn shutdown(mut self) -> Result<(), PipelineError> {
        self.sched.shutdown().await?;
        Ok(())
    }
}

fn log_outcome(result: Result<RunRecord, PipelineError>) {
    match result {
        Ok(record) if record.error.is_none() => {
            tracing::info!(finished_at = %record.finished_at, "scheduled run complete");
        }
        Ok(record) => {
            tracing::error!(error = record.error.as_deref().unwrap_or_default(), "scheduled run failed");
        }
        Err(PipelineError::AlreadyRunning) => {}
        Err(error) => tracing::error!(%error, "scheduled run failed"),
    }
}
