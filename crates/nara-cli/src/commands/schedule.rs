use std::sync::Arc;

use anyhow::Context;
use nara_config::NaraConfig;
use nara_pipeline::{DailyScheduler, JobContext};

use crate::cli::root_commands::ScheduleArgs;

/// Handle `nara schedule`: run the daily agent on cron until Ctrl-C.
pub async fn handle(args: &ScheduleArgs, mut config: NaraConfig) -> anyhow::Result<i32> {
    if let Some(cron) = &args.cron {
        config.schedule.cron.clone_from(cron);
    }
    if args.run_now {
        config.schedule.run_on_start = true;
    }

    let ctx = Arc::new(JobContext::from_config(config).context("failed to initialize job context")?);
    let scheduler = DailyScheduler::start(Arc::clone(&ctx))
        .await
        .context("failed to start the daily schedule")?;
    tracing::info!(cron = %ctx.config.schedule.cron, "waiting for scheduled runs, press Ctrl-C to stop");

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for Ctrl-C")?;

    if scheduler.guard().is_running() {
        tracing::warn!("a daily run is still in progress and will be cut short");
    }
    scheduler.shutdown().await.context("failed to stop the scheduler")?;
    Ok(0)
}
