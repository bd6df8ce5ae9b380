pub mod jobs;
pub mod schedule;
pub mod schema;
pub mod status;

use std::sync::Arc;

use anyhow::Context;
use nara_config::NaraConfig;
use nara_pipeline::JobContext;

use crate::cli::{Commands, GlobalFlags};
use crate::progress::ProgressObserver;

/// Dispatch a parsed command to its handler. Returns the process exit code.
pub async fn dispatch(
    command: Commands,
    config: NaraConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<i32> {
    match command {
        Commands::Status(args) => status::handle(&args, &config, flags),
        Commands::Schema(args) => schema::handle(&args, flags),
        Commands::Schedule(args) => schedule::handle(&args, config).await,
        command => {
            let ctx = JobContext::from_config(config)
                .context("failed to initialize job context")?
                .with_observer(Arc::new(ProgressObserver::default()));
            jobs::handle(command, &ctx, flags).await
        }
    }
}
