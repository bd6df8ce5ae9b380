use anyhow::Context;
use nara_core::responses::RunSummary;
use nara_pipeline::JobContext;
use nara_pipeline::jobs::{archive_upload, daily, pdf_upload, seed, translate};

use crate::cli::{Commands, GlobalFlags};
use crate::output::output;
use crate::progress::Progress;

/// Handle the batch job commands.
pub async fn handle(command: Commands, ctx: &JobContext, flags: &GlobalFlags) -> anyhow::Result<i32> {
    let summary = match command {
        Commands::UploadArchive(args) => archive_upload::run(ctx, args.limit)
            .await
            .context("archive upload failed")?,
        Commands::UploadPdfs(args) => pdf_upload::run(ctx, args.limit)
            .await
            .context("PDF upload failed")?,
        Commands::Translate(args) => translate::run(ctx, args.limit)
            .await
            .context("translation failed")?,
        Commands::Scan => {
            let spinner = Progress::spinner("searching CORE");
            let summary = daily::scan_core(ctx).await.context("CORE scan failed")?;
            spinner.finish_ok(&format!("{} works queued", summary.success));
            summary
        }
        Commands::ProcessQueue => daily::process_queue(ctx)
            .await
            .context("queue processing failed")?,
        Commands::SeedMaritime => {
            let spinner = Progress::spinner("seeding maritime collections");
            let summary = seed::run(ctx).await.context("seeding failed")?;
            spinner.finish_ok(&format!("{} records written", summary.success));
            summary
        }
        Commands::Daily => {
            let record = daily::run(ctx).await;
            output(&record, flags.format)?;
            let failed = record.summaries.iter().any(RunSummary::has_failures);
            return Ok(i32::from(record.error.is_some() || failed));
        }
        Commands::Schedule(_) | Commands::Status(_) | Commands::Schema(_) => {
            anyhow::bail!("not a batch job command")
        }
    };

    output(&summary, flags.format)?;
    Ok(summary.exit_code())
}
