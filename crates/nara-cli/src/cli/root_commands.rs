use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Copy Internet Archive PDFs into the library bucket.
    UploadArchive(LimitArgs),
    /// Upload PDFs for catalogue items from their source URLs.
    UploadPdfs(LimitArgs),
    /// Translate uploaded PDFs into Tamil and Sinhala.
    Translate(TranslateArgs),
    /// Search CORE and queue new works with a PDF.
    Scan,
    /// Upload every queued PDF that is not uploaded yet.
    ProcessQueue,
    /// Run the daily agent once: scan, upload, record, notify.
    Daily,
    /// Run the daily agent on its cron schedule until interrupted.
    Schedule(ScheduleArgs),
    /// Write the maritime demo records into their collections.
    SeedMaritime,
    /// Catalogue and queue counts.
    Status(StatusArgs),
    /// Print the JSON Schema of a persisted record type.
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Args)]
pub struct LimitArgs {
    /// Process at most this many items.
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Clone, Debug, Args)]
pub struct TranslateArgs {
    /// Items to translate this run (defaults to `pacing.translate_limit`).
    pub limit: Option<usize>,
}

#[derive(Clone, Debug, Args)]
pub struct ScheduleArgs {
    /// Override `schedule.cron` (5 or 6 fields).
    #[arg(long)]
    pub cron: Option<String>,

    /// Also run once immediately.
    #[arg(long)]
    pub run_now: bool,
}

#[derive(Clone, Debug, Args)]
pub struct StatusArgs {
    /// Include the last N daily runs from the run history.
    #[arg(long, default_value_t = 0)]
    pub history: usize,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Record type (omit to list the available types).
    pub type_name: Option<String>,
}
