//! Pipeline error types.

use nara_config::ConfigError;
use nara_core::errors::CoreError;
use nara_sources::SourceError;
use nara_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// PDF text extraction failed or produced nothing.
    #[error("text extraction failed: {0}")]
    Extract(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// An item lacks a field the job needs.
    #[error("{0}")]
    MissingField(String),

    #[error("scheduler error: {0}")]
    Scheduler(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// A daily run was requested while another is still in flight.
    #[error("a run is already in progress")]
    AlreadyRunning,
}
