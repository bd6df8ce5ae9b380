//! # nara-pipeline
//!
//! The ingestion jobs and what runs them:
//! - [`runner::BatchRunner`], the paced, checkpointing batch loop every job uses
//! - the jobs themselves (`jobs::*`): archive upload, PDF upload,
//!   translation, the daily agent, and demo seeding
//! - PDF text extraction and run notifications
//! - the cron scheduler with its overlap guard
//!
//! Jobs take a [`JobContext`] holding the configuration, the HTTP client,
//! the object store, and the pluggable extractor, notifier, and progress
//! observer.

pub mod context;
pub mod extract;
pub mod jobs;
pub mod notify;
pub mod runner;
pub mod scheduler;

mod error;

pub use context::JobContext;
pub use error::PipelineError;
pub use runner::{BatchRunner, ItemOutcome, ItemProcessor, RunObserver};
pub use scheduler::{DailyScheduler, RunGuard};
