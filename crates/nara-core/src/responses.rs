//! Response types printed by `nara` commands and appended to run history.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Outcome counts of one batch run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RunSummary {
    /// Job name (`upload_archive`, `translate`, ...).
    pub job: String,
    pub success: u32,
    pub failed: u32,
    pub skipped: u32,
    /// Items selected for processing.
    pub total: u32,
    pub duration_secs: f64,
}

impl RunSummary {
    #[must_use]
    pub fn new(job: impl Into<String>) -> Self {
        Self {
            job: job.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn has_failures(&self) -> bool {
        self.failed > 0
    }

    /// Process exit code: 0 on full success, 1 if anything failed.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        if self.has_failures() { 1 } else { 0 }
    }
}

/// One line of `runs.jsonl`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RunRecord {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub summaries: Vec<RunSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response from `nara status`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CatalogueStatus {
    pub items: usize,
    pub uploaded: usize,
    pub upload_errors: usize,
    pub archive_pending: usize,
    pub translated: usize,
    pub translation_pending: usize,
    pub queue_pending: usize,
    pub queue_uploaded: usize,
    pub queue_failed: usize,
}
