//! Batch sizes and delays for each batch job.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Batch size and pauses for one job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct PacingProfile {
    /// Items per checkpoint. Zero is treated as one.
    pub batch_size: usize,
    /// Pause between two items of the same batch.
    pub item_delay_ms: u64,
    /// Pause between batches. With a batch size of one this is the pause
    /// between items.
    pub batch_delay_ms: u64,
}

impl PacingProfile {
    pub const fn new(batch_size: usize, item_delay_ms: u64, batch_delay_ms: u64) -> Self {
        Self {
            batch_size,
            item_delay_ms,
            batch_delay_ms,
        }
    }

    pub const fn batch_size(&self) -> usize {
        if self.batch_size == 0 { 1 } else { self.batch_size }
    }

    pub const fn item_delay(&self) -> Duration {
        Duration::from_millis(self.item_delay_ms)
    }

    pub const fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms)
    }

    /// No pauses at all. Used by tests and dry runs.
    pub const fn immediate(batch_size: usize) -> Self {
        Self::new(batch_size, 0, 0)
    }
}

const fn default_archive() -> PacingProfile {
    PacingProfile::new(5, 2000, 5000)
}

const fn default_pdf() -> PacingProfile {
    PacingProfile::new(10, 1000, 3000)
}

const fn default_translate() -> PacingProfile {
    PacingProfile::new(1, 0, 3000)
}

const fn default_queue() -> PacingProfile {
    PacingProfile::new(10, 2000, 0)
}

const fn default_translate_limit() -> usize {
    5
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PacingConfig {
    /// Archive-sourced uploads.
    #[serde(default = "default_archive")]
    pub archive: PacingProfile,

    /// Direct-URL PDF uploads.
    #[serde(default = "default_pdf")]
    pub pdf: PacingProfile,

    #[serde(default = "default_translate")]
    pub translate: PacingProfile,

    /// Upload queue processing.
    #[serde(default = "default_queue")]
    pub queue: PacingProfile,

    /// Items translated per `translate` run when no limit is given.
    #[serde(default = "default_translate_limit")]
    pub translate_limit: usize,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            archive: default_archive(),
            pdf: default_pdf(),
            translate: default_translate(),
            queue: default_queue(),
            translate_limit: default_translate_limit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_batch_size_means_one() {
        assert_eq!(PacingProfile::immediate(0).batch_size(), 1);
        assert_eq!(PacingProfile::immediate(7).batch_size(), 7);
    }

    #[test]
    fn archive_defaults() {
        let pacing = PacingConfig::default();
        assert_eq!(pacing.archive.batch_size(), 5);
        assert_eq!(pacing.archive.item_delay(), Duration::from_secs(2));
        assert_eq!(pacing.archive.batch_delay(), Duration::from_secs(5));
        assert_eq!(pacing.translate.batch_delay(), Duration::from_secs(3));
        assert_eq!(pacing.translate_limit, 5);
    }
}
