//! # nara-sources
//!
//! HTTP clients for the external services the ingestion jobs talk to:
//! - CORE (`api.core.ac.uk`) full-text search
//! - Internet Archive item metadata and file downloads
//! - plain PDF downloads from arbitrary source URLs
//! - Google Gemini `generateContent` for translation
//!
//! Every call goes through one shared [`reqwest::Client`]. Calls are issued
//! one at a time by the jobs; nothing here runs requests concurrently.

pub mod archive;
pub mod core_api;
pub mod download;
pub mod gemini;
pub mod retry;

mod error;
mod http;

pub use error::{Retryable, SourceError};
pub use retry::RetryPolicy;

use nara_config::{ArchiveConfig, CoreApiConfig, DownloadConfig, GeminiConfig, NaraConfig};

// ── Client ─────────────────────────────────────────────────────────

/// HTTP client for every external source, configured from [`NaraConfig`].
#[derive(Debug, Clone)]
pub struct SourceClient {
    http: reqwest::Client,
    core: CoreApiConfig,
    archive: ArchiveConfig,
    download: DownloadConfig,
    gemini: GeminiConfig,
}

impl SourceClient {
    /// Build a client with the bot user agent, download timeout, and
    /// redirect limit from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the TLS backend cannot be initialized.
    pub fn new(config: &NaraConfig) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder()
            .user_agent(config.download.user_agent.as_str())
            .timeout(config.download.timeout())
            .redirect(reqwest::redirect::Policy::limited(
                config.download.max_redirects,
            ))
            .build()?;

        Ok(Self {
            http,
            core: config.core.clone(),
            archive: config.archive.clone(),
            download: config.download.clone(),
            gemini: config.gemini.clone(),
        })
    }

    #[must_use]
    pub const fn gemini_config(&self) -> &GeminiConfig {
        &self.gemini
    }

    /// Retry policy for CORE requests.
    #[must_use]
    pub fn core_retry_policy(&self) -> RetryPolicy {
        RetryPolicy::from(&self.core)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_builds_from_default_config() {
        let client = SourceClient::new(&NaraConfig::default()).unwrap();
        assert_eq!(client.core_retry_policy(), RetryPolicy::default());
        assert_eq!(client.gemini_config().model, "gemini-2.5-flash");
    }
}
