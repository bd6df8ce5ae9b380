//! Internet Archive, PDF download, and Gemini translation settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_archive_base() -> String {
    String::from("https://archive.org")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArchiveConfig {
    /// Base URL; `/metadata/{id}` and `/download/{id}/{file}` hang off it.
    #[serde(default = "default_archive_base")]
    pub base_url: String,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            base_url: default_archive_base(),
        }
    }
}

fn default_user_agent() -> String {
    String::from("Mozilla/5.0 (compatible; NARA-Library-Bot/1.0)")
}

const fn default_download_timeout_secs() -> u64 {
    120
}

const fn default_max_redirects() -> usize {
    5
}

const fn default_min_pdf_bytes() -> u64 {
    1000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DownloadConfig {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_download_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,

    /// Anything smaller is treated as an error page, not a PDF.
    #[serde(default = "default_min_pdf_bytes")]
    pub min_pdf_bytes: u64,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_download_timeout_secs(),
            max_redirects: default_max_redirects(),
            min_pdf_bytes: default_min_pdf_bytes(),
        }
    }
}

impl DownloadConfig {
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_gemini_base() -> String {
    String::from("https://generativelanguage.googleapis.com/v1beta")
}

fn default_model() -> String {
    String::from("gemini-2.5-flash")
}

const fn default_chunk_chars() -> usize {
    8000
}

const fn default_chunk_delay_ms() -> u64 {
    4000
}

const fn default_max_chars() -> usize {
    10_000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeminiConfig {
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_gemini_base")]
    pub base_url: String,

    /// Upper bound on characters per translation request.
    #[serde(default = "default_chunk_chars")]
    pub chunk_chars: usize,

    /// Pause between chunk requests (free tier allows 15 requests/min).
    #[serde(default = "default_chunk_delay_ms")]
    pub chunk_delay_ms: u64,

    /// Only this many leading characters of a document are translated.
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            base_url: default_gemini_base(),
            chunk_chars: default_chunk_chars(),
            chunk_delay_ms: default_chunk_delay_ms(),
            max_chars: default_max_chars(),
        }
    }
}

impl GeminiConfig {
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.model.is_empty()
    }

    pub const fn chunk_delay(&self) -> Duration {
        Duration::from_millis(self.chunk_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn download_defaults() {
        let config = DownloadConfig::default();
        assert_eq!(config.timeout(), Duration::from_secs(120));
        assert_eq!(config.max_redirects, 5);
        assert_eq!(config.min_pdf_bytes, 1000);
        assert!(config.user_agent.contains("NARA-Library-Bot"));
    }

    #[test]
    fn gemini_requires_key() {
        let mut config = GeminiConfig::default();
        assert!(!config.is_configured());
        config.api_key = "AIza-test".into();
        assert!(config.is_configured());
        assert_eq!(config.chunk_chars, 8000);
        assert_eq!(config.max_chars, 10_000);
    }
}
