//! CORE (core.ac.uk) search API configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

fn default_api_url() -> String {
    String::from("https://api.core.ac.uk/v3")
}

fn default_queries() -> Vec<String> {
    vec![
        String::from("marine biodiversity Sri Lanka"),
        String::from("fisheries management Bay of Bengal"),
    ]
}

const fn default_limit() -> u32 {
    10
}

const fn default_request_delay_ms() -> u64 {
    60_000
}

const fn default_max_retries() -> u32 {
    3
}

const fn default_retry_delay_ms() -> u64 {
    10_000
}

const fn default_timeout_ms() -> u64 {
    30_000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CoreApiConfig {
    /// Whether the daily agent scans CORE at all.
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Bearer token. Requests still go out without one, under much tighter
    /// rate limits.
    #[serde(default)]
    pub api_key: String,

    /// Search queries, run one at a time.
    #[serde(default = "default_queries")]
    pub queries: Vec<String>,

    /// Results requested per query.
    #[serde(default = "default_limit")]
    pub limit: u32,

    /// Pause between consecutive queries.
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,

    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Initial backoff; doubles on every retry.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for CoreApiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_url: default_api_url(),
            api_key: String::new(),
            queries: default_queries(),
            limit: default_limit(),
            request_delay_ms: default_request_delay_ms(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl CoreApiConfig {
    /// Check whether an API key is present.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    pub const fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    pub const fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
