//! # nara-config
//!
//! Layered configuration loading for the NARA library pipeline using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`NARA_*` prefix, `__` as separator)
//! 2. Project-level `.nara/config.toml`
//! 3. User-level `~/.config/nara/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `NARA_CORE__API_KEY` -> `core.api_key`,
//! `NARA_PACING__ARCHIVE__BATCH_SIZE` -> `pacing.archive.batch_size`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use nara_config::NaraConfig;
//!
//! let config = NaraConfig::load_with_dotenv().expect("config");
//! if !config.core.is_configured() {
//!     eprintln!("CORE API key missing, requests will be rate limited");
//! }
//! ```

mod core_api;
mod error;
mod library;
mod pacing;
mod schedule;
mod sources;
mod storage;

pub use core_api::CoreApiConfig;
pub use error::ConfigError;
pub use library::LibraryConfig;
pub use pacing::{PacingConfig, PacingProfile};
pub use schedule::{NotificationConfig, ScheduleConfig};
pub use sources::{ArchiveConfig, DownloadConfig, GeminiConfig};
pub use storage::{StorageBackend, StorageConfig};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct NaraConfig {
    #[serde(default)]
    pub core: CoreApiConfig,
    #[serde(default)]
    pub archive: ArchiveConfig,
    #[serde(default)]
    pub download: DownloadConfig,
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub library: LibraryConfig,
    #[serde(default)]
    pub pacing: PacingConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub notification: NotificationConfig,
}

impl NaraConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`NaraConfig::load_with_dotenv`] for `.env` loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a config file is not valid TOML or
    /// a value (file or `NARA_*` variable) has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support. A missing `.env` is not an error.
    ///
    /// # Errors
    ///
    /// As [`NaraConfig::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can add providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".nara/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("NARA_").split("__"))
    }

    /// Path to the user-global config file.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("nara").join("config.toml"))
    }

    /// Reject values that would make a run misbehave rather than fail.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the field for a zero
    /// `gemini.chunk_chars`, a blank entry in `core.queries`, or a
    /// `schedule.cron` with fewer than five fields.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gemini.chunk_chars == 0 {
            return Err(ConfigError::InvalidValue {
                field: "gemini.chunk_chars".into(),
                reason: "must be greater than zero".into(),
            });
        }
        if self.core.queries.iter().any(|q| q.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "core.queries".into(),
                reason: "queries must not be blank".into(),
            });
        }
        if self.schedule.cron.split_whitespace().count() < 5 {
            return Err(ConfigError::InvalidValue {
                field: "schedule.cron".into(),
                reason: format!("'{}' is not a cron expression", self.schedule.cron),
            });
        }
        Ok(())
    }

    /// The Gemini section, if translation can run.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] for the `gemini` section when
    /// no API key is set.
    pub fn require_gemini(&self) -> Result<&GeminiConfig, ConfigError> {
        if self.gemini.is_configured() {
            Ok(&self.gemini)
        } else {
            Err(ConfigError::NotConfigured {
                section: "gemini".into(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = NaraConfig::default();
        assert!(!config.core.is_configured());
        assert!(!config.gemini.is_configured());
        assert_eq!(config.schedule.cron, "0 0 2 * * *");
        assert_eq!(config.notification.email, "library@nara.ac.lk");
        assert!(config.library.backup);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn figment_builds_without_files() {
        let config: NaraConfig = NaraConfig::figment()
            .extract()
            .expect("should extract defaults");
        assert_eq!(config.core.limit, 10);
        assert_eq!(config.pacing.archive.batch_size, 5);
    }

    #[test]
    fn blank_query_is_rejected() {
        let mut config = NaraConfig::default();
        config.core.queries.push("  ".into());
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "core.queries"));
    }

    #[test]
    fn zero_chunk_size_and_short_cron_are_rejected() {
        let mut config = NaraConfig::default();
        config.gemini.chunk_chars = 0;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "gemini.chunk_chars"));

        let mut config = NaraConfig::default();
        config.schedule.cron = "0 2 * *".into();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "schedule.cron"));
    }

    #[test]
    fn require_gemini_reports_section() {
        let config = NaraConfig::default();
        let err = config.require_gemini().unwrap_err();
        assert!(err.to_string().contains("'gemini'"));
    }
}
