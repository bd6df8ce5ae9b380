//! Object storage configuration.

use serde::{Deserialize, Serialize};

/// Which `object_store` backend documents and PDFs go to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// S3-compatible bucket (Firebase/GCS interop, R2, MinIO, ...).
    #[default]
    S3,
    /// A directory on local disk.
    Local,
    /// In-process store; nothing survives the run.
    Memory,
}

fn default_bucket() -> String {
    String::from("nara-web-73384.firebasestorage.app")
}

fn default_region() -> String {
    String::from("auto")
}

fn default_local_root() -> String {
    String::from("storage")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    #[serde(default = "default_bucket")]
    pub bucket: String,

    /// Custom S3 endpoint. Empty means the provider default.
    #[serde(default)]
    pub endpoint: String,

    #[serde(default = "default_region")]
    pub region: String,

    #[serde(default)]
    pub access_key_id: String,

    #[serde(default)]
    pub secret_access_key: String,

    /// Root directory for the `local` backend.
    #[serde(default = "default_local_root")]
    pub local_root: String,

    /// Base used to build public download URLs. Empty means the Firebase
    /// Storage media URL for `bucket`.
    #[serde(default)]
    pub public_base_url: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            bucket: default_bucket(),
            endpoint: String::new(),
            region: default_region(),
            access_key_id: String::new(),
            secret_access_key: String::new(),
            local_root: default_local_root(),
            public_base_url: String::new(),
        }
    }
}

impl StorageConfig {
    /// Check if the selected backend has what it needs to connect.
    pub fn is_configured(&self) -> bool {
        match self.backend {
            StorageBackend::S3 => {
                !self.bucket.is_empty()
                    && !self.access_key_id.is_empty()
                    && !self.secret_access_key.is_empty()
            }
            StorageBackend::Local => !self.local_root.is_empty(),
            StorageBackend::Memory => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn s3_needs_credentials() {
        let mut config = StorageConfig::default();
        assert!(!config.is_configured());
        config.access_key_id = "AKIA".into();
        config.secret_access_key = "secret".into();
        assert!(config.is_configured());
    }

    #[test]
    fn memory_is_always_configured() {
        let config = StorageConfig {
            backend: StorageBackend::Memory,
            ..StorageConfig::default()
        };
        assert!(config.is_configured());
    }
}
