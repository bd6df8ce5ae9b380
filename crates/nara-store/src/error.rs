//! Store error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from local files and object storage.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A local file could not be read or written.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON file or document did not match the expected shape.
    #[error("JSON error in {context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Object storage request failed.
    #[error("object store error: {0}")]
    ObjectStore(#[from] object_store::Error),

    /// Object path was rejected by the store.
    #[error("invalid object path: {0}")]
    Path(#[from] object_store::path::Error),

    /// A required file or object does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Storage configuration cannot be used.
    #[error("storage not configured: {0}")]
    NotConfigured(String),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            context: context.into(),
            source,
        }
    }
}
