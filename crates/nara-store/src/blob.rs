//! Object storage for PDFs, translations, and documents.
//!
//! Wraps an `object_store` backend chosen by [`StorageConfig`]: an
//! S3-compatible bucket, a local directory, or an in-memory store.

use std::path::PathBuf;
use std::sync::Arc;

use futures::TryStreamExt;
use nara_config::{StorageBackend, StorageConfig};
use object_store::aws::AmazonS3Builder;
use object_store::local::LocalFileSystem;
use object_store::memory::InMemory;
use object_store::path::Path as ObjectPath;
use object_store::{Attribute, Attributes, ObjectStore, PutOptions, PutPayload};

use crate::error::StoreError;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";
pub const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";
pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const CACHE_CONTROL: &str = "public, max-age=31536000";

/// Handle to the library bucket.
#[derive(Debug, Clone)]
pub struct BlobStore {
    store: Arc<dyn ObjectStore>,
    bucket: String,
    public_base_url: String,
    attributes: bool,
}

impl BlobStore {
    /// Connect to the backend selected in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotConfigured`] if S3 credentials are missing,
    /// or the backend's own error if it cannot be built.
    pub fn from_config(config: &StorageConfig) -> Result<Self, StoreError> {
        let (store, attributes): (Arc<dyn ObjectStore>, bool) = match config.backend {
            StorageBackend::S3 => {
                if !config.is_configured() {
                    return Err(StoreError::NotConfigured(
                        "storage.bucket, storage.access_key_id and storage.secret_access_key are required for the s3 backend".into(),
                    ));
                }
                let mut builder = AmazonS3Builder::new()
                    .with_bucket_name(&config.bucket)
                    .with_region(&config.region)
                    .with_access_key_id(&config.access_key_id)
                    .with_secret_access_key(&config.secret_access_key);
                if !config.endpoint.is_empty() {
                    builder = builder.with_endpoint(&config.endpoint);
                }
                (Arc::new(builder.build()?), true)
            }
            StorageBackend::Local => {
                let root = PathBuf::from(&config.local_root);
                std::fs::create_dir_all(&root).map_err(|e| StoreError::io(&root, e))?;
                // LocalFileSystem rejects puts that carry attributes.
                (Arc::new(LocalFileSystem::new_with_prefix(&root)?), false)
            }
            StorageBackend::Memory => (Arc::new(InMemory::new()), true),
        };
        Ok(Self {
            store,
            bucket: config.bucket.clone(),
            public_base_url: config.public_base_url.clone(),
            attributes,
        })
    }

    /// Fresh in-memory store.
    #[must_use]
    pub fn in_memory(bucket: impl Into<String>) -> Self {
        Self {
            store: Arc::new(InMemory::new()),
            bucket: bucket.into(),
            public_base_url: String::new(),
            attributes: true,
        }
    }

    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Public download URL for `path`.
    #[must_use]
    pub fn public_url(&self, path: &str) -> String {
        if self.public_base_url.is_empty() {
            nara_core::naming::public_url(&self.bucket, path)
        } else {
            format!("{}/{path}", self.public_base_url.trim_end_matches('/'))
        }
    }

    /// Upload `bytes` to `path` with a long-lived cache header. Returns the public URL.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ObjectStore`] if the upload fails.
    pub async fn put(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &'static str,
    ) -> Result<String, StoreError> {
        let location = ObjectPath::parse(path)?;
        let mut opts = PutOptions::default();
        if self.attributes {
            let mut attributes = Attributes::new();
            attributes.insert(Attribute::ContentType, content_type.into());
            attributes.insert(Attribute::CacheControl, CACHE_CONTROL.into());
            opts.attributes = attributes;
        }
        let size = bytes.len();
        self.store
            .put_opts(&location, PutPayload::from(bytes), opts)
            .await?;
        tracing::debug!(path, size, content_type, "object uploaded");
        Ok(self.public_url(path))
    }

    /// Upload a PDF.
    ///
    /// # Errors
    ///
    /// As [`Self::put`].
    pub async fn put_pdf(&self, path: &str, bytes: Vec<u8>) -> Result<String, StoreError> {
        self.put(path, bytes, PDF_CONTENT_TYPE).await
    }

    /// Upload a UTF-8 text document.
    ///
    /// # Errors
    ///
    /// As [`Self::put`].
    pub async fn put_text(&self, path: &str, text: String) -> Result<String, StoreError> {
        self.put(path, text.into_bytes(), TEXT_CONTENT_TYPE).await
    }

    /// Download the object at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if there is no such object.
    pub async fn get(&self, path: &str) -> Result<Vec<u8>, StoreError> {
        let location = ObjectPath::parse(path)?;
        match self.store.get(&location).await {
            Ok(result) => Ok(result.bytes().await?.to_vec()),
            Err(object_store::Error::NotFound { .. }) => Err(StoreError::NotFound(path.into())),
            Err(e) => Err(e.into()),
        }
    }

    /// Paths of every object under `prefix`, sorted.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ObjectStore`] if listing fails.
    pub async fn list(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        let prefix = ObjectPath::parse(prefix)?;
        let mut paths: Vec<String> = self
            .store
            .list(Some(&prefix))
            .map_ok(|meta| meta.location.to_string())
            .try_collect()
            .await?;
        paths.sort();
        Ok(paths)
    }

    /// Content type recorded for `path`, when the backend keeps one.
    ///
    /// # Errors
    ///
    /// As [`Self::get`].
    pub async fn content_type(&self, path: &str) -> Result<Option<String>, StoreError> {
        let location = ObjectPath::parse(path)?;
        let result = self.store.get(&location).await?;
        Ok(result
            .attributes
            .get(&Attribute::ContentType)
            .map(|v| v.as_ref().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_get_roundtrip_with_public_url() {
        let blobs = BlobStore::in_memory("nara-test.appspot.com");
        let url = blobs
            .put_pdf("pdfs/BOBP/B1-report.pdf", b"%PDF-1.4 body".to_vec())
            .await
            .unwrap();

        assert_eq!(
            url,
            "https://firebasestorage.googleapis.com/v0/b/nara-test.appspot.com/o/pdfs%2FBOBP%2FB1-report.pdf?alt=media"
        );
        assert_eq!(
            blobs.get("pdfs/BOBP/B1-report.pdf").await.unwrap(),
            b"%PDF-1.4 body"
        );
        assert_eq!(
            blobs.content_type("pdfs/BOBP/B1-report.pdf").await.unwrap().as_deref(),
            Some(PDF_CONTENT_TYPE)
        );
    }

    #[tokio::test]
    async fn missing_object_is_not_found() {
        let blobs = BlobStore::in_memory("b");
        assert!(matches!(
            blobs.get("pdfs/none.pdf").await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn local_backend_writes_under_root() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorageConfig {
            backend: StorageBackend::Local,
            local_root: dir.path().join("bucket").display().to_string(),
            public_base_url: "https://cdn.example.org/library".into(),
            ..StorageConfig::default()
        };
        let blobs = BlobStore::from_config(&config).unwrap();

        let url = blobs
            .put_text("pdfs_tamil/General/x.txt", "வணக்கம்".into())
            .await
            .unwrap();

        assert_eq!(url, "https://cdn.example.org/library/pdfs_tamil/General/x.txt");
        assert!(dir.path().join("bucket/pdfs_tamil/General/x.txt").exists());
        assert_eq!(
            blobs.list("pdfs_tamil").await.unwrap(),
            vec!["pdfs_tamil/General/x.txt"]
        );
    }

    #[test]
    fn s3_without_credentials_is_rejected() {
        let err = BlobStore::from_config(&StorageConfig::default()).unwrap_err();
        assert!(matches!(err, StoreError::NotConfigured(_)));
    }
}
