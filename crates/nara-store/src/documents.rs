//! JSON document collections kept in the object store.
//!
//! A document lives at `collections/{collection}/{id}.json`.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::blob::{BlobStore, JSON_CONTENT_TYPE};
use crate::error::StoreError;

const ROOT: &str = "collections";

/// Collections of JSON documents on top of a [`BlobStore`].
#[derive(Debug, Clone)]
pub struct DocumentStore {
    blobs: BlobStore,
}

/// Object path for a document.
#[must_use]
pub fn document_path(collection: &str, id: &str) -> String {
    format!("{ROOT}/{collection}/{id}.json")
}

impl DocumentStore {
    #[must_use]
    pub const fn new(blobs: BlobStore) -> Self {
        Self { blobs }
    }

    /// Create or replace a document.
    ///
    /// # Errors
    ///
    /// Returns a JSON error if `doc` cannot be serialized, or the upload error.
    pub async fn put<T: Serialize + Sync>(
        &self,
        collection: &str,
        id: &str,
        doc: &T,
    ) -> Result<(), StoreError> {
        let path = document_path(collection, id);
        let body = serde_json::to_vec_pretty(doc).map_err(|e| StoreError::json(&path, e))?;
        self.blobs.put(&path, body, JSON_CONTENT_TYPE).await?;
        Ok(())
    }

    /// Read a document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if it does not exist, or a JSON error.
    pub async fn get<T: DeserializeOwned>(&self, collection: &str, id: &str) -> Result<T, StoreError> {
        let path = document_path(collection, id);
        let raw = self.blobs.get(&path).await?;
        serde_json::from_slice(&raw).map_err(|e| StoreError::json(&path, e))
    }

    /// Ids of every document in `collection`, sorted.
    ///
    /// # Errors
    ///
    /// Returns the listing error.
    pub async fn list_ids(&self, collection: &str) -> Result<Vec<String>, StoreError> {
        let prefix = format!("{ROOT}/{collection}");
        let paths = self.blobs.list(&prefix).await?;
        Ok(paths
            .iter()
            .filter_map(|p| p.rsplit('/').next())
            .filter_map(|file| file.strip_suffix(".json"))
            .map(String::from)
            .collect())
    }
}
