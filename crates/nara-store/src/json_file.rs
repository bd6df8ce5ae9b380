//! Flat JSON array files rewritten wholesale.
//!
//! The whole collection is read once, mutated in memory, and written back.
//! Writes go to a sibling temp file that is renamed over the target, so a
//! crash mid-write leaves the previous version intact.

use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StoreError;

/// A JSON file holding one array of `T`.
#[derive(Debug, Clone)]
pub struct JsonArrayFile<T> {
    path: PathBuf,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Serialize + DeserializeOwned> JsonArrayFile<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _marker: PhantomData,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read the array.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the file is missing, or an I/O or
    /// JSON error.
    pub fn load(&self) -> Result<Vec<T>, StoreError> {
        if !self.path.exists() {
            return Err(StoreError::NotFound(self.path.display().to_string()));
        }
        let raw = std::fs::read_to_string(&self.path).map_err(|e| StoreError::io(&self.path, e))?;
        serde_json::from_str(&raw).map_err(|e| StoreError::json(self.path.display().to_string(), e))
    }

    /// Read the array, treating a missing file as empty.
    ///
    /// # Errors
    ///
    /// Returns an I/O or JSON error if the file exists but is unreadable.
    pub fn load_or_default(&self) -> Result<Vec<T>, StoreError> {
        match self.load() {
            Err(StoreError::NotFound(_)) => Ok(Vec::new()),
            other => other,
        }
    }

    /// Replace the file with `items`, pretty-printed.
    ///
    /// # Errors
    ///
    /// Returns an I/O or JSON error. The previous file is untouched on error.
    pub fn save(&self, items: &[T]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(items)
            .map_err(|e| StoreError::json(self.path.display().to_string(), e))?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }
        let tmp = self.temp_path();
        std::fs::write(&tmp, json).map_err(|e| StoreError::io(&tmp, e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| StoreError::io(&self.path, e))?;
        Ok(())
    }

    /// Copy the current file to `{stem}.backup-{label}-{millis}.json` next to it.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the copy fails, or [`StoreError::NotFound`]
    /// if there is nothing to back up.
    pub fn backup(&self, label: &str, now: DateTime<Utc>) -> Result<PathBuf, StoreError> {
        if !self.path.exists() {
            return Err(StoreError::NotFound(self.path.display().to_string()));
        }
        let stem = self
            .path
            .file_stem()
            .map_or_else(|| "catalogue".into(), |s| s.to_string_lossy().into_owned());
        let name = format!("{stem}.backup-{label}-{}.json", now.timestamp_millis());
        let dest = self.path.with_file_name(name);
        std::fs::copy(&self.path, &dest).map_err(|e| StoreError::io(&dest, e))?;
        tracing::info!(backup = %dest.display(), "backup written");
        Ok(dest)
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map_or_else(|| "data.json".into(), |n| n.to_string_lossy().into_owned());
        self.path.with_file_name(format!(".{name}.tmp"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let file: JsonArrayFile<String> = JsonArrayFile::new(dir.path().join("nested/list.json"));

        file.save(&["a".to_string(), "b".to_string()]).unwrap();

        assert_eq!(file.load().unwrap(), vec!["a", "b"]);
        assert!(!dir.path().join("nested/.list.json.tmp").exists());
    }

    #[test]
    fn missing_file_is_not_found_or_empty() {
        let dir = tempfile::tempdir().unwrap();
        let file: JsonArrayFile<u32> = JsonArrayFile::new(dir.path().join("none.json"));
        assert!(matches!(file.load(), Err(StoreError::NotFound(_))));
        assert!(file.load_or_default().unwrap().is_empty());
    }

    #[test]
    fn corrupt_file_is_a_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "[1, 2,").unwrap();
        let file: JsonArrayFile<u32> = JsonArrayFile::new(path);
        assert!(matches!(file.load_or_default(), Err(StoreError::Json { .. })));
    }

    #[test]
    fn backup_name_carries_label_and_millis() {
        let dir = tempfile::tempdir().unwrap();
        let file: JsonArrayFile<u32> =
            JsonArrayFile::new(dir.path().join("library_catalogue.json"));
        file.save(&[1, 2, 3]).unwrap();
        let now = DateTime::from_timestamp_millis(1_760_000_000_123).unwrap();

        let backup = file.backup("archive", now).unwrap();

        assert_eq!(
            backup.file_name().unwrap().to_string_lossy(),
            "library_catalogue.backup-archive-1760000000123.json"
        );
        assert_eq!(
            std::fs::read_to_string(backup).unwrap(),
            std::fs::read_to_string(file.path()).unwrap()
        );
    }
}
