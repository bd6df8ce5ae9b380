//! Append-only run history in JSON Lines.

use std::path::{Path, PathBuf};

use nara_core::responses::RunRecord;

use crate::error::StoreError;

/// One [`RunRecord`] per line, appended after every daily run.
#[derive(Debug, Clone)]
pub struct RunHistory {
    path: PathBuf,
}

impl RunHistory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record, creating the file and its directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be written.
    pub fn append(&self, record: &RunRecord) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }
        serde_jsonlines::append_json_lines(&self.path, [record])
            .map_err(|e| StoreError::io(&self.path, e))
    }

    /// All records, oldest first. A missing file is an empty history.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file is unreadable or a line is not a record.
    pub fn read_all(&self) -> Result<Vec<RunRecord>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        serde_jsonlines::json_lines(&self.path)
            .map_err(|e| StoreError::io(&self.path, e))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| StoreError::io(&self.path, e))
    }

    /// The most recent `n` records, newest last.
    ///
    /// # Errors
    ///
    /// As [`Self::read_all`].
    pub fn tail(&self, n: usize) -> Result<Vec<RunRecord>, StoreError> {
        let mut records = self.read_all()?;
        let skip = records.len().saturating_sub(n);
        Ok(records.split_off(skip))
    }
}
