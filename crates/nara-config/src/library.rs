//! Local file locations for the catalogue, queue, and run history.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_catalogue_path() -> String {
    String::from("public/library_catalogue.json")
}

fn default_queue_path() -> String {
    String::from("queue/upload_queue.json")
}

fn default_temp_dir() -> String {
    String::from("temp/pdfs")
}

fn default_history_path() -> String {
    String::from("logs/runs.jsonl")
}

const fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LibraryConfig {
    #[serde(default = "default_catalogue_path")]
    pub catalogue_path: String,

    #[serde(default = "default_queue_path")]
    pub queue_path: String,

    /// Where the daily agent drops downloaded PDFs before upload.
    #[serde(default = "default_temp_dir")]
    pub temp_dir: String,

    /// Append-only JSON Lines file with one record per daily run.
    #[serde(default = "default_history_path")]
    pub history_path: String,

    /// Write a timestamped copy of the catalogue before each batch job.
    #[serde(default = "default_true")]
    pub backup: bool,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            catalogue_path: default_catalogue_path(),
            queue_path: default_queue_path(),
            temp_dir: default_temp_dir(),
            history_path: default_history_path(),
            backup: true,
        }
    }
}

impl LibraryConfig {
    pub fn catalogue_path(&self) -> PathBuf {
        PathBuf::from(&self.catalogue_path)
    }

    pub fn queue_path(&self) -> PathBuf {
        PathBuf::from(&self.queue_path)
    }

    pub fn temp_dir(&self) -> PathBuf {
        PathBuf::from(&self.temp_dir)
    }

    pub fn history_path(&self) -> PathBuf {
        PathBuf::from(&self.history_path)
    }
}
