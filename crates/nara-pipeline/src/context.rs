//! Everything a job needs, built once per process.

use std::sync::Arc;

use nara_config::NaraConfig;
use nara_sources::SourceClient;
use nara_store::{BlobStore, CatalogueFile, QueueFile, RunHistory};

use crate::error::PipelineError;
use crate::extract::{PdfTextExtractor, TextExtractor};
use crate::notify::{LogNotifier, Notifier};
use crate::runner::{RunObserver, Silent};

/// Shared handles for every job.
#[derive(Clone)]
pub struct JobContext {
    pub config: NaraConfig,
    pub sources: SourceClient,
    pub blobs: BlobStore,
    pub extractor: Arc<dyn TextExtractor>,
    pub notifier: Arc<dyn Notifier>,
    pub observer: Arc<dyn RunObserver>,
}

impl JobContext {
    /// Build the HTTP client and storage backend from `config`.
    ///
    /// # Errors
    ///
    /// Returns the client or storage construction error.
    pub fn from_config(config: NaraConfig) -> Result<Self, PipelineError> {
        let sources = SourceClient::new(&config)?;
        let blobs = BlobStore::from_config(&config.storage)?;
        Ok(Self::new(config, sources, blobs))
    }

    /// Context with the PDF extractor, the log notifier and no progress output.
    #[must_use]
    pub fn new(config: NaraConfig, sources: SourceClient, blobs: BlobStore) -> Self {
        Self {
            config,
            sources,
            blobs,
            extractor: Arc::new(PdfTextExtractor),
            notifier: Arc::new(LogNotifier),
            observer: Arc::new(Silent),
        }
    }

    #[must_use]
    pub fn with_extractor(mut self, extractor: Arc<dyn TextExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    #[must_use]
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn RunObserver>) -> Self {
        self.observer = observer;
        self
    }

    #[must_use]
    pub fn catalogue(&self) -> CatalogueFile {
        CatalogueFile::new(self.config.library.catalogue_path())
    }

    #[must_use]
    pub fn queue(&self) -> QueueFile {
        QueueFile::new(self.config.library.queue_path())
    }

    #[must_use]
    pub fn history(&self) -> RunHistory {
        RunHistory::new(self.config.library.history_path())
    }
}

impl std::fmt::Debug for JobContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobContext")
            .field("config", &self.config)
            .field("blobs", &self.blobs)
            .finish_non_exhaustive()
    }
}
