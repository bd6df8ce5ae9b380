//! # nara-store
//!
//! Persistence for the ingestion jobs:
//! - flat JSON array files (catalogue, upload queue) rewritten atomically
//! - the object storage bucket for PDFs and translations
//! - JSON document collections in the same bucket
//! - the append-only run history

pub mod blob;
pub mod catalogue;
pub mod documents;
pub mod history;
pub mod json_file;
pub mod queue;

mod error;

pub use blob::BlobStore;
pub use catalogue::{CatalogueFile, catalogue_status};
pub use documents::DocumentStore;
pub use error::StoreError;
pub use history::RunHistory;
pub use json_file::JsonArrayFile;
pub use queue::QueueFile;
