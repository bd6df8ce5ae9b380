//! Entity structs for catalogue, queue, and maritime records.
//!
//! All entities derive `Serialize`, `Deserialize`, `JsonSchema`, and `PartialEq`.
//! Timestamps use `chrono::DateTime<Utc>`.

mod catalogue;
mod maritime;
mod queue;

pub use catalogue::{CatalogueItem, ItemId, TranslationOutcome};
pub use maritime::{Alert, GeoPoint, Localized, MaritimeService, Port, PortWeather, Vessel};
pub use queue::{QueueItem, WorkMetadata, keyword_text};
