use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::enums::Language;

/// Query parameter present in every V4-signed Cloud Storage URL.
const SIGNED_URL_MARKER: &str = "X-Goog-Algorithm";

/// Catalogue record id. The catalogue file mixes numeric and string ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ItemId {
    Number(u64),
    Text(String),
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Result of translating one item into one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum TranslationOutcome {
    Completed {
        url: String,
        firebase_path: String,
        translated_at: DateTime<Utc>,
    },
    Failed {
        error: String,
    },
}

impl TranslationOutcome {
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}

/// A book or document in the library catalogue.
///
/// Fields the ingestion tools do not know about are kept in `extra` so a
/// rewrite never drops catalogue data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CatalogueItem {
    pub id: ItemId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material_type_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Storage object path of the uploaded PDF.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firebase_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_size_mb: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_attempted_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translations: Option<BTreeMap<String, TranslationOutcome>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translations_available: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation_error: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CatalogueItem {
    /// Minimal record with only id and title set.
    #[must_use]
    pub fn new(id: ItemId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            barcode: None,
            material_type_name: None,
            source_url: None,
            download_source: None,
            url: None,
            firebase_path: None,
            uploaded_at: None,
            pdf_size_mb: None,
            upload_error: None,
            upload_attempted_at: None,
            translations: None,
            translations_available: None,
            translation_error: None,
            extra: Map::new(),
        }
    }

    /// First `max` characters of the title, for log lines.
    #[must_use]
    pub fn short_title(&self, max: usize) -> String {
        self.title.chars().take(max).collect()
    }

    /// Both the public URL and the storage path are recorded.
    #[must_use]
    pub const fn is_uploaded(&self) -> bool {
        self.url.is_some() && self.firebase_path.is_some()
    }

    #[must_use]
    pub fn is_archive_source(&self) -> bool {
        self.source_url
            .as_deref()
            .is_some_and(|url| url.contains("archive.org"))
    }

    /// Internet Archive item without an uploaded copy.
    #[must_use]
    pub fn needs_archive_upload(&self) -> bool {
        self.is_archive_source() && !self.is_uploaded()
    }

    /// The recorded URL is a signed Cloud Storage link, which expires.
    #[must_use]
    pub fn has_signed_url(&self) -> bool {
        self.url
            .as_deref()
            .is_some_and(|url| url.contains(SIGNED_URL_MARKER))
    }

    /// Has a source URL and is missing a stored copy or a permanent public URL.
    #[must_use]
    pub fn needs_pdf_upload(&self) -> bool {
        self.source_url.is_some()
            && (self.url.is_none() || self.firebase_path.is_none() || self.has_signed_url())
    }

    /// Uploaded PDF that has never been through translation.
    #[must_use]
    pub const fn needs_translation(&self) -> bool {
        self.firebase_path.is_some() && self.translations.is_none()
    }

    /// Record a successful upload and clear any earlier upload error.
    pub fn mark_uploaded(
        &mut self,
        url: String,
        storage_path: String,
        size_bytes: u64,
        at: DateTime<Utc>,
    ) {
        self.url = Some(url);
        self.firebase_path = Some(storage_path);
        self.uploaded_at = Some(at);
        self.pdf_size_mb = Some(format_size_mb(size_bytes));
        self.upload_error = None;
    }

    pub fn mark_upload_failed(&mut self, error: impl Into<String>, at: DateTime<Utc>) {
        self.upload_error = Some(error.into());
        self.upload_attempted_at = Some(at);
    }

    /// Store per-language outcomes. Returns the keys that succeeded.
    pub fn record_translations(
        &mut self,
        outcomes: BTreeMap<Language, TranslationOutcome>,
    ) -> Vec<String> {
        let available: Vec<String> = outcomes
            .iter()
            .filter(|(_, outcome)| outcome.is_completed())
            .map(|(lang, _)| lang.key().to_string())
            .collect();
        self.translations = Some(
            outcomes
                .into_iter()
                .map(|(lang, outcome)| (lang.key().to_string(), outcome))
                .collect(),
        );
        self.translations_available = Some(available.clone());
        available
    }

    pub fn mark_translation_failed(&mut self, error: impl Into<String>) {
        self.translation_error = Some(error.into());
    }
}

/// Size in megabytes with two decimals, as the catalogue stores it.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_size_mb(size_bytes: u64) -> String {
    format!("{:.2}", size_bytes as f64 / 1024.0 / 1024.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn archive_book() -> CatalogueItem {
        let mut item = CatalogueItem::new(ItemId::Number(7), "Fisheries of the Bay of Bengal");
        item.source_url = Some("https://archive.org/details/bobp-report-12".into());
        item
    }

    #[test]
    fn parses_mixed_id_types() {
        let numeric: CatalogueItem = serde_json::from_str(r#"{"id": 12, "title": "A"}"#).unwrap();
        let text: CatalogueItem = serde_json::from_str(r#"{"id": "B-12", "title": "B"}"#).unwrap();
        assert_eq!(numeric.id, ItemId::Number(12));
        assert_eq!(text.id.to_string(), "B-12");
    }

    #[test]
    fn unknown_fields_survive_roundtrip() {
        let raw = r#"{"id": 1, "title": "A", "isbn": "978-0", "copies": 3}"#;
        let item: CatalogueItem = serde_json::from_str(raw).unwrap();
        assert_eq!(item.extra.get("isbn"), Some(&Value::from("978-0")));

        let back = serde_json::to_value(&item).unwrap();
        assert_eq!(back["copies"], Value::from(3));
        assert!(back.get("upload_error").is_none());
    }

    #[test]
    fn archive_selection_rules() {
        let mut item = archive_book();
        assert!(item.needs_archive_upload());

        item.mark_uploaded(
            "https://example/o/x".into(),
            "pdfs/General/x.pdf".into(),
            2 * 1024 * 1024,
            Utc::now(),
        );
        assert!(!item.needs_archive_upload());
        assert_eq!(item.pdf_size_mb.as_deref(), Some("2.00"));
        assert!(item.needs_translation());
    }

    #[test]
    fn pdf_selection_refreshes_signed_urls() {
        let mut item = CatalogueItem::new(ItemId::Number(3), "Lagoon survey");
        assert!(!item.needs_pdf_upload());

        item.source_url = Some("https://example.org/lagoon.pdf".into());
        assert!(item.needs_pdf_upload());

        item.mark_uploaded(
            "https://firebasestorage.googleapis.com/v0/b/b/o/pdfs%2Fx.pdf?alt=media".into(),
            "pdfs/General/x.pdf".into(),
            10,
            Utc::now(),
        );
        assert!(!item.needs_pdf_upload());

        item.url = Some(
            "https://storage.googleapis.com/b/pdfs/General/x.pdf?X-Goog-Algorithm=GOOG4-RSA-SHA256&X-Goog-Expires=604800"
                .into(),
        );
        assert!(item.has_signed_url());
        assert!(item.needs_pdf_upload());

        item.url = None;
        assert!(item.needs_pdf_upload());
    }

    #[test]
    fn upload_success_clears_previous_error() {
        let mut item = archive_book();
        item.mark_upload_failed("timeout", Utc::now());
        assert!(item.upload_error.is_some());

        item.mark_uploaded("u".into(), "p".into(), 1, Utc::now());
        assert!(item.upload_error.is_none());
        assert!(item.upload_attempted_at.is_some());
    }

    #[test]
    fn record_translations_lists_only_completed() {
        let mut item = archive_book();
        let mut outcomes = BTreeMap::new();
        outcomes.insert(
            Language::Tamil,
            TranslationOutcome::Completed {
                url: "u".into(),
                firebase_path: "pdfs_tamil/x.txt".into(),
                translated_at: Utc::now(),
            },
        );
        outcomes.insert(
            Language::Sinhala,
            TranslationOutcome::Failed {
                error: "quota".into(),
            },
        );

        let available = item.record_translations(outcomes);
        assert_eq!(available, vec!["tamil".to_string()]);
        assert_eq!(item.translations.as_ref().map(BTreeMap::len), Some(2));
        assert!(!item.needs_translation());
    }

    #[test]
    fn translation_outcome_untagged_shapes() {
        let failed: TranslationOutcome = serde_json::from_str(r#"{"error": "boom"}"#).unwrap();
        assert!(!failed.is_completed());

        let done: TranslationOutcome = serde_json::from_str(
            r#"{"url": "u", "firebase_path": "p", "translated_at": "2025-10-14T02:00:00Z"}"#,
        )
        .unwrap();
        assert!(done.is_completed());
    }
}
