use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::enums::{Category, QueueStatus};
use crate::errors::CoreError;

/// Bibliographic metadata extracted from a harvested work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkMetadata {
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub publication_year: i32,
    #[serde(rename = "abstract", default)]
    pub abstract_text: String,
    pub language: String,
    #[serde(default, deserialize_with = "keyword_list")]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub doi: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
}

/// A downloaded work waiting to be uploaded to the library bucket.
///
/// Queue items are appended and never removed; their status moves forward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct QueueItem {
    #[serde(flatten)]
    pub metadata: WorkMetadata,
    /// Local path of the downloaded PDF.
    #[serde(rename = "pdfUrl")]
    pub pdf_path: String,
    pub category: Category,
    pub source: String,
    /// CORE ids are numbers; older queue files store them unquoted.
    #[serde(deserialize_with = "scalar_string")]
    pub source_id: String,
    pub added_at: DateTime<Utc>,
    pub status: QueueStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded_at: Option<DateTime<Utc>>,
}

/// Text of one keyword or topic entry. Topic objects contribute their
/// `name`; `null` and nameless objects are dropped.
#[must_use]
pub fn keyword_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Object(map) => map.get("name").and_then(Value::as_str).map(String::from),
        Value::Null | Value::Array(_) => None,
    }
}

fn keyword_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let raw = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw.iter().filter_map(keyword_text).collect())
}

fn scalar_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or number id, found {other}"
        ))),
    }
}

impl QueueItem {
    /// New `pending` item.
    #[must_use]
    pub fn pending(
        metadata: WorkMetadata,
        pdf_path: String,
        category: Category,
        source: impl Into<String>,
        source_id: impl Into<String>,
        added_at: DateTime<Utc>,
    ) -> Self {
        Self {
            metadata,
            pdf_path,
            category,
            source: source.into(),
            source_id: source_id.into(),
            added_at,
            status: QueueStatus::Pending,
            error: None,
            storage_path: None,
            url: None,
            uploaded_at: None,
        }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == QueueStatus::Pending
    }

    /// Move to `next`, rejecting transitions the status machine forbids.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] if `next` is not reachable.
    pub fn transition(&mut self, next: QueueStatus) -> Result<(), CoreError> {
        if !self.status.can_transition_to(next) {
            return Err(CoreError::InvalidTransition {
                entity_type: "queue_item".into(),
                id: self.source_id.clone(),
                from: self.status.to_string(),
                to: next.to_string(),
            });
        }
        self.status = next;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] unless the item is pending.
    pub fn mark_uploaded(
        &mut self,
        storage_path: String,
        url: String,
        at: DateTime<Utc>,
    ) -> Result<(), CoreError> {
        self.transition(QueueStatus::Uploaded)?;
        self.storage_path = Some(storage_path);
        self.url = Some(url);
        self.uploaded_at = Some(at);
        self.error = None;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] unless the item is pending.
    pub fn mark_failed(&mut self, error: impl Into<String>) -> Result<(), CoreError> {
        self.transition(QueueStatus::Failed)?;
        self.error = Some(error.into());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata() -> WorkMetadata {
        WorkMetadata {
            title: "Coral reef monitoring".into(),
            author: "Perera, A.".into(),
            publisher: "CORE".into(),
            publication_year: 2021,
            abstract_text: String::new(),
            language: "English".into(),
            keywords: vec!["reef".into()],
            doi: None,
            source_url: Some("https://core.ac.uk/download/1.pdf".into()),
        }
    }

    #[test]
    fn serializes_with_original_queue_keys() {
        let item = QueueItem::pending(
            metadata(),
            "/tmp/1.pdf".into(),
            Category::Rbook,
            "CORE",
            "1",
            Utc::now(),
        );
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["status"], "pending");
        assert_eq!(json["pdfUrl"], "/tmp/1.pdf");
        assert_eq!(json["sourceId"], "1");
        assert_eq!(json["publicationYear"], 2021);
        assert_eq!(json["category"], "RBOOK");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn reads_numeric_source_ids_and_topic_objects() {
        let raw = r#"{
            "title": "Lagoon fisheries of Negombo",
            "author": "Unknown Author",
            "publisher": "CORE",
            "publicationYear": 2019,
            "abstract": "",
            "language": "en",
            "keywords": ["lagoons", {"id": 4, "name": "Fisheries"}, 17, null],
            "doi": null,
            "sourceUrl": "https://core.ac.uk/download/123456.pdf",
            "pdfUrl": "/tmp/nara-downloads/123456.pdf",
            "category": "RPAPER",
            "source": "CORE",
            "sourceId": 123456,
            "addedAt": "2025-10-14T02:00:05.123Z",
            "status": "pending"
        }"#;

        let item: QueueItem = serde_json::from_str(raw).unwrap();

        assert_eq!(item.source_id, "123456");
        assert_eq!(item.metadata.keywords, vec!["lagoons", "Fisheries", "17"]);
        assert_eq!(serde_json::to_value(&item).unwrap()["sourceId"], "123456");
    }

    #[test]
    fn rejects_structured_source_ids() {
        let raw = r#"{"title": "t", "author": "a", "publisher": "p", "publicationYear": 2020,
            "language": "en", "pdfUrl": "/tmp/x.pdf", "category": "RBOOK", "source": "CORE",
            "sourceId": {"core": 1}, "addedAt": "2025-10-14T02:00:00Z", "status": "pending"}"#;
        let err = serde_json::from_str::<QueueItem>(raw).unwrap_err();
        assert!(err.to_string().contains("expected a string or number id"));
    }

    #[test]
    fn uploaded_items_cannot_be_failed() {
        let mut item = QueueItem::pending(
            metadata(),
            "/tmp/1.pdf".into(),
            Category::Rbook,
            "CORE",
            "1",
            Utc::now(),
        );
        item.mark_uploaded("pdfs/RBOOK/1.pdf".into(), "u".into(), Utc::now())
            .unwrap();
        let err = item.mark_failed("late").unwrap_err();
        assert!(matches!(err, CoreError::InvalidTransition { .. }));
        assert_eq!(
            err.to_string(),
            "Invalid state transition: queue_item 1 from uploaded to failed"
        );
        assert!(!item.is_pending());
    }
}
