//! The upload queue file.

use nara_core::entities::QueueItem;

use crate::json_file::JsonArrayFile;

/// `queue/upload_queue.json`: an array of [`QueueItem`], appended to and
/// never pruned.
pub type QueueFile = JsonArrayFile<QueueItem>;

/// Whether a work from `source` with `source_id` is already queued, in any status.
#[must_use]
pub fn is_queued(queue: &[QueueItem], source: &str, source_id: &str) -> bool {
    queue
        .iter()
        .any(|item| item.source == source && item.source_id == source_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use nara_core::entities::WorkMetadata;
    use nara_core::enums::Category;

    fn item(source_id: &str) -> QueueItem {
        QueueItem::pending(
            WorkMetadata {
                title: format!("Work {source_id}"),
                author: "Unknown Author".into(),
                publisher: "CORE".into(),
                publication_year: 2024,
                abstract_text: String::new(),
                language: "en".into(),
                keywords: Vec::new(),
                doi: None,
                source_url: None,
            },
            format!("temp/pdfs/{source_id}.pdf"),
            Category::Rbook,
            "CORE",
            source_id,
            Utc::now(),
        )
    }

    #[test]
    fn queued_lookup_matches_source_and_id() {
        let queue = vec![item("10"), item("11")];
        assert!(is_queued(&queue, "CORE", "10"));
        assert!(!is_queued(&queue, "CORE", "12"));
        assert!(!is_queued(&queue, "ARXIV", "10"));
    }
}
