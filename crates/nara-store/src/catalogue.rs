//! The library catalogue file and its status counts.

use nara_core::entities::{CatalogueItem, QueueItem};
use nara_core::enums::QueueStatus;
use nara_core::responses::CatalogueStatus;

use crate::json_file::JsonArrayFile;

/// `library_catalogue.json`: an array of [`CatalogueItem`].
pub type CatalogueFile = JsonArrayFile<CatalogueItem>;

/// Counts for `nara status`.
#[must_use]
pub fn catalogue_status(items: &[CatalogueItem], queue: &[QueueItem]) -> CatalogueStatus {
    let queue_count = |status: QueueStatus| queue.iter().filter(|q| q.status == status).count();
    CatalogueStatus {
        items: items.len(),
        uploaded: items.iter().filter(|i| i.is_uploaded()).count(),
        upload_errors: items
            .iter()
            .filter(|i| i.upload_error.is_some() && !i.is_uploaded())
            .count(),
        archive_pending: items.iter().filter(|i| i.needs_archive_upload()).count(),
        translated: items
            .iter()
            .filter(|i| i.translations_available.as_ref().is_some_and(|t| !t.is_empty()))
            .count(),
        translation_pending: items.iter().filter(|i| i.needs_translation()).count(),
        queue_pending: queue_count(QueueStatus::Pending),
        queue_uploaded: queue_count(QueueStatus::Uploaded),
        queue_failed: queue_count(QueueStatus::Failed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use nara_core::entities::ItemId;

    #[test]
    fn status_counts_each_state() {
        let mut uploaded = CatalogueItem::new(ItemId::Number(1), "Uploaded");
        uploaded.source_url = Some("https://archive.org/details/one".into());
        uploaded.mark_uploaded("u".into(), "pdfs/General/one.pdf".into(), 2048, Utc::now());

        let mut failed = CatalogueItem::new(ItemId::Number(2), "Failed");
        failed.source_url = Some("https://archive.org/details/two".into());
        failed.mark_upload_failed("Download failed", Utc::now());

        let plain = CatalogueItem::new(ItemId::Number(3), "No source");

        let status = catalogue_status(&[uploaded, failed, plain], &[]);
        assert_eq!(status.items, 3);
        assert_eq!(status.uploaded, 1);
        assert_eq!(status.upload_errors, 1);
        assert_eq!(status.archive_pending, 1);
        assert_eq!(status.translation_pending, 1);
        assert_eq!(status.translated, 0);
        assert_eq!(status.queue_pending, 0);
    }
}
