//! Storage object naming and public URL helpers.

use std::path::Path;

use crate::entities::CatalogueItem;
use crate::enums::{Category, Language};

/// Folder used when an item has no material type.
pub const DEFAULT_MATERIAL: &str = "General";

/// Lower-case slug: runs of anything but `[a-z0-9]` become `-`, trimmed.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for ch in text.to_lowercase().chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch);
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// `{barcode or BOOK{id}}-{slug of the first 50 title chars}.pdf`
#[must_use]
pub fn storage_filename(item: &CatalogueItem) -> String {
    let barcode = item
        .barcode
        .clone()
        .unwrap_or_else(|| format!("BOOK{}", item.id));
    let title: String = item.title.chars().take(50).collect();
    format!("{barcode}-{}.pdf", slugify(&title))
}

/// `pdfs/{material}/{filename}`
#[must_use]
pub fn storage_path(item: &CatalogueItem) -> String {
    let material = item
        .material_type_name
        .as_deref()
        .unwrap_or(DEFAULT_MATERIAL);
    format!("pdfs/{material}/{}", storage_filename(item))
}

/// Path of a queued work inside the bucket: `pdfs/{category}/{file name}`.
#[must_use]
pub fn queue_storage_path(category: Category, local_file: &Path) -> String {
    let file = local_file
        .file_name()
        .map_or_else(|| String::from("document.pdf"), |n| n.to_string_lossy().into_owned());
    format!("pdfs/{category}/{file}")
}

/// `{language folder}/{material}/{original basename}.txt`
#[must_use]
pub fn translation_path(item: &CatalogueItem, language: Language) -> Option<String> {
    let original = item.firebase_path.as_deref()?;
    let file = original.rsplit('/').next().unwrap_or(original);
    let basename = file.strip_suffix(".pdf").unwrap_or(file);
    let material = item
        .material_type_name
        .as_deref()
        .unwrap_or(DEFAULT_MATERIAL);
    Some(format!("{}/{material}/{basename}.txt", language.folder()))
}

/// Public download URL for an object in a Firebase-style bucket.
#[must_use]
pub fn public_url(bucket: &str, object_path: &str) -> String {
    format!(
        "https://firebasestorage.googleapis.com/v0/b/{bucket}/o/{}?alt=media",
        urlencoding::encode(object_path)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::ItemId;
    use pretty_assertions::assert_eq;

    fn book() -> CatalogueItem {
        let mut item = CatalogueItem::new(
            ItemId::Number(42),
            "  The Fisheries of Sri Lanka: A Survey (1987 Edition) and a very long subtitle",
        );
        item.material_type_name = Some("RBOOK".into());
        item
    }

    #[test]
    fn slug_collapses_and_trims() {
        assert_eq!(slugify("--Hello,  World!--"), "hello-world");
        assert_eq!(slugify("Āé 12"), "12");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn filename_falls_back_to_book_id() {
        assert_eq!(
            storage_filename(&book()),
            "BOOK42-the-fisheries-of-sri-lanka-a-survey-1987-editi.pdf"
        );
    }

    #[test]
    fn filename_prefers_barcode() {
        let mut item = book();
        item.barcode = Some("NARA-0001".into());
        assert!(storage_filename(&item).starts_with("NARA-0001-"));
    }

    #[test]
    fn storage_path_uses_general_without_material() {
        let mut item = book();
        item.material_type_name = None;
        assert!(storage_path(&item).starts_with("pdfs/General/BOOK42-"));
    }

    #[test]
    fn translation_path_replaces_extension() {
        let mut item = book();
        item.firebase_path = Some("pdfs/RBOOK/BOOK42-fisheries.pdf".into());
        assert_eq!(
            translation_path(&item, Language::Tamil).as_deref(),
            Some("pdfs_tamil/RBOOK/BOOK42-fisheries.txt")
        );
        item.firebase_path = None;
        assert!(translation_path(&item, Language::Sinhala).is_none());
    }

    #[test]
    fn queue_path_uses_category_folder() {
        let path = queue_storage_path(Category::Thesis, Path::new("/tmp/pdfs/core-77.pdf"));
        assert_eq!(path, "pdfs/THESIS/core-77.pdf");
    }

    #[test]
    fn public_url_encodes_slashes() {
        assert_eq!(
            public_url("nara-web.appspot.com", "pdfs/RBOOK/a b.pdf"),
            "https://firebasestorage.googleapis.com/v0/b/nara-web.appspot.com/o/pdfs%2FRBOOK%2Fa%20b.pdf?alt=media"
        );
    }
}
