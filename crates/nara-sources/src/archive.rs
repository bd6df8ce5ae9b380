//! Internet Archive metadata lookup.

use serde::Deserialize;

use crate::{SourceClient, error::SourceError, http::{ARCHIVE, check_response}};

#[derive(Debug, Deserialize)]
struct MetadataResponse {
    #[serde(default)]
    files: Vec<ArchiveFile>,
}

/// One file entry from `/metadata/{identifier}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ArchiveFile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub format: Option<String>,
}

impl ArchiveFile {
    fn is_pdf(&self) -> bool {
        self.name.to_lowercase().ends_with(".pdf")
    }
}

/// Item identifier: the path segment after `archive.org/details/`.
#[must_use]
pub fn identifier_from_url(url: &str) -> Option<&str> {
    let (_, rest) = url.split_once("archive.org/details/")?;
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let identifier = &rest[..end];
    (!identifier.is_empty()).then_some(identifier)
}

/// The first `Text PDF` file, else the first file ending in `.pdf`.
#[must_use]
pub fn choose_pdf(files: &[ArchiveFile]) -> Option<&ArchiveFile> {
    files
        .iter()
        .find(|f| f.is_pdf() && f.format.as_deref() == Some("Text PDF"))
        .or_else(|| files.iter().find(|f| f.is_pdf()))
}

impl SourceClient {
    /// `{base}/download/{identifier}/{file}`
    #[must_use]
    pub fn archive_download_url(&self, identifier: &str, file_name: &str) -> String {
        format!(
            "{}/download/{identifier}/{}",
            self.archive.base_url.trim_end_matches('/'),
            urlencoding::encode(file_name).replace("%2F", "/")
        )
    }

    /// List the files of an archive item.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] on transport, status, or parse failure.
    pub async fn archive_files(&self, identifier: &str) -> Result<Vec<ArchiveFile>, SourceError> {
        let url = format!(
            "{}/metadata/{}",
            self.archive.base_url.trim_end_matches('/'),
            urlencoding::encode(identifier)
        );
        let resp = check_response(ARCHIVE, self.http.get(&url).send().await?).await?;
        let body = resp.text().await?;
        let data: MetadataResponse =
            serde_json::from_str(&body).map_err(|e| SourceError::Parse(e.to_string()))?;
        Ok(data.files)
    }

    /// Resolve an `archive.org/details/...` URL to a direct PDF download URL.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::NotFound`] if the URL has no identifier or the
    /// item has no PDF file, plus any error from [`Self::archive_files`].
    pub async fn resolve_archive_pdf(&self, source_url: &str) -> Result<String, SourceError> {
        let identifier = identifier_from_url(source_url).ok_or_else(|| {
            SourceError::NotFound(format!("no archive identifier in {source_url}"))
        })?;
        let files = self.archive_files(identifier).await?;
        let pdf = choose_pdf(&files)
            .ok_or_else(|| SourceError::NotFound(format!("no PDF file in archive item {identifier}")))?;
        tracing::debug!(identifier, file = %pdf.name, "archive pdf resolved");
        Ok(self.archive_download_url(identifier, &pdf.name))
    }
}
