//! PDF downloads from source URLs.

use std::path::Path;

use nara_core::entities::CatalogueItem;

use crate::{SourceClient, error::SourceError, http::{DOWNLOAD, check_response}};

/// Where a PDF might be fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfCandidate {
    /// Short tag for log lines (`source_url`, `internet_archive`).
    pub kind: &'static str,
    pub url: String,
}

/// Candidate locations for an item's PDF, in the order they should be tried.
///
/// The direct `source_url` comes first. Items from the Internet Archive also
/// get the `/details/` to `/download/` rewrite, with the file name guessed
/// from the title.
#[must_use]
pub fn pdf_candidates(item: &CatalogueItem) -> Vec<PdfCandidate> {
    let Some(source_url) = item.source_url.as_deref() else {
        return Vec::new();
    };
    let mut candidates = vec![PdfCandidate {
        kind: "source_url",
        url: source_url.to_string(),
    }];
    if item.download_source.as_deref() == Some("Internet Archive") {
        let file: String = item
            .title
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        candidates.push(PdfCandidate {
            kind: "internet_archive",
            url: format!("{}/{file}.pdf", source_url.replace("/details/", "/download/")),
        });
    }
    candidates
}

impl SourceClient {
    /// Fetch a PDF into memory.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::InvalidPdf`] if the body is below the
    /// configured minimum size, plus any transport or status error.
    pub async fn download_pdf(&self, url: &str) -> Result<Vec<u8>, SourceError> {
        let resp = check_response(DOWNLOAD, self.http.get(url).send().await?).await?;
        let bytes = resp.bytes().await?;
        let size = bytes.len() as u64;
        if size < self.download.min_pdf_bytes {
            return Err(SourceError::InvalidPdf { size });
        }
        tracing::debug!(url, size, "pdf downloaded");
        Ok(bytes.to_vec())
    }

    /// Fetch a PDF and write it to `dest`, creating parent directories.
    /// Returns the number of bytes written.
    ///
    /// # Errors
    ///
    /// As [`Self::download_pdf`], plus [`SourceError::Io`] on write failure.
    pub async fn download_pdf_to(&self, url: &str, dest: &Path) -> Result<u64, SourceError> {
        let bytes = self.download_pdf(url).await?;
        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(dest, &bytes).await?;
        Ok(bytes.len() as u64)
    }

    /// Try each candidate in order; the first valid PDF wins.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::AllSourcesFailed`] if no candidate produced a PDF.
    pub async fn download_first(
        &self,
        candidates: &[PdfCandidate],
    ) -> Result<(Vec<u8>, &'static str), SourceError> {
        for candidate in candidates {
            match self.download_pdf(&candidate.url).await {
                Ok(bytes) => return Ok((bytes, candidate.kind)),
                Err(error) => {
                    tracing::warn!(kind = candidate.kind, url = %candidate.url, %error, "download source failed");
                }
            }
        }
        Err(SourceError::AllSourcesFailed)
    }
}
