//! CORE (core.ac.uk) v3 search client.
//!
//! `GET {api_url}/search/works?q=..&limit=..&sort=datePublished:desc` with a
//! bearer key. Without a key CORE still answers, under much tighter limits.

use chrono::{Datelike, Utc};
use nara_core::entities::{WorkMetadata, keyword_text};
use serde::Deserialize;

use crate::{SourceClient, error::SourceError, http::{CORE, check_response}};

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<CoreWork>,
}

/// One work from a CORE search result.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoreWork {
    pub id: serde_json::Value,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub authors: Vec<CoreAuthor>,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default)]
    pub year_published: Option<i32>,
    #[serde(default, rename = "abstract")]
    pub abstract_text: Option<String>,
    #[serde(default)]
    pub language: Option<CoreLanguage>,
    #[serde(default)]
    pub topics: Vec<serde_json::Value>,
    #[serde(default)]
    pub doi: Option<String>,
    #[serde(default)]
    pub download_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CoreAuthor {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CoreLanguage {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl CoreWork {
    /// CORE ids are numeric, but anything scalar is accepted.
    #[must_use]
    pub fn source_id(&self) -> String {
        match &self.id {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    /// Map to queue metadata, filling the gaps CORE leaves.
    #[must_use]
    pub fn to_metadata(&self) -> WorkMetadata {
        WorkMetadata {
            title: self
                .title
                .clone()
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| "Untitled".into()),
            author: self
                .authors
                .first()
                .and_then(|a| a.name.clone())
                .unwrap_or_else(|| "Unknown Author".into()),
            publisher: self.publisher.clone().unwrap_or_else(|| "CORE".into()),
            publication_year: self.year_published.unwrap_or_else(|| Utc::now().year()),
            abstract_text: self.abstract_text.clone().unwrap_or_default(),
            language: self
                .language
                .as_ref()
                .and_then(|l| l.code.clone())
                .unwrap_or_else(|| "English".into()),
            keywords: self
                .topics
                .iter()
                .filter_map(keyword_text)
                .collect(),
            doi: self.doi.clone(),
            source_url: self.download_url.clone(),
        }
    }
}

impl SourceClient {
    /// Run one CORE search. A single attempt; wrap in
    /// [`crate::RetryPolicy::run`] for backoff.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the request fails, CORE answers with a
    /// non-success status, or the body is not a search response.
    pub async fn search_core(&self, query: &str) -> Result<Vec<CoreWork>, SourceError> {
        let url = format!(
            "{}/search/works?q={}&limit={}&sort=datePublished:desc",
            self.core.api_url.trim_end_matches('/'),
            urlencoding::encode(query),
            self.core.limit,
        );
        let resp = self
            .http
            .get(&url)
            .bearer_auth(&self.core.api_key)
            .timeout(self.core.timeout())
            .send()
            .await?;
        let resp = check_response(CORE, resp).await?;
        let body = resp.text().await?;
        let data: SearchResponse =
            serde_json::from_str(&body).map_err(|e| SourceError::Parse(e.to_string()))?;
        tracing::debug!(query, results = data.results.len(), "core search");
        Ok(data.results)
    }

    /// [`Self::search_core`] with exponential backoff on 429/5xx/transport errors.
    ///
    /// # Errors
    ///
    /// Returns the last error once retries are exhausted, or the first
    /// terminal error.
    pub async fn search_core_with_retry(&self, query: &str) -> Result<Vec<CoreWork>, SourceError> {
        self.core_retry_policy()
            .run("core search", || self.search_core(query))
            .await
    }
}
