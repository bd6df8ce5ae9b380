//! Translate uploaded PDFs into Tamil and Sinhala.
//!
//! The original PDF is fetched from the bucket, its text extracted and cut
//! to the configured length, then sent through Gemini once per language.
//! Each translation is stored as a plain-text document next to the other
//! files for that language.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use nara_core::entities::{CatalogueItem, TranslationOutcome};
use nara_core::enums::Language;
use nara_core::naming::translation_path;
use nara_core::responses::RunSummary;
use nara_sources::SourceClient;
use nara_sources::gemini::truncate_chars;
use nara_store::BlobStore;

use super::open_catalogue;
use crate::context::JobContext;
use crate::error::PipelineError;
use crate::extract::{TextExtractor, extract_text};
use crate::runner::{BatchRunner, ItemOutcome, ItemProcessor};

pub const JOB: &str = "translate";

const RULE_WIDTH: usize = 80;

/// Wrap translated text in the library's header and footer.
#[must_use]
pub fn render_translation(title: &str, language: Language, text: &str, date: NaiveDate) -> String {
    let heavy = "=".repeat(RULE_WIDTH);
    let light = "-".repeat(RULE_WIDTH);
    format!(
        "{heavy}\n\
         Translated to {language} by NARA Digital Library\n\
         AI Translation using Google Gemini\n\
         {heavy}\n\n\
         Original Title: {title}\n\
         Translated: {date}\n\
         \n{light}\n\n\
         {text}\
         \n\n{heavy}\n\
         End of Translation\n\
         {heavy}\n",
        language = language.name(),
        date = date.format("%Y-%m-%d"),
    )
}

pub struct Translator<'a> {
    sources: &'a SourceClient,
    blobs: &'a BlobStore,
    extractor: Arc<dyn TextExtractor>,
    max_chars: usize,
}

impl<'a> Translator<'a> {
    pub fn new(
        sources: &'a SourceClient,
        blobs: &'a BlobStore,
        extractor: Arc<dyn TextExtractor>,
        max_chars: usize,
    ) -> Self {
        Self {
            sources,
            blobs,
            extractor,
            max_chars,
        }
    }

    async fn translate_one(
        &self,
        item: &CatalogueItem,
        text: &str,
        language: Language,
    ) -> Result<TranslationOutcome, PipelineError> {
        let path = translation_path(item, language)
            .ok_or_else(|| PipelineError::MissingField("item has no firebase_path".into()))?;
        let translated = self.sources.translate_text(text, language).await?;
        let now = Utc::now();
        let document = render_translation(&item.title, language, &translated, now.date_naive());
        let url = self.blobs.put_text(&path, document).await?;
        Ok(TranslationOutcome::Completed {
            url,
            firebase_path: path,
            translated_at: now,
        })
    }
}

impl ItemProcessor<CatalogueItem> for Translator<'_> {
    fn needs_work(&self, item: &CatalogueItem) -> bool {
        item.needs_translation()
    }

    fn label(&self, item: &CatalogueItem) -> String {
        item.short_title(60)
    }

    async fn process(&self, item: &mut CatalogueItem) -> Result<ItemOutcome, PipelineError> {
        let original = item
            .firebase_path
            .clone()
            .ok_or_else(|| PipelineError::MissingField("item has no firebase_path".into()))?;
        let pdf = self.blobs.get(&original).await?;
        let full = extract_text(Arc::clone(&self.extractor), pdf).await?;
        let text = truncate_chars(&full, self.max_chars);
        if text.len() < full.len() {
            tracing::info!(max_chars = self.max_chars, "text truncated for translation");
        }

        let mut outcomes = BTreeMap::new();
        for language in Language::ALL {
            let outcome = match self.translate_one(item, text, language).await {
                Ok(outcome) => outcome,
                Err(error) => {
                    tracing::warn!(language = language.key(), %error, "translation failed");
                    TranslationOutcome::Failed {
                        error: error.to_string(),
                    }
                }
            };
            outcomes.insert(language, outcome);
        }

        let available = item.record_translations(outcomes);
        if available.is_empty() {
            Ok(ItemOutcome::Failed("no language translated".into()))
        } else {
            item.translation_error = None;
            Ok(ItemOutcome::Done)
        }
    }

    fn record_failure(&self, item: &mut CatalogueItem, error: &PipelineError, _at: DateTime<Utc>) {
        item.mark_translation_failed(error.to_string());
    }
}

/// Translate up to `limit` uploaded items; `None` uses the configured default.
///
/// # Errors
///
/// Fails if Gemini is not configured, or the catalogue cannot be loaded,
/// backed up, or checkpointed.
pub async fn run(ctx: &JobContext, limit: Option<usize>) -> Result<RunSummary, PipelineError> {
    let gemini = ctx.config.require_gemini()?;
    let (mut file, mut items) = open_catalogue(ctx, "translate")?;
    let processor = Translator::new(
        &ctx.sources,
        &ctx.blobs,
        Arc::clone(&ctx.extractor),
        gemini.max_chars,
    );
    let limit = limit.unwrap_or(ctx.config.pacing.translate_limit);
    BatchRunner::new(JOB, ctx.config.pacing.translate)
        .with_limit(Some(limit))
        .run(&mut items, &processor, &mut file, ctx.observer.as_ref())
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_has_header_and_footer() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        let doc = render_translation("Coastal erosion", Language::Tamil, "உரை", date);

        let lines: Vec<&str> = doc.lines().collect();
        assert_eq!(lines[0], "=".repeat(80));
        assert_eq!(lines[1], "Translated to Tamil by NARA Digital Library");
        assert_eq!(lines[2], "AI Translation using Google Gemini");
        assert!(doc.contains("Original Title: Coastal erosion\nTranslated: 2026-03-14\n"));
        assert!(doc.contains(&format!("{}\n\nஉரை\n\n", "-".repeat(80))));
        assert!(doc.ends_with(&format!("End of Translation\n{}\n", "=".repeat(80))));
    }
}
