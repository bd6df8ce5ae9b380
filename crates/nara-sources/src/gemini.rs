//! Google Gemini translation client.
//!
//! Text is split on blank lines into chunks below the configured size, each
//! chunk is sent with a fixed academic-translation prompt, and the outputs
//! are joined with a blank line. Chunks go out one at a time with a pause
//! between them to stay under the free-tier request rate.

use nara_core::enums::Language;
use serde::{Deserialize, Serialize};

use crate::{SourceClient, error::SourceError, http::{GEMINI, check_response}};

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GenerateResponse {
    fn text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().map(|p| p.text).collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

/// The first `max_chars` characters of `text`.
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Split `text` on blank lines into chunks shorter than `max_chars`.
///
/// Paragraphs are packed greedily. A single paragraph that is too long on
/// its own is cut into `max_chars - 1` character pieces.
#[must_use]
pub fn split_into_chunks(text: &str, max_chars: usize) -> Vec<String> {
    let limit = max_chars.max(2) - 1;
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    let mut flush = |current: &mut String, current_len: &mut usize| {
        let trimmed = current.trim();
        if !trimmed.is_empty() {
            chunks.push(trimmed.to_string());
        }
        current.clear();
        *current_len = 0;
    };

    for paragraph in text.split("\n\n") {
        let para_len = paragraph.chars().count();
        if current_len + para_len < max_chars {
            current.push_str(paragraph);
            current.push_str("\n\n");
            current_len += para_len + 2;
            continue;
        }
        flush(&mut current, &mut current_len);
        if para_len < max_chars {
            current.push_str(paragraph);
            current.push_str("\n\n");
            current_len = para_len + 2;
        } else {
            let chars: Vec<char> = paragraph.chars().collect();
            for piece in chars.chunks(limit) {
                current.extend(piece);
                flush(&mut current, &mut current_len);
            }
        }
    }
    flush(&mut current, &mut current_len);
    chunks
}

/// Translation prompt for one chunk.
#[must_use]
pub fn translation_prompt(chunk: &str, language: Language) -> String {
    let name = language.name();
    let code = language.code();
    format!(
        "You are a professional translator specializing in academic and scientific texts.

Task: Translate the following English text to {name} ({code}).

Important instructions:
1. Maintain the academic and formal tone
2. Preserve technical terms accuracy
3. Keep paragraph structure
4. Translate naturally, not word-for-word
5. Do not add any explanations or notes
6. Only output the translated text

English text to translate:
{chunk}

{name} translation:"
    )
}

impl SourceClient {
    /// One `generateContent` call.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Parse`] if the response carries no text, plus
    /// any transport or status error.
    pub async fn generate_content(&self, prompt: &str) -> Result<String, SourceError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.gemini.base_url.trim_end_matches('/'),
            self.gemini.model,
            urlencoding::encode(&self.gemini.api_key),
        );
        let body = GenerateRequest {
            contents: [Content {
                parts: [Part { text: prompt }],
            }],
        };
        let request = self.http.post(&url).json(&body).send().await?;
        let resp = check_response(GEMINI, request).await?;
        let raw = resp.text().await?;
        let data: GenerateResponse =
            serde_json::from_str(&raw).map_err(|e| SourceError::Parse(e.to_string()))?;
        data.text()
            .ok_or_else(|| SourceError::Parse("Gemini response contained no text".into()))
    }

    /// Translate English `text` into `language`, chunk by chunk.
    ///
    /// # Errors
    ///
    /// Fails on the first chunk that fails; partial output is discarded.
    pub async fn translate_text(&self, text: &str, language: Language) -> Result<String, SourceError> {
        let chunks = split_into_chunks(text, self.gemini.chunk_chars);
        let mut translated = Vec::with_capacity(chunks.len());
        for (i, chunk) in chunks.iter().enumerate() {
            tracing::debug!(
                language = language.key(),
                chunk = i + 1,
                chunks = chunks.len(),
                "translating chunk"
            );
            let output = self
                .generate_content(&translation_prompt(chunk, language))
                .await?;
            translated.push(output.trim().to_string());
            if i + 1 < chunks.len() {
                tokio::time::sleep(self.gemini.chunk_delay()).await;
            }
        }
        Ok(translated.join("\n\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn short_text_is_one_chunk() {
        let chunks = split_into_chunks("First paragraph.\n\nSecond paragraph.", 8000);
        assert_eq!(chunks, vec!["First paragraph.\n\nSecond paragraph."]);
    }

    #[test]
    fn paragraphs_are_packed_below_limit() {
        let para = "a".repeat(40);
        let text = [para.as_str(); 5].join("\n\n");
        let chunks = split_into_chunks(&text, 100);
        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c.chars().count() < 100));
        assert_eq!(chunks[0], format!("{para}\n\n{para}"));
    }

    #[test]
    fn oversized_paragraph_is_cut() {
        let text = "b".repeat(250);
        let chunks = split_into_chunks(&text, 100);
        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c.chars().count() < 100));
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn empty_text_has_no_chunks() {
        assert!(split_into_chunks("", 8000).is_empty());
        assert!(split_into_chunks("\n\n\n\n", 8000).is_empty());
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(truncate_chars("මුහුදු", 3), "මුහ");
        assert_eq!(truncate_chars("short", 10), "short");
    }

    #[test]
    fn prompt_names_language() {
        let prompt = translation_prompt("Sea cucumber harvest", Language::Tamil);
        assert!(prompt.contains("to Tamil (ta)"));
        assert!(prompt.ends_with("Tamil translation:"));
        assert!(prompt.contains("Sea cucumber harvest"));
    }

    #[test]
    fn response_text_is_extracted() {
        let data: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"வணக்கம்"}],"role":"model"}}]}"#,
        )
        .unwrap();
        assert_eq!(data.text().as_deref(), Some("வணக்கம்"));

        let empty: GenerateResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert!(empty.text().is_none());
    }
}
