//! Response status checks shared by the CORE, Internet Archive, download,
//! and Gemini clients.
//!
//! Non-success responses become [`SourceError`] values tagged with the
//! service name. Error bodies are reduced to one readable message: Gemini
//! wraps it in `{"error": {"message": ..}}`, CORE answers `{"message": ..}`,
//! and archive mirrors send whole HTML pages.

use serde_json::Value;

use crate::error::SourceError;

pub const CORE: &str = "CORE";
pub const ARCHIVE: &str = "Internet Archive";
pub const DOWNLOAD: &str = "PDF source";
pub const GEMINI: &str = "Gemini";

/// Longest error message kept from a response body.
const MAX_MESSAGE_CHARS: usize = 300;

/// Pass a successful response through; turn anything else into an error.
///
/// # Errors
///
/// [`SourceError::RateLimited`] for 429, [`SourceError::Api`] for every
/// other non-success status.
pub async fn check_response(
    service: &'static str,
    resp: reqwest::Response,
) -> Result<reqwest::Response, SourceError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(SourceError::RateLimited { service });
    }
    let body = resp.text().await.unwrap_or_default();
    let message = error_message(&body)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("no response body").to_string());
    Err(SourceError::Api {
        service,
        status: status.as_u16(),
        message,
    })
}

/// One-line message from an error body, if it has any text.
fn error_message(body: &str) -> Option<String> {
    let from_json = serde_json::from_str::<Value>(body).ok().and_then(|json| {
        json.pointer("/error/message")
            .or_else(|| json.get("message"))
            .or_else(|| json.get("error"))
            .and_then(Value::as_str)
            .map(str::to_owned)
    });
    let text = from_json.unwrap_or_else(|| {
        body.lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .unwrap_or_default()
            .to_owned()
    });
    if text.is_empty() {
        return None;
    }
    Some(text.chars().take(MAX_MESSAGE_CHARS).collect())
}
