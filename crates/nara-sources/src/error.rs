//! Source client error types.

use thiserror::Error;

/// Errors from talking to an external source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// HTTP transport error (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("{service} returned HTTP {status}: {message}")]
    Api {
        service: &'static str,
        status: u16,
        /// Message pulled from the error body, or the status reason.
        message: String,
    },

    /// The service answered 429 Too Many Requests.
    #[error("{service} rate limit hit (HTTP 429)")]
    RateLimited { service: &'static str },

    /// A response could not be interpreted.
    #[error("parse error: {0}")]
    Parse(String),

    /// The requested resource does not exist or carries no usable file.
    #[error("not found: {0}")]
    NotFound(String),

    /// Downloaded body is too small to be a real PDF.
    #[error("Downloaded file too small ({size} bytes), not a valid PDF")]
    InvalidPdf {
        /// Body size in bytes.
        size: u64,
    },

    /// Every candidate download location failed.
    #[error("All download sources failed")]
    AllSourcesFailed,

    /// Local file I/O while saving a download.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Classifies an error as worth retrying or terminal.
pub trait Retryable {
    fn is_retryable(&self) -> bool;
}

impl Retryable for SourceError {
    /// 429, 5xx, and transport failures are transient. Everything else is not.
    fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimited { .. } => true,
            Self::Api { status, .. } => *status == 429 || (500..600).contains(status),
            Self::Http(err) => err
                .status()
                .is_none_or(|status| status.as_u16() == 429 || status.is_server_error()),
            Self::Parse(_)
            | Self::NotFound(_)
            | Self::InvalidPdf { .. }
            | Self::AllSourcesFailed
            | Self::Io(_) => false,
        }
    }
}

impl SourceError {
    #[must_use]
    pub const fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }
}
