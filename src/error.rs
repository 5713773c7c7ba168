use std::io;

use thiserror::Error;

/// Failures talking to the list API. HTTP status codes are never mapped
/// into this type; callers receive the raw response instead.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The base URL (joined with the page origin, if any) is not an
    /// absolute URL.
    #[error("invalid base url {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store io error: {0}")]
    Io(#[from] io::Error),
    #[error("store file is not valid json: {0}")]
    Json(#[from] serde_json::Error),
}
