//! Transport error types.

use thiserror::Error;

/// Errors raised while issuing a store API request.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request could not be sent.
    #[error("Request failed: {0}")]
    RequestError(String),

    /// The base URL and route did not form a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The store API answered with a non-2xx status.
    #[error("HTTP {status}: {message}")]
    HttpError { status: u16, message: String },

    /// The response body could not be decoded.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// The transport gave up waiting for the store API.
    #[error("Request timed out")]
    Timeout,

    /// A request body could not be serialized.
    #[error("JSON error: {0}")]
    JsonError(String),
}

impl FetchError {
    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::JsonError(e.to_string())
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_builder() {
            FetchError::InvalidUrl(e.to_string())
        } else if e.is_decode() {
            FetchError::ParseError(e.to_string())
        } else {
            FetchError::RequestError(e.to_string())
        }
    }
}
