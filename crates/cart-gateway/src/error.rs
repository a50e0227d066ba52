//! Gateway error types.

use cart_http::FetchError;
use thiserror::Error;

/// Errors that can occur while issuing cart operations.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The transport failed or the store API rejected the request.
    /// Passed through unchanged.
    #[error(transparent)]
    Transport(#[from] FetchError),

    /// A line item lacks a field the payload needs.
    #[error("Malformed line item {id}: missing {field}")]
    MalformedLineItem { id: String, field: &'static str },

    /// A payload could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl GatewayError {
    /// HTTP status of a rejected request, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Transport(e) => e.status(),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(e: serde_json::Error) -> Self {
        GatewayError::Serialization(e.to_string())
    }
}
