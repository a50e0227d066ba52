//! Store API responses.

use crate::{FetchError, Headers};
use serde::de::DeserializeOwned;

/// Header carrying the cart session token, both on requests and responses.
pub const CONTEXT_TOKEN_HEADER: &str = "sw-context-token";

/// A response from the store API.
///
/// The body is kept raw; decoding is left to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// The HTTP status code.
    pub status: u16,
    /// The response headers.
    pub headers: Headers,
    /// The response body.
    pub body: Vec<u8>,
}

impl Response {
    /// Create a new response.
    pub fn new(status: u16, headers: Headers, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// An empty `200 OK`.
    pub fn ok() -> Self {
        Self::new(200, Headers::new(), Vec::new())
    }

    /// A response with a JSON body.
    pub fn with_json(status: u16, value: &serde_json::Value) -> Self {
        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self::new(status, headers, value.to_string().into_bytes())
    }

    /// Check if the response was successful (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get the response body as text.
    pub fn text(&self) -> Result<String, FetchError> {
        String::from_utf8(self.body.clone())
            .map_err(|e| FetchError::ParseError(format!("Invalid UTF-8: {}", e)))
    }

    /// Parse the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_slice(&self.body).map_err(|e| FetchError::ParseError(e.to_string()))
    }

    /// Get a header value, ignoring ASCII case.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// The context token the store API handed back, if any.
    ///
    /// A freshly created cart announces its session token this way.
    pub fn context_token(&self) -> Option<&str> {
        self.header(CONTEXT_TOKEN_HEADER)
    }

    /// Convert to a Result, returning an error for non-2xx status codes.
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            Ok(self)
        } else {
            let message = self.text().unwrap_or_else(|_| "Unknown error".to_string());
            Err(FetchError::HttpError {
                status: self.status,
                message,
            })
        }
    }
}
