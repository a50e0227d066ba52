//! In-memory gateway (for development/testing).

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::gateway::{json_api_headers, DEFAULT_API_VERSION};
use crate::{FetchError, Headers, HttpGateway, RequestBuilder, Response};

/// Gateway that records every request instead of sending it.
///
/// Replies are taken from a queue; once it is empty every request is
/// answered with an empty `200 OK`.
#[derive(Debug, Default)]
pub struct RecordingGateway {
    requests: Mutex<Vec<RequestBuilder>>,
    replies: Mutex<VecDeque<Result<Response, FetchError>>>,
    api_version: Option<u32>,
    access_token: Option<String>,
}

impl RecordingGateway {
    /// Create an empty recording gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the reported API version.
    pub fn with_api_version(mut self, api_version: u32) -> Self {
        self.api_version = Some(api_version);
        self
    }

    /// Report a bearer token in the basic headers.
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Queue the reply for the next request.
    pub fn push_reply(&self, reply: Result<Response, FetchError>) {
        lock(&self.replies).push_back(reply);
    }

    /// All requests sent so far, oldest first.
    pub fn requests(&self) -> Vec<RequestBuilder> {
        lock(&self.requests).clone()
    }

    /// The most recent request.
    pub fn last_request(&self) -> Option<RequestBuilder> {
        lock(&self.requests).last().cloned()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl HttpGateway for RecordingGateway {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        lock(&self.requests).push(request);
        let reply = lock(&self.replies)
            .pop_front()
            .unwrap_or_else(|| Ok(Response::ok()));
        reply.and_then(Response::error_for_status)
    }

    fn basic_headers(&self, additional: &Headers) -> Headers {
        json_api_headers(self.access_token.as_deref(), additional)
    }

    fn api_version(&self) -> u32 {
        self.api_version.unwrap_or(DEFAULT_API_VERSION)
    }
}
