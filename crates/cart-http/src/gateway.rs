//! The transport capability consumed by cart services.

use async_trait::async_trait;

use crate::{FetchError, Headers, Method, RequestBuilder, RequestOptions, Response};

/// Store API version used when nothing else is configured.
pub const DEFAULT_API_VERSION: u32 = 3;

/// Object-safe HTTP boundary shared by every API service.
///
/// Implementors only have to ship a request and describe their auth headers;
/// the verb helpers are provided on top of [`HttpGateway::send`].
#[async_trait]
pub trait HttpGateway: Send + Sync {
    /// Issue a request. Non-2xx answers must surface as
    /// [`FetchError::HttpError`].
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError>;

    /// Base authentication headers merged with `additional`.
    /// Entries in `additional` win on conflict.
    fn basic_headers(&self, additional: &Headers) -> Headers;

    /// Store API version segment used in routes (`v{version}`).
    fn api_version(&self) -> u32;

    /// Issue a GET request.
    async fn get(&self, route: &str, options: RequestOptions) -> Result<Response, FetchError> {
        self.send(options.into_request(Method::Get, route)?).await
    }

    /// Issue a POST request.
    async fn post(&self, route: &str, options: RequestOptions) -> Result<Response, FetchError> {
        self.send(options.into_request(Method::Post, route)?).await
    }

    /// Issue a PATCH request.
    async fn patch(&self, route: &str, options: RequestOptions) -> Result<Response, FetchError> {
        self.send(options.into_request(Method::Patch, route)?).await
    }

    /// Issue a DELETE request. A body in `options` is sent along.
    async fn delete(&self, route: &str, options: RequestOptions) -> Result<Response, FetchError> {
        self.send(options.into_request(Method::Delete, route)?).await
    }
}

/// Standard JSON API headers, plus a bearer token when one is known.
pub fn json_api_headers(access_token: Option<&str>, additional: &Headers) -> Headers {
    let mut headers = Headers::new();
    headers.insert("Accept".to_string(), "application/json".to_string());
    headers.insert("Content-Type".to_string(), "application/json".to_string());
    if let Some(token) = access_token {
        headers.insert("Authorization".to_string(), format!("Bearer {}", token));
    }
    headers.extend(additional.iter().map(|(k, v)| (k.clone(), v.clone())));
    headers
}
