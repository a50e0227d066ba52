//! `reqwest`-backed transport.

use std::time::Duration;

use async_trait::async_trait;

use crate::gateway::{json_api_headers, DEFAULT_API_VERSION};
use crate::{FetchError, Headers, HttpGateway, Method, RequestBuilder, Response};

/// HTTP client for the administration proxy.
///
/// Routes handed to [`HttpGateway::send`] are joined onto `base_url`;
/// absolute `http(s)://` routes are used as-is.
#[derive(Debug, Clone)]
pub struct FetchClient {
    client: reqwest::Client,
    base_url: String,
    api_version: u32,
    access_token: Option<String>,
    default_headers: Headers,
}

impl FetchClient {
    /// Create a client for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_version: DEFAULT_API_VERSION,
            access_token: None,
            default_headers: Headers::new(),
        }
    }

    /// Set the store API version.
    pub fn with_api_version(mut self, api_version: u32) -> Self {
        self.api_version = api_version;
        self
    }

    /// Set the bearer token used in the basic headers.
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Bound every request by `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, FetchError> {
        self.client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    /// Base URL requests are joined onto.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve a route against the base URL.
    pub fn url_for(&self, route: &str) -> String {
        if route.starts_with("http://") || route.starts_with("https://") {
            route.to_string()
        } else {
            format!(
                "{}/{}",
                self.base_url.trim_end_matches('/'),
                route.trim_start_matches('/')
            )
        }
    }
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
        Method::Head => reqwest::Method::HEAD,
        Method::Options => reqwest::Method::OPTIONS,
    }
}

#[async_trait]
impl HttpGateway for FetchClient {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        let url = self.url_for(&request.route);
        tracing::debug!(method = %request.method, url = %url, "sending store api request");

        let mut headers = self.default_headers.clone();
        headers.extend(request.headers);

        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), &url)
            .query(&request.query);
        for (key, value) in headers {
            builder = builder.header(key, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;

        let status = response.status().as_u16();
        let headers: Headers = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();
        let body = response.bytes().await?.to_vec();

        tracing::debug!(status, url = %url, "store api responded");
        Response::new(status, headers, body).error_for_status()
    }

    fn basic_headers(&self, additional: &Headers) -> Headers {
        json_api_headers(self.access_token.as_deref(), additional)
    }

    fn api_version(&self) -> u32 {
        self.api_version
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for_joins_relative_routes() {
        let client = FetchClient::new("https://shop.example/api/");
        assert_eq!(
            client.url_for("_proxy/modify-shipping-costs"),
            "https://shop.example/api/_proxy/modify-shipping-costs"
        );
        assert_eq!(
            client.url_for("/_proxy/enable-automatic-promotions"),
            "https://shop.example/api/_proxy/enable-automatic-promotions"
        );
    }

    #[test]
    fn test_url_for_keeps_absolute_routes() {
        let client = FetchClient::new("https://shop.example/api");
        assert_eq!(
            client.url_for("https://other.example/cart"),
            "https://other.example/cart"
        );
    }

    #[test]
    fn test_basic_headers_carry_access_token() {
        let client = FetchClient::new("https://shop.example/api").with_access_token("t0k3n");
        let headers = client.basic_headers(&Headers::new());
        assert_eq!(
            headers.get("Authorization").map(String::as_str),
            Some("Bearer t0k3n")
        );
    }

    #[test]
    fn test_api_version_defaults() {
        let client = FetchClient::new("https://shop.example/api");
        assert_eq!(client.api_version(), DEFAULT_API_VERSION);
        assert_eq!(client.with_api_version(2).api_version(), 2);
    }
}
