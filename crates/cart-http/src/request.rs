//! Request construction.

use crate::FetchError;
use serde::Serialize;
use std::collections::HashMap;

/// Header map sent with a request. Keys are compared case-sensitively here;
/// the wire treats them case-insensitively.
pub type Headers = HashMap<String, String>;

/// Query parameters appended to a route.
pub type Params = HashMap<String, String>;

/// HTTP methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl Method {
    /// Convert to HTTP method string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully described request, ready to hand to an [`HttpGateway`](crate::HttpGateway).
///
/// `route` is relative to the gateway's base URL (e.g.
/// `_proxy/store-api/{id}/v3/checkout/cart`).
#[derive(Debug, Clone, PartialEq)]
pub struct RequestBuilder {
    pub method: Method,
    pub route: String,
    pub headers: Headers,
    /// Query pairs, kept sorted by key so requests render deterministically.
    pub query: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(method: Method, route: impl Into<String>) -> Self {
        Self {
            method,
            route: route.into(),
            headers: HashMap::new(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Add multiple headers to the request.
    pub fn headers(mut self, headers: impl IntoIterator<Item = (String, String)>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Append query parameters.
    pub fn query(mut self, params: impl IntoIterator<Item = (String, String)>) -> Self {
        self.query.extend(params);
        self.query.sort_by(|a, b| a.0.cmp(&b.0));
        self
    }

    /// Set the request body as raw bytes.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self, FetchError> {
        let json = serde_json::to_vec(value)?;
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        self.body = Some(json);
        Ok(self)
    }

    /// Add a bearer token authorization header.
    pub fn bearer_auth(self, token: impl AsRef<str>) -> Self {
        self.header("Authorization", format!("Bearer {}", token.as_ref()))
    }

    /// Look up a header value, ignoring ASCII case.
    pub fn header_value(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Decode the body back into JSON. `None` when the request has no body.
    pub fn json_body(&self) -> Option<Result<serde_json::Value, FetchError>> {
        self.body
            .as_deref()
            .map(|bytes| serde_json::from_slice(bytes).map_err(FetchError::from))
    }
}

/// Per-call options passed to the gateway verbs.
///
/// Mirrors what callers hand over for every cart operation: extra query
/// parameters, the already-merged header set, and an optional JSON body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub params: Params,
    pub headers: Headers,
    pub body: Option<serde_json::Value>,
}

impl RequestOptions {
    /// Create empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the query parameters.
    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    /// Set the headers.
    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    /// Serialize `value` as the JSON body.
    pub fn with_json<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self, FetchError> {
        self.body = Some(serde_json::to_value(value)?);
        Ok(self)
    }

    /// Turn the options into a request for `method` on `route`.
    pub fn into_request(self, method: Method, route: &str) -> Result<RequestBuilder, FetchError> {
        let request = RequestBuilder::new(method, route)
            .headers(self.headers)
            .query(self.params);

        match self.body {
            Some(body) => request.json(&body),
            None => Ok(request),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_body_sets_content_type() {
        let request = RequestBuilder::new(Method::Post, "_proxy/modify-shipping-costs")
            .json(&json!({"salesChannelId": "sc"}))
            .unwrap();

        assert_eq!(request.header_value("content-type"), Some("application/json"));
        assert_eq!(
            request.json_body().unwrap().unwrap(),
            json!({"salesChannelId": "sc"})
        );
    }

    #[test]
    fn test_query_is_sorted() {
        let request = RequestBuilder::new(Method::Get, "cart").query(vec![
            ("b".to_string(), "2".to_string()),
            ("a".to_string(), "1".to_string()),
        ]);

        assert_eq!(request.query[0].0, "a");
        assert_eq!(request.query[1].0, "b");
    }

    #[test]
    fn test_bearer_auth() {
        let request = RequestBuilder::new(Method::Get, "cart").bearer_auth("abc");
        assert_eq!(request.header_value("Authorization"), Some("Bearer abc"));
    }

    #[test]
    fn test_options_without_body() {
        let mut params = Params::new();
        params.insert("source".to_string(), "admin".to_string());

        let request = RequestOptions::new()
            .with_params(params)
            .into_request(Method::Delete, "cart")
            .unwrap();

        assert_eq!(request.method, Method::Delete);
        assert!(request.body.is_none());
        assert_eq!(request.query, vec![("source".to_string(), "admin".to_string())]);
    }

    #[test]
    fn test_options_with_empty_object_body() {
        let request = RequestOptions::new()
            .with_json(&json!({}))
            .unwrap()
            .into_request(Method::Patch, "_proxy/enable-automatic-promotions")
            .unwrap();

        assert_eq!(request.body.as_deref(), Some(&b"{}"[..]));
    }
}
