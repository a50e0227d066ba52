//! HTTP transport for the storefront cart gateway.
//!
//! Provides the [`HttpGateway`] capability that API services compose, a
//! `reqwest`-backed implementation for talking to the administration proxy,
//! and an in-memory [`RecordingGateway`] for tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use cart_http::{FetchClient, HttpGateway, RequestOptions};
//!
//! let client = FetchClient::new("https://shop.example/api")
//!     .with_access_token(token);
//!
//! let headers = client.basic_headers(&Default::default());
//! let response = client
//!     .get(
//!         "_proxy/store-api/0190a1b2/v3/checkout/cart",
//!         RequestOptions::new().with_headers(headers),
//!     )
//!     .await?;
//!
//! let cart: serde_json::Value = response.json()?;
//! ```

mod client;
mod error;
mod gateway;
mod mock;
mod request;
mod response;

pub use client::FetchClient;
pub use error::FetchError;
pub use gateway::{json_api_headers, HttpGateway, DEFAULT_API_VERSION};
pub use mock::RecordingGateway;
pub use request::{Headers, Method, Params, RequestBuilder, RequestOptions};
pub use response::{Response, CONTEXT_TOKEN_HEADER};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        FetchClient, FetchError, Headers, HttpGateway, Method, Params, RequestOptions, Response,
    };
}
