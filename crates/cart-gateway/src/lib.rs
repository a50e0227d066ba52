//! Store API cart gateway.
//!
//! Turns administration cart edits into requests against the proxied store
//! API:
//!
//! - **Cart**: line items, the static type tables, payload construction
//! - **Service**: [`CartStoreService`], one request per operation
//! - **Config**: where to send requests and which feature flags are active
//!
//! # Example
//!
//! ```rust,ignore
//! use cart_gateway::prelude::*;
//!
//! let config = GatewayConfig::load("cart-gateway.toml")?.with_env_overrides();
//! let service = CartStoreService::from_config(&config)?;
//!
//! let sales_channel = SalesChannelId::new("98432def39fc4624b33213a56b8c944d");
//! let cart = service
//!     .create_cart(&sales_channel, Params::new(), Headers::new())
//!     .await?;
//! let token = ContextToken::new(cart.context_token().unwrap_or_default());
//!
//! // Reprice an existing custom item; the edited unit price makes the
//! // gateway resend its price definition.
//! let item = existing_item.with_unit_price(12.5);
//! service
//!     .save_line_item(&sales_channel, &token, &item, Params::new(), Headers::new())
//!     .await?;
//! ```

pub mod cart;
pub mod config;
pub mod error;
pub mod feature;
pub mod ids;
pub mod routes;
pub mod service;

pub use cart_http::{Headers, Params, Response};
pub use config::GatewayConfig;
pub use error::GatewayError;
pub use ids::{ContextToken, IdGenerator, SalesChannelId, UuidGenerator};
pub use service::CartStoreService;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::cart::{
        CalculatedPrice, LineItem, LineItemPriceType, LineItemType, PriceDefinition,
        ShippingCosts, TaxRule,
    };
    pub use crate::config::GatewayConfig;
    pub use crate::error::GatewayError;
    pub use crate::feature::{FeatureFlags, StaticFeatureFlags};
    pub use crate::ids::{ContextToken, IdGenerator, SalesChannelId};
    pub use crate::service::CartStoreService;
    pub use cart_http::{Headers, HttpGateway, Params, Response};
}
