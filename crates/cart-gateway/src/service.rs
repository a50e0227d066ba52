//! Cart operations against the store API.

use std::sync::Arc;

use cart_http::{
    FetchClient, Headers, HttpGateway, Method, Params, RequestOptions, Response,
    CONTEXT_TOKEN_HEADER,
};
use serde::Serialize;

use crate::cart::{
    build_line_item_payload, map_line_item_type_to_price_type, resolve_line_item_id, LineItem,
    LineItemPayload, LineItemPriceType, LineItemType, LineItemsPayload, PromotionItemPayload, ShippingCosts,
    LINE_ITEM_PRICE_TYPES, LINE_ITEM_TYPES,
};
use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::feature::{FeatureFlags, AUTOMATIC_PROMOTIONS_FLAG};
use crate::ids::{ContextToken, IdGenerator, SalesChannelId, UuidGenerator};
use crate::routes::{
    cart_route, line_item_route, DISABLE_AUTOMATIC_PROMOTIONS_ROUTE,
    ENABLE_AUTOMATIC_PROMOTIONS_ROUTE, MODIFY_SHIPPING_COSTS_ROUTE,
};

/// Request parameter the automatic-promotion toggles read the sales channel from.
pub const SALES_CHANNEL_ID_PARAM: &str = "salesChannelId";

#[derive(Serialize)]
struct RemoveLineItemsBody<'a> {
    ids: &'a [String],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ShippingCostsBody<'a> {
    sales_channel_id: &'a SalesChannelId,
    shipping_costs: &'a ShippingCosts,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AutomaticPromotionsBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    sales_channel_id: Option<&'a str>,
}

/// Attaches a JSON body, failing locally with [`GatewayError::Serialization`].
trait JsonBody: Sized {
    fn json_body<T: Serialize + ?Sized>(self, body: &T) -> Result<Self, GatewayError>;
}

impl JsonBody for RequestOptions {
    fn json_body<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, GatewayError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }
}

/// Translates cart operations into store API requests.
///
/// Holds no per-cart state: every call builds its payload, issues exactly
/// one request through the gateway and hands the response back. Transport
/// failures are returned unchanged as [`GatewayError::Transport`].
pub struct CartStoreService<G: HttpGateway> {
    gateway: Arc<G>,
    feature_flags: Arc<dyn FeatureFlags>,
    ids: Arc<dyn IdGenerator>,
    automatic_promotions_flag: String,
}

impl CartStoreService<FetchClient> {
    /// Build a service talking to the store API described by `config`.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let gateway = Arc::new(config.fetch_client()?);
        let flags = Arc::new(config.feature_flags());
        Ok(Self::new(gateway, flags)
            .with_automatic_promotions_flag(config.automatic_promotions_flag.clone()))
    }
}

impl<G: HttpGateway> CartStoreService<G> {
    /// Create a service over `gateway`, generating missing ids as UUIDs.
    pub fn new(gateway: Arc<G>, feature_flags: Arc<dyn FeatureFlags>) -> Self {
        Self {
            gateway,
            feature_flags,
            ids: Arc::new(UuidGenerator),
            automatic_promotions_flag: AUTOMATIC_PROMOTIONS_FLAG.to_string(),
        }
    }

    /// Replace the id generator.
    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    /// Replace the flag gating the sales channel id on promotion toggles.
    pub fn with_automatic_promotions_flag(mut self, flag: impl Into<String>) -> Self {
        self.automatic_promotions_flag = flag.into();
        self
    }

    /// The underlying transport.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// All line item types.
    pub fn line_item_types() -> &'static [LineItemType] {
        LINE_ITEM_TYPES
    }

    /// All price definition types.
    pub fn line_item_price_types() -> &'static [LineItemPriceType] {
        LINE_ITEM_PRICE_TYPES
    }

    /// Price type for `item_type`; `None` for promotions.
    pub fn map_line_item_type_to_price_type(item_type: LineItemType) -> Option<LineItemPriceType> {
        map_line_item_type_to_price_type(item_type)
    }

    /// Cart route for `sales_channel_id` at the gateway's API version.
    pub fn cart_route(&self, sales_channel_id: &SalesChannelId) -> String {
        cart_route(sales_channel_id, self.gateway.api_version())
    }

    /// Line-item route for `sales_channel_id` at the gateway's API version.
    pub fn line_item_route(&self, sales_channel_id: &SalesChannelId) -> String {
        line_item_route(sales_channel_id, self.gateway.api_version())
    }

    /// Payload `save_line_item` would send for `item`.
    pub fn build_line_item_payload(
        &self,
        sales_channel_id: &SalesChannelId,
        item: &LineItem,
    ) -> Result<LineItemsPayload<LineItemPayload>, GatewayError> {
        let id = resolve_line_item_id(item, self.ids.as_ref());
        Ok(LineItemsPayload::single(build_line_item_payload(
            sales_channel_id,
            item,
            id,
        )?))
    }

    /// Fetch (or open) a cart for the sales channel without a session.
    pub async fn create_cart(
        &self,
        sales_channel_id: &SalesChannelId,
        params: Params,
        headers: Headers,
    ) -> Result<Response, GatewayError> {
        let route = self.cart_route(sales_channel_id);
        let options = RequestOptions::new()
            .with_params(params)
            .with_headers(self.gateway.basic_headers(&headers));
        self.send(Method::Get, &route, options).await
    }

    /// Fetch the cart bound to `context_token`.
    pub async fn get_cart(
        &self,
        sales_channel_id: &SalesChannelId,
        context_token: &ContextToken,
        params: Params,
        headers: Headers,
    ) -> Result<Response, GatewayError> {
        let route = self.cart_route(sales_channel_id);
        let options = self.session_options(context_token, params, &headers);
        self.send(Method::Get, &route, options).await
    }

    /// Discard the cart bound to `context_token`.
    pub async fn cancel_cart(
        &self,
        sales_channel_id: &SalesChannelId,
        context_token: &ContextToken,
        params: Params,
        headers: Headers,
    ) -> Result<Response, GatewayError> {
        let route = self.cart_route(sales_channel_id);
        let options = self.session_options(context_token, params, &headers);
        self.send(Method::Delete, &route, options).await
    }

    /// Remove the line items with the given ids.
    pub async fn remove_line_items(
        &self,
        sales_channel_id: &SalesChannelId,
        context_token: &ContextToken,
        line_item_keys: &[String],
        params: Params,
        headers: Headers,
    ) -> Result<Response, GatewayError> {
        let route = self.line_item_route(sales_channel_id);
        let options = self
            .session_options(context_token, params, &headers)
            .json_body(&RemoveLineItemsBody {
                ids: line_item_keys,
            })?;
        self.send(Method::Delete, &route, options).await
    }

    /// Create (`item.is_new`) or update a line item.
    ///
    /// The price definition is only resent when the item's unit price was
    /// edited; see [`crate::cart::price_definition_override`].
    pub async fn save_line_item(
        &self,
        sales_channel_id: &SalesChannelId,
        context_token: &ContextToken,
        item: &LineItem,
        params: Params,
        headers: Headers,
    ) -> Result<Response, GatewayError> {
        let payload = self.build_line_item_payload(sales_channel_id, item)?;
        let route = self.line_item_route(sales_channel_id);
        let options = self
            .session_options(context_token, params, &headers)
            .json_body(&payload)?;

        let method = if item.is_new {
            Method::Post
        } else {
            Method::Patch
        };
        self.send(method, &route, options).await
    }

    /// Add several new line items in one request.
    pub async fn add_multiple_line_items(
        &self,
        sales_channel_id: &SalesChannelId,
        context_token: &ContextToken,
        items: &[LineItem],
        params: Params,
        headers: Headers,
    ) -> Result<Response, GatewayError> {
        let items = items
            .iter()
            .map(|item| {
                let id = resolve_line_item_id(item, self.ids.as_ref());
                build_line_item_payload(sales_channel_id, item, id)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let route = self.line_item_route(sales_channel_id);
        let options = self
            .session_options(context_token, params, &headers)
            .json_body(&LineItemsPayload { items })?;
        self.send(Method::Post, &route, options).await
    }

    /// Redeem a promotion code.
    pub async fn add_promotion_code(
        &self,
        sales_channel_id: &SalesChannelId,
        context_token: &ContextToken,
        code: &str,
        params: Params,
        headers: Headers,
    ) -> Result<Response, GatewayError> {
        let route = self.line_item_route(sales_channel_id);
        let options = self
            .session_options(context_token, params, &headers)
            .json_body(&LineItemsPayload::single(PromotionItemPayload::new(code)))?;
        self.send(Method::Post, &route, options).await
    }

    /// Force the cart's shipping costs.
    pub async fn modify_shipping_costs(
        &self,
        sales_channel_id: &SalesChannelId,
        context_token: &ContextToken,
        shipping_costs: &ShippingCosts,
        headers: Headers,
        params: Params,
    ) -> Result<Response, GatewayError> {
        let options = self
            .session_options(context_token, params, &headers)
            .json_body(&ShippingCostsBody {
                sales_channel_id,
                shipping_costs,
            })?;
        self.send(Method::Patch, MODIFY_SHIPPING_COSTS_ROUTE, options)
            .await
    }

    /// Stop the store API from applying automatic promotions to the cart.
    pub async fn disable_automatic_promotions(
        &self,
        context_token: &ContextToken,
        params: Params,
        headers: Headers,
    ) -> Result<Response, GatewayError> {
        self.toggle_automatic_promotions(
            DISABLE_AUTOMATIC_PROMOTIONS_ROUTE,
            context_token,
            params,
            headers,
        )
        .await
    }

    /// Let the store API apply automatic promotions again.
    pub async fn enable_automatic_promotions(
        &self,
        context_token: &ContextToken,
        params: Params,
        headers: Headers,
    ) -> Result<Response, GatewayError> {
        self.toggle_automatic_promotions(
            ENABLE_AUTOMATIC_PROMOTIONS_ROUTE,
            context_token,
            params,
            headers,
        )
        .await
    }

    async fn toggle_automatic_promotions(
        &self,
        route: &str,
        context_token: &ContextToken,
        mut params: Params,
        headers: Headers,
    ) -> Result<Response, GatewayError> {
        // The sales channel id never goes on the query string; it only
        // goes into the body behind the flag.
        let sales_channel_id = params
            .remove(SALES_CHANNEL_ID_PARAM)
            .filter(|_| self.feature_flags.is_active(&self.automatic_promotions_flag));

        let options = self
            .session_options(context_token, params, &headers)
            .json_body(&AutomaticPromotionsBody {
                sales_channel_id: sales_channel_id.as_deref(),
            })?;
        self.send(Method::Patch, route, options).await
    }

    /// Options for a request bound to an existing cart.
    fn session_options(
        &self,
        context_token: &ContextToken,
        params: Params,
        headers: &Headers,
    ) -> RequestOptions {
        tracing::trace!(context = %context_token.redacted(), "attaching cart session");
        let mut merged = self.gateway.basic_headers(headers);
        merged.insert(
            CONTEXT_TOKEN_HEADER.to_string(),
            context_token.as_str().to_string(),
        );
        RequestOptions::new().with_params(params).with_headers(merged)
    }

    async fn send(
        &self,
        method: Method,
        route: &str,
        options: RequestOptions,
    ) -> Result<Response, GatewayError> {
        tracing::debug!(%method, route, "issuing cart request");

        let response = match method {
            Method::Post => self.gateway.post(route, options).await,
            Method::Patch => self.gateway.patch(route, options).await,
            Method::Delete => self.gateway.delete(route, options).await,
            Method::Get => self.gateway.get(route, options).await,
            other => match options.into_request(other, route) {
                Ok(request) => self.gateway.send(request).await,
                Err(e) => Err(e),
            },
        };

        response.map_err(|e| {
            tracing::debug!(%method, route, error = %e, "cart request failed");
            GatewayError::from(e)
        })
    }
}
