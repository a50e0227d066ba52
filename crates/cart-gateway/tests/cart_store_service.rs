//! Requests issued by `CartStoreService`, observed through a recording gateway.

use std::sync::Arc;

use cart_gateway::cart::{LineItem, LineItemPriceType, LineItemType, PriceDefinition, ShippingCosts, TaxRule};
use cart_gateway::feature::{StaticFeatureFlags, AUTOMATIC_PROMOTIONS_FLAG};
use cart_gateway::{
    CartStoreService, ContextToken, GatewayError, Headers, IdGenerator, Params, SalesChannelId,
};
use cart_http::{FetchError, Method, RecordingGateway, RequestBuilder, Response};
use serde_json::{json, Value};

const LINE_ITEM_ROUTE: &str = "_proxy/store-api/SC1/v3/checkout/cart/line-item";
const CART_ROUTE: &str = "_proxy/store-api/SC1/v3/checkout/cart";

struct FixedIds;

impl IdGenerator for FixedIds {
    fn generate(&self) -> String {
        "generated-id".to_string()
    }
}

fn service_with_flags(flags: StaticFeatureFlags) -> CartStoreService<RecordingGateway> {
    CartStoreService::new(Arc::new(RecordingGateway::new()), Arc::new(flags))
        .with_id_generator(Arc::new(FixedIds))
}

fn service() -> CartStoreService<RecordingGateway> {
    service_with_flags(StaticFeatureFlags::none())
}

fn sales_channel() -> SalesChannelId {
    SalesChannelId::new("SC1")
}

fn token() -> ContextToken {
    ContextToken::new("TOKEN")
}

fn last_request(service: &CartStoreService<RecordingGateway>) -> RequestBuilder {
    service.gateway().last_request().expect("a request was sent")
}

fn body_of(request: &RequestBuilder) -> Value {
    request.json_body().expect("request has a body").unwrap()
}

fn custom_item(unit_price: f64, recorded_price: f64) -> LineItem {
    LineItem::new(LineItemType::Custom, 4)
        .with_id("custom-1")
        .with_label("Gift wrapping")
        .with_unit_price(unit_price)
        .with_price_definition(PriceDefinition::new(
            recorded_price,
            vec![TaxRule::new(7.0, 100.0)],
        ))
        .persisted()
}

async fn save(service: &CartStoreService<RecordingGateway>, item: &LineItem) -> RequestBuilder {
    service
        .save_line_item(&sales_channel(), &token(), item, Params::new(), Headers::new())
        .await
        .unwrap();
    last_request(service)
}

// === Cart routes ===

#[tokio::test]
async fn test_create_cart_has_no_session_header() {
    let service = service();
    service
        .create_cart(&sales_channel(), Params::new(), Headers::new())
        .await
        .unwrap();

    let request = last_request(&service);
    assert_eq!(request.method, Method::Get);
    assert_eq!(request.route, CART_ROUTE);
    assert!(request.header_value("sw-context-token").is_none());
    assert_eq!(request.header_value("Accept"), Some("application/json"));
    assert!(request.body.is_none());
}

#[tokio::test]
async fn test_get_cart_attaches_context_token() {
    let service = service();
    let mut params = Params::new();
    params.insert("source".to_string(), "order-create".to_string());

    service
        .get_cart(&sales_channel(), &token(), params, Headers::new())
        .await
        .unwrap();

    let request = last_request(&service);
    assert_eq!(request.method, Method::Get);
    assert_eq!(request.route, CART_ROUTE);
    assert_eq!(request.header_value("sw-context-token"), Some("TOKEN"));
    assert_eq!(
        request.query,
        vec![("source".to_string(), "order-create".to_string())]
    );
}

#[tokio::test]
async fn test_cancel_cart_deletes_cart_route() {
    let service = service();
    service
        .cancel_cart(&sales_channel(), &token(), Params::new(), Headers::new())
        .await
        .unwrap();

    let request = last_request(&service);
    assert_eq!(request.method, Method::Delete);
    assert_eq!(request.route, CART_ROUTE);
    assert_eq!(request.header_value("sw-context-token"), Some("TOKEN"));
}

#[tokio::test]
async fn test_caller_headers_are_merged() {
    let service = service();
    let mut headers = Headers::new();
    headers.insert("sw-language-id".to_string(), "lang-1".to_string());

    service
        .get_cart(&sales_channel(), &token(), Params::new(), headers)
        .await
        .unwrap();

    let request = last_request(&service);
    assert_eq!(request.header_value("sw-language-id"), Some("lang-1"));
    assert_eq!(request.header_value("Content-Type"), Some("application/json"));
}

#[tokio::test]
async fn test_api_version_drives_routes() {
    let service = CartStoreService::new(
        Arc::new(RecordingGateway::new().with_api_version(2)),
        Arc::new(StaticFeatureFlags::none()),
    );
    service
        .create_cart(&sales_channel(), Params::new(), Headers::new())
        .await
        .unwrap();

    assert_eq!(
        last_request(&service).route,
        "_proxy/store-api/SC1/v2/checkout/cart"
    );
}

// === Line items ===

#[tokio::test]
async fn test_remove_line_items_sends_ids() {
    let service = service();
    let keys = vec!["li-1".to_string(), "li-2".to_string()];

    service
        .remove_line_items(&sales_channel(), &token(), &keys, Params::new(), Headers::new())
        .await
        .unwrap();

    let request = last_request(&service);
    assert_eq!(request.method, Method::Delete);
    assert_eq!(request.route, LINE_ITEM_ROUTE);
    assert_eq!(body_of(&request), json!({"ids": ["li-1", "li-2"]}));
}

#[tokio::test]
async fn test_new_item_is_posted_existing_item_is_patched() {
    let service = service();

    let new_item = LineItem::new(LineItemType::Product, 1).with_identifier("prod-1");
    let created = save(&service, &new_item).await;

    let existing = custom_item(5.0, 5.0);
    let updated = save(&service, &existing).await;

    assert_eq!(created.method, Method::Post);
    assert_eq!(updated.method, Method::Patch);
    assert_eq!(created.route, LINE_ITEM_ROUTE);
    assert_eq!(created.route, updated.route);
    assert_eq!(updated.header_value("sw-context-token"), Some("TOKEN"));
}

#[tokio::test]
async fn test_unchanged_price_sends_null_definition() {
    let service = service();
    let body = body_of(&save(&service, &custom_item(5.0, 5.0)).await);

    assert_eq!(
        body,
        json!({
            "items": [{
                "id": "custom-1",
                "referencedId": "custom-1",
                "label": "Gift wrapping",
                "quantity": 4,
                "type": "custom",
                "priceDefinition": null,
                "stackable": true,
                "removable": true,
                "salesChannelId": "SC1"
            }]
        })
    );
}

#[tokio::test]
async fn test_edited_price_resends_definition() {
    let service = service();
    let body = body_of(&save(&service, &custom_item(6.5, 5.0)).await);

    assert_eq!(
        body["items"][0]["priceDefinition"],
        json!({
            "price": 5.0,
            "taxRules": [{"taxRate": 7.0, "percentage": 100.0}],
            "quantity": 4,
            "type": "quantity"
        })
    );
}

#[tokio::test]
async fn test_edited_credit_is_absolute() {
    let service = service();
    let item = LineItem::new(LineItemType::Credit, 1)
        .with_id("credit-1")
        .with_unit_price(-10.0)
        .with_price_definition(PriceDefinition::new(-5.0, Vec::new()))
        .persisted();

    let body = body_of(&save(&service, &item).await);
    assert_eq!(
        body["items"][0]["priceDefinition"]["type"],
        json!(LineItemPriceType::Absolute.as_str())
    );
}

#[tokio::test]
async fn test_new_product_never_carries_definition() {
    let service = service();
    let item = LineItem::new(LineItemType::Product, 2)
        .with_identifier("prod-1")
        .with_unit_price(99.0)
        .with_price_definition(PriceDefinition::new(10.0, Vec::new()));

    let body = body_of(&save(&service, &item).await);
    assert_eq!(body["items"][0]["priceDefinition"], Value::Null);
}

#[tokio::test]
async fn test_identifier_precedence() {
    let service = service();

    let with_identifier = LineItem::new(LineItemType::Product, 1)
        .with_id("line-id")
        .with_identifier("product-id");
    let with_id = LineItem::new(LineItemType::Product, 1).with_id("line-id");
    let with_neither = LineItem::new(LineItemType::Product, 1);

    let mut ids = Vec::new();
    for item in [&with_identifier, &with_id, &with_neither] {
        let body = body_of(&save(&service, item).await);
        assert_eq!(body["items"][0]["id"], body["items"][0]["referencedId"]);
        ids.push(body["items"][0]["id"].clone());
    }

    assert_eq!(ids, vec![json!("product-id"), json!("line-id"), json!("generated-id")]);
}

#[tokio::test]
async fn test_malformed_item_sends_nothing() {
    let service = service();
    let mut item = custom_item(1.0, 1.0);
    item.price_definition = None;

    let result = service
        .save_line_item(&sales_channel(), &token(), &item, Params::new(), Headers::new())
        .await;

    assert!(matches!(
        result,
        Err(GatewayError::MalformedLineItem { field: "priceDefinition", .. })
    ));
    assert!(service.gateway().requests().is_empty());
}

#[tokio::test]
async fn test_add_multiple_line_items() {
    let service = service();
    let items = vec![
        LineItem::new(LineItemType::Product, 1).with_identifier("prod-1"),
        LineItem::new(LineItemType::Product, 3).with_identifier("prod-2"),
    ];

    service
        .add_multiple_line_items(&sales_channel(), &token(), &items, Params::new(), Headers::new())
        .await
        .unwrap();

    let request = last_request(&service);
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.route, LINE_ITEM_ROUTE);

    let body = body_of(&request);
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[1]["referencedId"], "prod-2");
    assert_eq!(items[1]["quantity"], 3);
}

// === Promotions and shipping ===

#[tokio::test]
async fn test_add_promotion_code() {
    let service = service();
    service
        .add_promotion_code(&sales_channel(), &token(), "SAVE10", Params::new(), Headers::new())
        .await
        .unwrap();

    let request = last_request(&service);
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.route, LINE_ITEM_ROUTE);
    assert_eq!(
        body_of(&request),
        json!({"items": [{"type": "promotion", "referencedId": "SAVE10"}]})
    );
}

#[tokio::test]
async fn test_modify_shipping_costs() {
    let service = service();
    service
        .modify_shipping_costs(
            &sales_channel(),
            &token(),
            &ShippingCosts::new(4.99, 4.99),
            Headers::new(),
            Params::new(),
        )
        .await
        .unwrap();

    let request = last_request(&service);
    assert_eq!(request.method, Method::Patch);
    assert_eq!(request.route, "_proxy/modify-shipping-costs");
    assert_eq!(request.header_value("sw-context-token"), Some("TOKEN"));
    assert_eq!(
        body_of(&request),
        json!({
            "salesChannelId": "SC1",
            "shippingCosts": {"unitPrice": 4.99, "totalPrice": 4.99}
        })
    );
}

fn channel_params() -> Params {
    let mut params = Params::new();
    params.insert("salesChannelId".to_string(), "SC1".to_string());
    params
}

#[tokio::test]
async fn test_disable_automatic_promotions_without_flag() {
    let service = service();
    service
        .disable_automatic_promotions(&token(), channel_params(), Headers::new())
        .await
        .unwrap();

    let request = last_request(&service);
    assert_eq!(request.method, Method::Patch);
    assert_eq!(request.route, "_proxy/disable-automatic-promotions");
    assert_eq!(body_of(&request), json!({}));
}

#[tokio::test]
async fn test_disable_automatic_promotions_with_flag() {
    let service = service_with_flags(StaticFeatureFlags::none().with(AUTOMATIC_PROMOTIONS_FLAG));
    service
        .disable_automatic_promotions(&token(), channel_params(), Headers::new())
        .await
        .unwrap();

    assert_eq!(body_of(&last_request(&service)), json!({"salesChannelId": "SC1"}));
}

#[tokio::test]
async fn test_enable_automatic_promotions_with_flag() {
    let service = service_with_flags(StaticFeatureFlags::none().with(AUTOMATIC_PROMOTIONS_FLAG));
    service
        .enable_automatic_promotions(&token(), channel_params(), Headers::new())
        .await
        .unwrap();

    let request = last_request(&service);
    assert_eq!(request.route, "_proxy/enable-automatic-promotions");
    assert_eq!(request.header_value("sw-context-token"), Some("TOKEN"));
    assert_eq!(body_of(&request), json!({"salesChannelId": "SC1"}));
}

#[tokio::test]
async fn test_sales_channel_never_reaches_query_string() {
    for flags in [
        StaticFeatureFlags::none(),
        StaticFeatureFlags::none().with(AUTOMATIC_PROMOTIONS_FLAG),
    ] {
        let service = service_with_flags(flags);
        let mut params = channel_params();
        params.insert("source".to_string(), "order-create".to_string());

        service
            .disable_automatic_promotions(&token(), params, Headers::new())
            .await
            .unwrap();

        assert_eq!(
            last_request(&service).query,
            vec![("source".to_string(), "order-create".to_string())]
        );
    }
}

#[tokio::test]
async fn test_custom_flag_name() {
    let service = service_with_flags(StaticFeatureFlags::none().with(AUTOMATIC_PROMOTIONS_FLAG))
        .with_automatic_promotions_flag("FEATURE_NEXT_99999");
    service
        .enable_automatic_promotions(&token(), channel_params(), Headers::new())
        .await
        .unwrap();

    assert_eq!(body_of(&last_request(&service)), json!({}));
}

// === Transport failures ===

#[tokio::test]
async fn test_http_errors_propagate_unchanged() {
    let service = service();
    service.gateway().push_reply(Ok(Response::new(
        400,
        Headers::new(),
        br#"{"errors":[{"code":"CHECKOUT__CART_PROMOTION_NOT_FOUND"}]}"#.to_vec(),
    )));

    let error = service
        .add_promotion_code(&sales_channel(), &token(), "NOPE", Params::new(), Headers::new())
        .await
        .unwrap_err();

    assert_eq!(error.status(), Some(400));
    match error {
        GatewayError::Transport(FetchError::HttpError { message, .. }) => {
            assert!(message.contains("CHECKOUT__CART_PROMOTION_NOT_FOUND"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_timeouts_propagate_unchanged() {
    let service = service();
    service.gateway().push_reply(Err(FetchError::Timeout));

    let error = service
        .get_cart(&sales_channel(), &token(), Params::new(), Headers::new())
        .await
        .unwrap_err();

    assert!(matches!(error, GatewayError::Transport(FetchError::Timeout)));
}

#[tokio::test]
async fn test_response_is_returned() {
    let service = service();
    let mut response = Response::with_json(200, &json!({"token": "NEW", "lineItems": []}));
    response
        .headers
        .insert("sw-context-token".to_string(), "NEW".to_string());
    service.gateway().push_reply(Ok(response));

    let response = service
        .create_cart(&sales_channel(), Params::new(), Headers::new())
        .await
        .unwrap();

    assert_eq!(response.context_token(), Some("NEW"));
    let cart: Value = response.json().unwrap();
    assert_eq!(cart["lineItems"], json!([]));
}

// === Static tables ===

#[test]
fn test_static_tables() {
    assert_eq!(
        CartStoreService::<RecordingGateway>::line_item_types(),
        &[
            LineItemType::Product,
            LineItemType::Credit,
            LineItemType::Custom,
            LineItemType::Promotion
        ]
    );
    assert!(CartStoreService::<RecordingGateway>::line_item_price_types()
        .contains(&LineItemPriceType::Absolute));
    assert_eq!(
        CartStoreService::<RecordingGateway>::map_line_item_type_to_price_type(
            LineItemType::Promotion
        ),
        None
    );
}
