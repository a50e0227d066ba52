//! Wire payloads for the line-item route.

use serde::Serialize;

use crate::cart::{LineItem, LineItemType, PriceDefinition};
use crate::error::GatewayError;
use crate::ids::{IdGenerator, SalesChannelId};

/// Body of every line-item request: `{"items": [...]}`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LineItemsPayload<T> {
    pub items: Vec<T>,
}

impl<T> LineItemsPayload<T> {
    /// Wrap a single item.
    pub fn single(item: T) -> Self {
        Self { items: vec![item] }
    }
}

/// One line item as the store API expects it.
///
/// `price_definition` is always serialized; `null` leaves the server's
/// definition untouched.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LineItemPayload {
    pub id: String,
    pub referenced_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub quantity: i64,
    #[serde(rename = "type")]
    pub item_type: LineItemType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price_definition: Option<PriceDefinition>,
    pub stackable: bool,
    pub removable: bool,
    pub sales_channel_id: SalesChannelId,
}

/// Synthetic line item redeeming a promotion code.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PromotionItemPayload {
    #[serde(rename = "type")]
    pub item_type: LineItemType,
    pub referenced_id: String,
}

impl PromotionItemPayload {
    /// Payload for `code`.
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            item_type: LineItemType::Promotion,
            referenced_id: code.into(),
        }
    }
}

/// Identifier sent for `item`: its identifier, else its id, else a fresh one.
pub fn resolve_line_item_id(item: &LineItem, ids: &dyn IdGenerator) -> String {
    match item.known_id() {
        Some(id) => id.to_string(),
        None => ids.generate(),
    }
}

/// The price definition to resend for `item`, if any.
///
/// Only a locally edited unit price that no longer matches the recorded
/// definition triggers an override. The copy gets the item's current
/// quantity and the price type mapped from its line item type.
pub fn price_definition_override(item: &LineItem) -> Result<Option<PriceDefinition>, GatewayError> {
    if item.is_new_product() {
        return Ok(None);
    }

    let price = item
        .price
        .as_ref()
        .ok_or_else(|| malformed(item, "price"))?;
    let definition = item
        .price_definition
        .as_ref()
        .ok_or_else(|| malformed(item, "priceDefinition"))?;

    if price.unit_price == definition.price {
        return Ok(None);
    }

    let mut dirty = definition.clone();
    dirty.quantity = Some(item.quantity);
    dirty.price_type = item.item_type.price_type();
    Ok(Some(dirty))
}

/// Build the payload entry for `item` under the already resolved `id`.
pub fn build_line_item_payload(
    sales_channel_id: &SalesChannelId,
    item: &LineItem,
    id: String,
) -> Result<LineItemPayload, GatewayError> {
    let price_definition = price_definition_override(item)?;

    Ok(LineItemPayload {
        referenced_id: id.clone(),
        id,
        label: item.label.clone(),
        quantity: item.quantity,
        item_type: item.item_type,
        description: item.description.clone(),
        price_definition,
        stackable: true,
        removable: true,
        sales_channel_id: sales_channel_id.clone(),
    })
}

fn malformed(item: &LineItem, field: &'static str) -> GatewayError {
    tracing::warn!(item_type = %item.item_type, field, "line item is missing a price field");
    GatewayError::MalformedLineItem {
        id: item.known_id().unwrap_or("<unsaved>").to_string(),
        field,
    }
}
