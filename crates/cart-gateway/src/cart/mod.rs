//! Cart module.
//!
//! Contains line items, the static type tables, and the payloads sent to the
//! line-item route.

mod line_item;
mod payload;
mod shipping;

pub use line_item::{
    map_line_item_type_to_price_type, CalculatedPrice, LineItem, LineItemPriceType,
    LineItemType, PriceDefinition, TaxRule, LINE_ITEM_PRICE_TYPES, LINE_ITEM_TYPES,
};
pub use payload::{
    build_line_item_payload, price_definition_override, resolve_line_item_id, LineItemPayload,
    LineItemsPayload, PromotionItemPayload,
};
pub use shipping::ShippingCosts;
