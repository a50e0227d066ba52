//! Line items as the administration edits them, and the static type tables.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Kind of cart line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineItemType {
    Product,
    Credit,
    Custom,
    Promotion,
}

/// Every line item type, in declaration order.
pub const LINE_ITEM_TYPES: &[LineItemType] = &[
    LineItemType::Product,
    LineItemType::Credit,
    LineItemType::Custom,
    LineItemType::Promotion,
];

impl LineItemType {
    /// Wire name (e.g. "product").
    pub fn as_str(&self) -> &'static str {
        match self {
            LineItemType::Product => "product",
            LineItemType::Credit => "credit",
            LineItemType::Custom => "custom",
            LineItemType::Promotion => "promotion",
        }
    }

    /// Parse a wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        LINE_ITEM_TYPES.iter().copied().find(|t| t.as_str() == name)
    }

    /// Price type used when resending this item's price definition.
    ///
    /// Promotions have none: their price is always computed server side.
    pub fn price_type(&self) -> Option<LineItemPriceType> {
        match self {
            LineItemType::Product | LineItemType::Custom => Some(LineItemPriceType::Quantity),
            LineItemType::Credit => Some(LineItemPriceType::Absolute),
            LineItemType::Promotion => None,
        }
    }
}

impl fmt::Display for LineItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a price definition is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineItemPriceType {
    /// Unit price multiplied by quantity.
    Quantity,
    /// Fixed amount regardless of quantity.
    Absolute,
    /// Share of another amount.
    Percentage,
}

/// Every price type, in declaration order.
pub const LINE_ITEM_PRICE_TYPES: &[LineItemPriceType] = &[
    LineItemPriceType::Quantity,
    LineItemPriceType::Absolute,
    LineItemPriceType::Percentage,
];

impl LineItemPriceType {
    /// Wire name (e.g. "quantity").
    pub fn as_str(&self) -> &'static str {
        match self {
            LineItemPriceType::Quantity => "quantity",
            LineItemPriceType::Absolute => "absolute",
            LineItemPriceType::Percentage => "percentage",
        }
    }

    /// Parse a wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        LINE_ITEM_PRICE_TYPES.iter().copied().find(|t| t.as_str() == name)
    }
}

impl fmt::Display for LineItemPriceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a line item type to the price type of its price definition.
pub fn map_line_item_type_to_price_type(item_type: LineItemType) -> Option<LineItemPriceType> {
    item_type.price_type()
}

/// A tax rule attached to a price definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaxRule {
    pub tax_rate: f64,
    pub percentage: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TaxRule {
    /// A rule applying `tax_rate` to `percentage` of the price.
    pub fn new(tax_rate: f64, percentage: f64) -> Self {
        Self {
            tax_rate,
            percentage,
            extra: Map::new(),
        }
    }
}

/// How the store API should compute a line item's price.
///
/// Keys this crate does not model are kept in `extra` so a copy sent back
/// carries everything the server originally returned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PriceDefinition {
    /// Recorded unit price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Left out of the wire form when the server sent none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_rules: Option<Vec<TaxRule>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub price_type: Option<LineItemPriceType>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PriceDefinition {
    /// A definition recording `price` with the given tax rules.
    pub fn new(price: f64, tax_rules: Vec<TaxRule>) -> Self {
        Self {
            price: Some(price),
            tax_rules: Some(tax_rules),
            ..Self::default()
        }
    }
}

/// The price the store API last calculated for a line item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CalculatedPrice {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A cart line item as edited on the client.
///
/// `unit_price` in [`CalculatedPrice`] may be edited locally; the payload
/// builder compares it against the price definition to decide whether to
/// resend the definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Referenced entity id (e.g. the product id). Preferred over `id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(rename = "type")]
    pub item_type: LineItemType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<CalculatedPrice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_definition: Option<PriceDefinition>,
    /// Not yet persisted to the cart.
    #[serde(rename = "_isNew", default)]
    pub is_new: bool,
}

impl LineItem {
    /// Create an unsaved line item.
    pub fn new(item_type: LineItemType, quantity: i64) -> Self {
        Self {
            id: None,
            identifier: None,
            item_type,
            label: None,
            quantity,
            description: None,
            price: None,
            price_definition: None,
            is_new: true,
        }
    }

    /// Set the line item id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the referenced identifier.
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Set the label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the current (possibly edited) unit price.
    pub fn with_unit_price(mut self, unit_price: f64) -> Self {
        self.price
            .get_or_insert_with(CalculatedPrice::default)
            .unit_price = Some(unit_price);
        self
    }

    /// Set the price definition.
    pub fn with_price_definition(mut self, definition: PriceDefinition) -> Self {
        self.price_definition = Some(definition);
        self
    }

    /// Mark the item as already persisted.
    pub fn persisted(mut self) -> Self {
        self.is_new = false;
        self
    }

    /// Identifier the store API knows this item by, if it has one.
    /// Empty strings count as missing.
    pub fn known_id(&self) -> Option<&str> {
        non_empty(self.identifier.as_deref()).or_else(|| non_empty(self.id.as_deref()))
    }

    /// New product items never carry a price override.
    pub fn is_new_product(&self) -> bool {
        self.is_new && self.item_type == LineItemType::Product
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}
