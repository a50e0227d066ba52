//! Manual shipping cost override.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Shipping costs the administration forces onto a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ShippingCosts {
    pub unit_price: f64,
    pub total_price: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ShippingCosts {
    /// Costs with the given unit and total price.
    pub fn new(unit_price: f64, total_price: f64) -> Self {
        Self {
            unit_price,
            total_price,
            extra: Map::new(),
        }
    }
}
