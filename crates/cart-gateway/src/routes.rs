//! Store API routes, all proxied through the administration.

use crate::ids::SalesChannelId;

/// Route of the manual shipping cost override.
pub const MODIFY_SHIPPING_COSTS_ROUTE: &str = "_proxy/modify-shipping-costs";

/// Route switching automatic promotions off for a cart.
pub const DISABLE_AUTOMATIC_PROMOTIONS_ROUTE: &str = "_proxy/disable-automatic-promotions";

/// Route switching automatic promotions back on.
pub const ENABLE_AUTOMATIC_PROMOTIONS_ROUTE: &str = "_proxy/enable-automatic-promotions";

/// `_proxy/store-api/{salesChannelId}/v{version}/checkout/cart`
pub fn cart_route(sales_channel_id: &SalesChannelId, api_version: u32) -> String {
    format!(
        "_proxy/store-api/{}/v{}/checkout/cart",
        sales_channel_id, api_version
    )
}

/// `_proxy/store-api/{salesChannelId}/v{version}/checkout/cart/line-item`
pub fn line_item_route(sales_channel_id: &SalesChannelId, api_version: u32) -> String {
    format!("{}/line-item", cart_route(sales_channel_id, api_version))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_route() {
        assert_eq!(
            cart_route(&"sc-1".into(), 3),
            "_proxy/store-api/sc-1/v3/checkout/cart"
        );
    }

    #[test]
    fn test_line_item_route() {
        assert_eq!(
            line_item_route(&"sc-1".into(), 2),
            "_proxy/store-api/sc-1/v2/checkout/cart/line-item"
        );
    }
}
