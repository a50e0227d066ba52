//! Cart operations.

use std::path::Path;

use anyhow::{Context as _, Result};
use cart_gateway::cart::{LineItem, ShippingCosts};
use cart_gateway::{CartStoreService, GatewayError, Headers, Params, Response};
use cart_http::FetchClient;
use serde::de::DeserializeOwned;

use super::{AddItemsArgs, PromoArgs, PromotionsArgs, PromotionsCommand, RemoveArgs, SaveArgs, ShippingArgs};
use crate::context::Context;
use crate::output::status_badge;

/// List line item types and the price type each maps to.
pub fn types(ctx: &Context) -> Result<()> {
    let types = CartStoreService::<FetchClient>::line_item_types();

    if ctx.output.is_json() {
        let rows: Vec<serde_json::Value> = types
            .iter()
            .map(|t| {
                serde_json::json!({
                    "type": t,
                    "priceType": CartStoreService::<FetchClient>::map_line_item_type_to_price_type(*t),
                })
            })
            .collect();
        ctx.output.json(&rows);
        return Ok(());
    }

    ctx.output.header("Line item types");
    for t in types {
        let price_type = CartStoreService::<FetchClient>::map_line_item_type_to_price_type(*t)
            .map(|p| p.as_str())
            .unwrap_or("-");
        ctx.output.kv(t.as_str(), price_type);
    }

    ctx.output.header("Price types");
    for p in CartStoreService::<FetchClient>::line_item_price_types() {
        ctx.output.list_item(p.as_str());
    }
    Ok(())
}

/// Open a new cart.
pub async fn create(ctx: &Context) -> Result<()> {
    let service = ctx.service()?;
    let sales_channel = ctx.sales_channel()?;

    let response = track(ctx, "Creating cart", async {
        service
            .create_cart(&sales_channel, Params::new(), Headers::new())
            .await
    })
    .await?;

    report(ctx, &response)
}

/// Fetch the current cart.
pub async fn get(ctx: &Context) -> Result<()> {
    let service = ctx.service()?;
    let sales_channel = ctx.sales_channel()?;
    let token = ctx.context_token()?;

    let response = track(ctx, "Fetching cart", async {
        service
            .get_cart(&sales_channel, &token, Params::new(), Headers::new())
            .await
    })
    .await?;

    report(ctx, &response)
}

/// Discard the current cart.
pub async fn cancel(ctx: &Context) -> Result<()> {
    let service = ctx.service()?;
    let sales_channel = ctx.sales_channel()?;
    let token = ctx.context_token()?;

    let response = track(ctx, "Cancelling cart", async {
        service
            .cancel_cart(&sales_channel, &token, Params::new(), Headers::new())
            .await
    })
    .await?;

    report(ctx, &response)
}

/// Remove line items.
pub async fn remove(args: RemoveArgs, ctx: &Context) -> Result<()> {
    let service = ctx.service()?;
    let sales_channel = ctx.sales_channel()?;
    let token = ctx.context_token()?;

    let response = track(ctx, &format!("Removing {} line item(s)", args.ids.len()), async {
        service
            .remove_line_items(&sales_channel, &token, &args.ids, Params::new(), Headers::new())
            .await
    })
    .await?;

    report(ctx, &response)
}

/// Create or update one line item.
pub async fn save(args: SaveArgs, ctx: &Context) -> Result<()> {
    let item: LineItem = read_json(&ctx.resolve_path(&args.file))?;
    let service = ctx.service()?;
    let sales_channel = ctx.sales_channel()?;

    if args.dry_run {
        let payload = service.build_line_item_payload(&sales_channel, &item)?;
        ctx.output.json(&payload);
        return Ok(());
    }

    let token = ctx.context_token()?;
    let action = if item.is_new { "Adding" } else { "Updating" };

    let response = track(ctx, &format!("{} {} line item", action, item.item_type), async {
        service
            .save_line_item(&sales_channel, &token, &item, Params::new(), Headers::new())
            .await
    })
    .await?;

    report(ctx, &response)
}

/// Add several line items at once.
pub async fn add_items(args: AddItemsArgs, ctx: &Context) -> Result<()> {
    let items: Vec<LineItem> = read_json(&ctx.resolve_path(&args.file))?;
    let service = ctx.service()?;
    let sales_channel = ctx.sales_channel()?;
    let token = ctx.context_token()?;

    let response = track(ctx, &format!("Adding {} line item(s)", items.len()), async {
        service
            .add_multiple_line_items(&sales_channel, &token, &items, Params::new(), Headers::new())
            .await
    })
    .await?;

    report(ctx, &response)
}

/// Redeem a promotion code.
pub async fn promo(args: PromoArgs, ctx: &Context) -> Result<()> {
    let service = ctx.service()?;
    let sales_channel = ctx.sales_channel()?;
    let token = ctx.context_token()?;

    let response = track(ctx, &format!("Redeeming {}", args.code), async {
        service
            .add_promotion_code(&sales_channel, &token, &args.code, Params::new(), Headers::new())
            .await
    })
    .await?;

    report(ctx, &response)
}

/// Override shipping costs.
pub async fn shipping(args: ShippingArgs, ctx: &Context) -> Result<()> {
    let service = ctx.service()?;
    let sales_channel = ctx.sales_channel()?;
    let token = ctx.context_token()?;
    let costs = ShippingCosts::new(args.unit_price, args.total_price.unwrap_or(args.unit_price));

    let response = track(ctx, "Modifying shipping costs", async {
        service
            .modify_shipping_costs(&sales_channel, &token, &costs, Headers::new(), Params::new())
            .await
    })
    .await?;

    report(ctx, &response)
}

/// Toggle automatic promotions.
pub async fn promotions(args: PromotionsArgs, ctx: &Context) -> Result<()> {
    let service = ctx.service()?;
    let token = ctx.context_token()?;

    let mut params = Params::new();
    if let Ok(sales_channel) = ctx.sales_channel() {
        params.insert(
            cart_gateway::service::SALES_CHANNEL_ID_PARAM.to_string(),
            sales_channel.into_inner(),
        );
    }

    let response = match args.command {
        PromotionsCommand::Enable => {
            track(ctx, "Enabling automatic promotions", async {
                service
                    .enable_automatic_promotions(&token, params, Headers::new())
                    .await
            })
            .await?
        }
        PromotionsCommand::Disable => {
            track(ctx, "Disabling automatic promotions", async {
                service
                    .disable_automatic_promotions(&token, params, Headers::new())
                    .await
            })
            .await?
        }
    };

    report(ctx, &response)
}

/// Run `request` behind a spinner.
async fn track<F>(ctx: &Context, msg: &str, request: F) -> Result<Response>
where
    F: std::future::Future<Output = Result<Response, GatewayError>>,
{
    let spinner = ctx.output.spinner(msg);
    let result = request.await;
    spinner.finish_and_clear();

    let response = result.with_context(|| format!("{} failed", msg))?;
    tracing::info!(operation = msg, status = response.status, "cart request completed");
    ctx.output.success(msg);
    Ok(response)
}

/// Print a store API response.
fn report(ctx: &Context, response: &Response) -> Result<()> {
    let body: Option<serde_json::Value> = if response.body.is_empty() {
        None
    } else {
        Some(response.json()?)
    };

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "status": response.status,
            "contextToken": response.context_token(),
            "body": body,
        }));
        return Ok(());
    }

    ctx.output.kv("status", &status_badge(response.status));
    if let Some(token) = response.context_token() {
        ctx.output.kv("context token", token);
    }
    if let Some(body) = body {
        ctx.output.json(&body);
    }
    Ok(())
}

/// Read a JSON document.
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}
