//! CLI command implementations.

pub mod cart;
pub mod init;

use clap::{Args, Subcommand};

/// Arguments for the init command.
#[derive(Args)]
pub struct InitArgs {
    /// Where to write the config (default: ./cart-gateway.toml).
    #[arg(short, long)]
    pub path: Option<String>,

    /// Overwrite an existing file.
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for the remove command.
#[derive(Args)]
pub struct RemoveArgs {
    /// Line item ids to remove.
    #[arg(required = true)]
    pub ids: Vec<String>,
}

/// Arguments for the save command.
#[derive(Args)]
pub struct SaveArgs {
    /// JSON file holding one line item.
    pub file: String,

    /// Print the payload instead of sending it.
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the add-items command.
#[derive(Args)]
pub struct AddItemsArgs {
    /// JSON file holding an array of line items.
    pub file: String,
}

/// Arguments for the promo command.
#[derive(Args)]
pub struct PromoArgs {
    /// Promotion code to redeem.
    pub code: String,
}

/// Arguments for the shipping command.
#[derive(Args)]
pub struct ShippingArgs {
    /// Shipping unit price.
    #[arg(long)]
    pub unit_price: f64,

    /// Shipping total price (default: unit price).
    #[arg(long)]
    pub total_price: Option<f64>,
}

/// Arguments for the promotions command.
#[derive(Args)]
pub struct PromotionsArgs {
    #[command(subcommand)]
    pub command: PromotionsCommand,
}

#[derive(Subcommand)]
pub enum PromotionsCommand {
    /// Let the store API apply automatic promotions.
    Enable,
    /// Stop the store API from applying automatic promotions.
    Disable,
}
