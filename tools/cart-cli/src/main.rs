//! Cart CLI - Command line tool for store API cart operations.
//!
//! Commands:
//! - `cart init` - Write a default gateway config
//! - `cart types` - List line item and price types
//! - `cart create` / `get` / `cancel` - Cart lifecycle
//! - `cart save` / `add-items` / `remove` - Line items
//! - `cart promo` - Redeem a promotion code
//! - `cart shipping` - Override shipping costs
//! - `cart promotions enable|disable` - Toggle automatic promotions

mod commands;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{
    AddItemsArgs, InitArgs, PromoArgs, PromotionsArgs, RemoveArgs, SaveArgs, ShippingArgs,
};

/// Cart CLI - Issue cart operations against the store API
#[derive(Parser)]
#[command(name = "cart")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Sales channel id
    #[arg(short, long, global = true, env = "CART_SALES_CHANNEL")]
    sales_channel: Option<String>,

    /// Context token of an existing cart
    #[arg(short, long, global = true, env = "CART_CONTEXT_TOKEN")]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default cart-gateway.toml
    Init(InitArgs),

    /// List line item types and their price types
    Types,

    /// Open a new cart for the sales channel
    Create,

    /// Fetch the cart bound to the context token
    Get,

    /// Discard the cart bound to the context token
    Cancel,

    /// Remove line items by id
    Remove(RemoveArgs),

    /// Create or update a line item read from a JSON file
    Save(SaveArgs),

    /// Add several line items read from a JSON array file
    AddItems(AddItemsArgs),

    /// Redeem a promotion code
    Promo(PromoArgs),

    /// Override the cart's shipping costs
    Shipping(ShippingArgs),

    /// Enable or disable automatic promotions
    Promotions(PromotionsArgs),
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let ctx = context::Context::load(
        cli.config.as_deref(),
        cli.sales_channel,
        cli.token,
        output,
    )?;

    // Execute command
    let result = match cli.command {
        Commands::Init(args) => commands::init::run(args, &ctx),
        Commands::Types => commands::cart::types(&ctx),
        Commands::Create => commands::cart::create(&ctx).await,
        Commands::Get => commands::cart::get(&ctx).await,
        Commands::Cancel => commands::cart::cancel(&ctx).await,
        Commands::Remove(args) => commands::cart::remove(args, &ctx).await,
        Commands::Save(args) => commands::cart::save(args, &ctx).await,
        Commands::AddItems(args) => commands::cart::add_items(args, &ctx).await,
        Commands::Promo(args) => commands::cart::promo(args, &ctx).await,
        Commands::Shipping(args) => commands::cart::shipping(args, &ctx).await,
        Commands::Promotions(args) => commands::cart::promotions(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
