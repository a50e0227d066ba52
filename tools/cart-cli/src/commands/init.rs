//! Write a default gateway config.

use anyhow::{bail, Context as _, Result};
use cart_gateway::config::generate_default_config;

use super::InitArgs;
use crate::context::{Context, CONFIG_NAMES};

/// Run the init command.
pub fn run(args: InitArgs, ctx: &Context) -> Result<()> {
    let path = ctx.resolve_path(args.path.as_deref().unwrap_or(CONFIG_NAMES[0]));

    if path.exists() && !args.force {
        bail!(
            "'{}' already exists (use --force to overwrite)",
            path.display()
        );
    }

    std::fs::write(&path, generate_default_config())
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;

    ctx.output
        .success(&format!("Wrote {}", path.display()));
    ctx.output.info("Next steps:");
    ctx.output.list_item("set base_url and access_token");
    ctx.output.list_item("cart --sales-channel <id> create");

    Ok(())
}
