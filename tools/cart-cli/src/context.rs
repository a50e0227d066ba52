//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use cart_gateway::{CartStoreService, ContextToken, GatewayConfig, SalesChannelId};
use cart_http::FetchClient;

use crate::output::Output;

/// Config file names searched for, nearest directory first.
pub const CONFIG_NAMES: [&str; 3] = ["cart-gateway.toml", ".cart-gateway.toml", "cart-gateway.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// Gateway configuration.
    pub config: GatewayConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    sales_channel: Option<String>,
    token: Option<String>,
}

impl Context {
    /// Load context from config file.
    pub fn load(
        config_path: Option<&str>,
        sales_channel: Option<String>,
        token: Option<String>,
        output: Output,
    ) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config = if let Some(path) = config_path {
            GatewayConfig::load(path)
                .with_context(|| format!("Failed to load config file: {}", path))?
        } else {
            // Try to find config in current directory or parent directories
            find_config(&cwd).unwrap_or_default()
        };

        Ok(Self {
            config: config.with_env_overrides(),
            output,
            cwd,
            sales_channel,
            token,
        })
    }

    /// Build the cart service from the loaded config.
    pub fn service(&self) -> Result<CartStoreService<FetchClient>> {
        self.output
            .debug(&format!("Using store API at {}", self.config.base_url));
        CartStoreService::from_config(&self.config).context("Failed to create cart service")
    }

    /// The sales channel given on the command line.
    pub fn sales_channel(&self) -> Result<SalesChannelId> {
        self.sales_channel
            .as_deref()
            .map(SalesChannelId::from)
            .context("No sales channel given (use --sales-channel or CART_SALES_CHANNEL)")
    }

    /// The context token given on the command line.
    pub fn context_token(&self) -> Result<ContextToken> {
        self.token
            .as_deref()
            .map(ContextToken::from)
            .context("No context token given (use --token or CART_CONTEXT_TOKEN)")
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }
}

/// Find a config file in the directory tree above `start`.
fn find_config(start: &Path) -> Option<GatewayConfig> {
    let mut current = start.to_path_buf();
    loop {
        for name in &CONFIG_NAMES {
            let config_path = current.join(name);
            if config_path.exists() {
                if let Ok(config) = GatewayConfig::load(&config_path) {
                    return Some(config);
                }
            }
        }

        if !current.pop() {
            break;
        }
    }

    None
}
