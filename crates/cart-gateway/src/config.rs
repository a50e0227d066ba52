//! Gateway configuration.

use std::path::Path;
use std::time::Duration;

use cart_http::{FetchClient, DEFAULT_API_VERSION};
use serde::{Deserialize, Serialize};

use crate::error::GatewayError;
use crate::feature::{StaticFeatureFlags, AUTOMATIC_PROMOTIONS_FLAG};

/// Environment variable overriding [`GatewayConfig::base_url`].
pub const BASE_URL_ENV: &str = "CART_GATEWAY_BASE_URL";

/// Environment variable overriding [`GatewayConfig::access_token`].
pub const ACCESS_TOKEN_ENV: &str = "CART_GATEWAY_ACCESS_TOKEN";

/// Where the gateway talks to and how.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GatewayConfig {
    /// Administration API base URL; routes are joined onto it.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Store API version (`v{n}` route segment).
    #[serde(default = "default_api_version")]
    pub api_version: u32,

    /// Bearer token for the administration API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    /// Per-request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Active feature flags.
    #[serde(default)]
    pub features: Vec<String>,

    /// Flag gating the sales channel id on the automatic-promotion toggles.
    #[serde(default = "default_automatic_promotions_flag")]
    pub automatic_promotions_flag: String,
}

fn default_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_api_version() -> u32 {
    DEFAULT_API_VERSION
}

fn default_automatic_promotions_flag() -> String {
    AUTOMATIC_PROMOTIONS_FLAG.to_string()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_version: default_api_version(),
            access_token: None,
            timeout_secs: None,
            features: Vec::new(),
            automatic_promotions_flag: default_automatic_promotions_flag(),
        }
    }
}

impl GatewayConfig {
    /// Load config from a `.json` or TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GatewayError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            GatewayError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;

        if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    /// Parse a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, GatewayError> {
        toml::from_str(content).map_err(|e| GatewayError::Config(e.to_string()))
    }

    /// Parse a JSON document.
    pub fn from_json_str(content: &str) -> Result<Self, GatewayError> {
        serde_json::from_str(content).map_err(|e| GatewayError::Config(e.to_string()))
    }

    /// Apply overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup` (keyed by environment variable name).
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(base_url) = lookup(BASE_URL_ENV) {
            self.base_url = base_url;
        }
        if let Some(token) = lookup(ACCESS_TOKEN_ENV) {
            self.access_token = Some(token);
        }
        self
    }

    /// Feature flags declared active.
    pub fn feature_flags(&self) -> StaticFeatureFlags {
        self.features.iter().cloned().collect()
    }

    /// Build the HTTP transport this config describes.
    pub fn fetch_client(&self) -> Result<FetchClient, GatewayError> {
        let mut client = FetchClient::new(&self.base_url).with_api_version(self.api_version);
        if let Some(token) = &self.access_token {
            client = client.with_access_token(token);
        }
        if let Some(secs) = self.timeout_secs {
            client = client.with_timeout(Duration::from_secs(secs))?;
        }
        Ok(client)
    }
}

/// Generate a default `cart-gateway.toml`.
pub fn generate_default_config() -> String {
    format!(
        r#"# Cart gateway configuration

base_url = "{base_url}"
api_version = {api_version}
# access_token = "..."
# timeout_secs = 10

# Active feature flags
features = []
automatic_promotions_flag = "{flag}"
"#,
        base_url = default_base_url(),
        api_version = DEFAULT_API_VERSION,
        flag = AUTOMATIC_PROMOTIONS_FLAG,
    )
}
