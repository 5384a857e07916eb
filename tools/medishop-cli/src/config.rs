//! CLI configuration.

use std::path::Path;

use anyhow::{Context, Result};
use medishop_observability::LoggingConfig;
use serde::{Deserialize, Serialize};

/// File names searched for, in order.
pub const CONFIG_NAMES: [&str; 3] = ["medishop.toml", ".medishop.toml", "medishop.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CliConfig {
    /// Remote API configuration.
    #[serde(default)]
    pub api: ApiConfig,

    /// Where the cart is kept between runs.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Shop listing preferences.
    #[serde(default)]
    pub shop: ShopConfig,

    /// Signed-in customer.
    #[serde(default)]
    pub customer: CustomerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Remote API configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    /// Storefront API base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Image upload endpoint for prescriptions.
    #[serde(default = "default_upload_url")]
    pub upload_url: String,

    /// Bearer token for the storefront API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    /// One timeout for every service, in milliseconds. Unset keeps the
    /// per-service defaults.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

fn default_base_url() -> String {
    "http://localhost:5000/api/v1".to_string()
}

fn default_upload_url() -> String {
    "http://localhost:5000/api/v1/upload".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            upload_url: default_upload_url(),
            access_token: None,
            timeout_ms: None,
        }
    }
}

/// Cart persistence configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    /// Directory for saved state. Defaults to the user data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cart_dir: Option<String>,

    /// Key the cart is saved under.
    #[serde(default = "default_cart_key")]
    pub cart_key: String,
}

fn default_cart_key() -> String {
    medishop_commerce::cart::default_cart_key()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            cart_dir: None,
            cart_key: default_cart_key(),
        }
    }
}

/// Shop listing preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShopConfig {
    #[serde(default = "default_per_page")]
    pub per_page: usize,
}

fn default_per_page() -> usize {
    medishop_commerce::search::DEFAULT_PER_PAGE
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            per_page: default_per_page(),
        }
    }
}

/// Signed-in customer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CustomerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Generate a default medishop.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Medishop storefront configuration

[api]
base_url = "{base_url}"
upload_url = "{upload_url}"
# access_token = "..."
# timeout_ms = 10000

[storage]
# cart_dir = "~/.local/share/medishop"
cart_key = "{cart_key}"

[shop]
per_page = {per_page}

[customer]
# email = "you@example.com"

[logging]
level = "warn"
format = "human"
"#,
        base_url = default_base_url(),
        upload_url = default_upload_url(),
        cart_key = default_cart_key(),
        per_page = default_per_page(),
    )
}
