//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context as _, Result};
use medishop_cache::Cache;
use medishop_commerce::cart::PersistentCart;
use medishop_commerce::checkout::{CheckoutFlow, Customer};
use medishop_data::{ApiClient, ClientConfig, Timeouts};

use crate::config::{CliConfig, CONFIG_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// File the config came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = match config_path {
            Some(path) => {
                let path = resolve(&cwd, path);
                (CliConfig::load(&path)?, Some(path))
            }
            None => match find_config_file(&cwd) {
                Some(path) => (CliConfig::load(&path)?, Some(path)),
                None => (CliConfig::default(), None),
            },
        };

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Client for the remote services.
    pub fn api(&self) -> Result<ApiClient> {
        let api = &self.config.api;
        let timeouts = match api.timeout_ms {
            Some(ms) => Timeouts::with_override(Duration::from_millis(ms)),
            None => Timeouts::default(),
        };
        let mut client_config =
            ClientConfig::new(&api.base_url, &api.upload_url).with_timeouts(timeouts);
        if let Some(token) = &api.access_token {
            client_config = client_config.with_token(token);
        }
        ApiClient::new(client_config).context("Failed to set up API client")
    }

    /// Checkout flow wired to the remote services.
    pub fn checkout_flow(&self) -> Result<CheckoutFlow> {
        let api = Arc::new(self.api()?);
        Ok(CheckoutFlow::new(api.clone(), api))
    }

    /// The saved cart.
    pub fn open_cart(&self) -> Result<PersistentCart> {
        let dir = self.cart_dir();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        let cache = Cache::open_dir(&dir)
            .with_context(|| format!("Failed to open cart storage in {}", dir.display()))?;
        Ok(PersistentCart::load(cache, self.config.storage.cart_key.clone()))
    }

    /// Directory holding the saved cart.
    pub fn cart_dir(&self) -> PathBuf {
        match &self.config.storage.cart_dir {
            Some(dir) => self.resolve_path(dir),
            None => data_dir().join("medishop"),
        }
    }

    /// The signed-in customer, with `email` overriding the config.
    pub fn customer(&self, email: Option<&str>) -> Customer {
        match email.or(self.config.customer.email.as_deref()) {
            Some(email) => Customer::new(email),
            None => Customer::anonymous(),
        }
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        resolve(&self.cwd, path)
    }
}

/// Find a config file in the directory or its parents.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in CONFIG_NAMES {
            let candidate = current.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}

fn resolve(cwd: &Path, path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(rest);
        }
    }
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}

/// Get the platform-specific data directory.
fn data_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os("XDG_DATA_HOME") {
        PathBuf::from(dir)
    } else if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".local").join("share")
    } else {
        std::env::temp_dir()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_found_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("medishop.toml"), "").unwrap();

        assert_eq!(
            find_config_file(&nested),
            Some(dir.path().join("medishop.toml"))
        );
    }

    #[test]
    fn test_resolve_relative() {
        let cwd = Path::new("/work");
        assert_eq!(resolve(cwd, "carts"), PathBuf::from("/work/carts"));
        assert_eq!(resolve(cwd, "/var/carts"), PathBuf::from("/var/carts"));
    }

    #[test]
    fn test_cart_round_trips_through_storage_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = CliConfig::default();
        config.storage.cart_dir = Some(dir.path().to_string_lossy().into_owned());
        let ctx = Context {
            config,
            config_path: None,
            output: Output::new(false, true),
            cwd: dir.path().to_path_buf(),
        };

        let mut cart = ctx.open_cart().unwrap();
        cart.add_item(medishop_commerce::cart::CartLineItem::new(
            "m1",
            "Napa",
            medishop_commerce::Money::from_cents(150),
            2,
        ))
        .unwrap();

        let reopened = ctx.open_cart().unwrap();
        assert_eq!(reopened.store().unit_count(), 2);
    }

    #[test]
    fn test_customer_override() {
        let mut config = CliConfig::default();
        config.customer.email = Some("config@example.com".to_string());
        let ctx = Context {
            config,
            config_path: None,
            output: Output::new(false, true),
            cwd: PathBuf::from("/"),
        };

        assert_eq!(ctx.customer(None).signed_in_email(), Some("config@example.com"));
        assert_eq!(ctx.customer(Some("flag@example.com")).signed_in_email(), Some("flag@example.com"));
    }
}
