//! Configuration management commands.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context as _, Result};
use medishop_observability::{LogFormat, LogLevel};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig, CONFIG_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Get { key } => get_config(&key, ctx),
        ConfigCommand::Set { key, value } => set_config(&key, &value, ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(none, using defaults)"),
    }

    let config = &ctx.config;
    ctx.output.info("");
    ctx.output.info("[api]");
    ctx.output.kv("base_url", &config.api.base_url);
    ctx.output.kv("upload_url", &config.api.upload_url);
    ctx.output.kv(
        "access_token",
        if config.api.access_token.is_some() {
            "(set)"
        } else {
            "(unset)"
        },
    );
    if let Some(ms) = config.api.timeout_ms {
        ctx.output.kv("timeout_ms", &ms.to_string());
    }

    ctx.output.info("");
    ctx.output.info("[storage]");
    ctx.output
        .kv("cart_dir", &ctx.cart_dir().display().to_string());
    ctx.output.kv("cart_key", &config.storage.cart_key);

    ctx.output.info("");
    ctx.output.info("[shop]");
    ctx.output.kv("per_page", &config.shop.per_page.to_string());

    ctx.output.info("");
    ctx.output.info("[customer]");
    ctx.output.kv(
        "email",
        config.customer.email.as_deref().unwrap_or("(not signed in)"),
    );

    ctx.output.info("");
    ctx.output.info("[logging]");
    ctx.output.kv("level", config.logging.level.as_str());
    ctx.output.kv("format", &format!("{:?}", config.logging.format).to_lowercase());

    Ok(())
}

fn get_config(key: &str, ctx: &Context) -> Result<()> {
    let value = get_config_value(&ctx.config, key)?;

    if ctx.output.is_json() {
        ctx.output
            .json(&serde_json::json!({ "key": key, "value": value }));
    } else {
        println!("{}", value);
    }

    Ok(())
}

fn set_config(key: &str, value: &str, ctx: &Context) -> Result<()> {
    let Some(config_path) = ctx.config_path.clone() else {
        bail!("No config file found. Run `medishop config init` to create one.");
    };

    let mut config = CliConfig::load(&config_path)?;
    set_config_value(&mut config, key, value)?;
    config.save(&config_path)?;

    ctx.output.success(&format!("Set {} = {}", key, value));
    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path: PathBuf = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    ctx.output
        .success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let config = &ctx.config;
    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    for (key, url) in [
        ("api.base_url", &config.api.base_url),
        ("api.upload_url", &config.api.upload_url),
    ] {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            errors.push(format!("{} must be an http(s) URL", key));
        } else if url.starts_with("http://") && !url.contains("localhost") {
            warnings.push(format!("{} is not using https", key));
        }
    }

    if config.api.timeout_ms == Some(0) {
        errors.push("api.timeout_ms must be greater than 0".to_string());
    }
    if config.shop.per_page == 0 {
        errors.push("shop.per_page must be greater than 0".to_string());
    }
    if config.storage.cart_key.trim().is_empty() {
        errors.push("storage.cart_key must not be empty".to_string());
    }
    match config.customer.email.as_deref() {
        None => warnings.push("customer.email is unset; checkout will ask you to log in".to_string()),
        Some(email) if !email.contains('@') => {
            errors.push(format!("customer.email '{}' is not an email address", email))
        }
        Some(_) => {}
    }

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}

fn get_config_value(config: &CliConfig, key: &str) -> Result<String> {
    let parts: Vec<&str> = key.split('.').collect();

    let optional = |value: &Option<String>| {
        value
            .as_ref()
            .map(|v| format!("\"{}\"", v))
            .unwrap_or_else(|| "null".to_string())
    };

    match parts.as_slice() {
        ["api", "base_url"] => Ok(format!("\"{}\"", config.api.base_url)),
        ["api", "upload_url"] => Ok(format!("\"{}\"", config.api.upload_url)),
        ["api", "timeout_ms"] => Ok(config
            .api
            .timeout_ms
            .map(|ms| ms.to_string())
            .unwrap_or_else(|| "null".to_string())),
        ["storage", "cart_dir"] => Ok(optional(&config.storage.cart_dir)),
        ["storage", "cart_key"] => Ok(format!("\"{}\"", config.storage.cart_key)),
        ["shop", "per_page"] => Ok(config.shop.per_page.to_string()),
        ["customer", "email"] => Ok(optional(&config.customer.email)),
        ["logging", "level"] => Ok(format!("\"{}\"", config.logging.level.as_str())),
        ["logging", "format"] => Ok(format!(
            "\"{}\"",
            format!("{:?}", config.logging.format).to_lowercase()
        )),
        _ => bail!("Unknown config key: {}", key),
    }
}

fn set_config_value(config: &mut CliConfig, key: &str, value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["api", "base_url"] => config.api.base_url = value.to_string(),
        ["api", "upload_url"] => config.api.upload_url = value.to_string(),
        ["api", "access_token"] => config.api.access_token = Some(value.to_string()),
        ["api", "timeout_ms"] => config.api.timeout_ms = Some(value.parse()?),
        ["storage", "cart_dir"] => config.storage.cart_dir = Some(value.to_string()),
        ["storage", "cart_key"] => config.storage.cart_key = value.to_string(),
        ["shop", "per_page"] => config.shop.per_page = value.parse()?,
        ["customer", "email"] => config.customer.email = Some(value.to_string()),
        ["logging", "level"] => config.logging.level = value.parse::<LogLevel>()?,
        ["logging", "format"] => config.logging.format = value.parse::<LogFormat>()?,
        _ => bail!("Unknown or read-only config key: {}", key),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_then_get() {
        let mut config = CliConfig::default();
        set_config_value(&mut config, "customer.email", "rahim@example.com").unwrap();
        set_config_value(&mut config, "shop.per_page", "12").unwrap();
        set_config_value(&mut config, "logging.format", "json").unwrap();

        assert_eq!(
            get_config_value(&config, "customer.email").unwrap(),
            "\"rahim@example.com\""
        );
        assert_eq!(get_config_value(&config, "shop.per_page").unwrap(), "12");
        assert_eq!(get_config_value(&config, "logging.format").unwrap(), "\"json\"");
    }

    #[test]
    fn test_unknown_and_invalid_values() {
        let mut config = CliConfig::default();
        assert!(get_config_value(&config, "api.password").is_err());
        assert!(set_config_value(&mut config, "shop.per_page", "many").is_err());
        assert!(set_config_value(&mut config, "logging.level", "loud").is_err());
    }
}
