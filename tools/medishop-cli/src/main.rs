//! Medishop CLI - browse the pharmacy, manage a cart and place orders.
//!
//! Commands:
//! - `medishop shop` - List medicines with filters, sorting and pages
//! - `medishop medicine` - Show one medicine
//! - `medishop cart` - Show and change the cart
//! - `medishop checkout` - Place an order for the cart
//! - `medishop orders` - List your past orders
//! - `medishop config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use medishop_observability::{LogLevel, LoggingConfig};

use commands::{CartArgs, CheckoutArgs, ConfigArgs, MedicineArgs, OrdersArgs, ShopArgs};

/// Medishop CLI - online pharmacy storefront
#[derive(Parser)]
#[command(name = "medishop")]
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

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse medicines
    Shop(ShopArgs),

    /// Show a medicine's details
    Medicine(MedicineArgs),

    /// Show or change the cart
    Cart(CartArgs),

    /// Place an order for the cart's contents
    Checkout(CheckoutArgs),

    /// List your past orders
    Orders(OrdersArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let ctx = match context::Context::load(cli.config.as_deref(), output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    let logging = if ctx.output.is_verbose() {
        LoggingConfig::new(LogLevel::Debug, ctx.config.logging.format)
    } else {
        ctx.config.logging
    };
    if let Err(e) = medishop_observability::init(&logging) {
        ctx.output.warn(&format!("Logging disabled: {}", e));
    }
    if let Some(path) = &ctx.config_path {
        ctx.output.debug(&format!("Using config {}", path.display()));
    }

    // Execute command
    let result = match cli.command {
        Commands::Shop(args) => commands::shop::run(args, &ctx).await,
        Commands::Medicine(args) => commands::medicine::run(args, &ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Checkout(args) => commands::checkout::run(args, &ctx).await,
        Commands::Orders(args) => commands::orders::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
