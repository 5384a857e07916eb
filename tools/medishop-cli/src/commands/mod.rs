//! CLI command implementations.

pub mod cart;
pub mod checkout;
pub mod config;
pub mod medicine;
pub mod orders;
pub mod shop;

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Arguments for the shop command.
#[derive(Args)]
pub struct ShopArgs {
    /// Text search, sent to the catalog service.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only this category (case-insensitive).
    #[arg(short, long)]
    pub category: Option<String>,

    /// Only this dosage form, e.g. tablet (case-insensitive).
    #[arg(short, long)]
    pub form: Option<String>,

    /// Only medicines that do (true) or don't (false) need a prescription.
    #[arg(long)]
    pub prescription: Option<bool>,

    /// Sort by price: asc or desc.
    #[arg(long)]
    pub sort: Option<String>,

    /// Page to show.
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Medicines per page (default from config).
    #[arg(long)]
    pub per_page: Option<usize>,
}

/// Arguments for the medicine command.
#[derive(Args)]
pub struct MedicineArgs {
    /// Medicine id.
    pub id: String,

    /// Also list related medicines.
    #[arg(short, long)]
    pub related: bool,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart.
    Show,
    /// Add a medicine to the cart.
    Add {
        /// Medicine id.
        id: String,
        /// Units to add.
        #[arg(short, long, default_value = "1")]
        quantity: i64,
    },
    /// Set the quantity of a cart line. Zero or less removes it.
    Update {
        /// Medicine id.
        id: String,
        /// New quantity.
        #[arg(allow_hyphen_values = true)]
        quantity: i64,
    },
    /// Remove a medicine from the cart.
    Remove {
        /// Medicine id.
        id: String,
    },
    /// Empty the cart.
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Recipient name.
    #[arg(long)]
    pub name: Option<String>,

    /// Delivery address.
    #[arg(long)]
    pub address: Option<String>,

    /// Contact phone number.
    #[arg(long)]
    pub phone: Option<String>,

    /// Payment method: cashOnDelivery or sslcommerz.
    #[arg(long, default_value = "cashOnDelivery")]
    pub payment: String,

    /// Prescription image to attach.
    #[arg(long)]
    pub prescription: Option<PathBuf>,

    /// Customer email (default from config).
    #[arg(long)]
    pub email: Option<String>,

    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the orders command.
#[derive(Args)]
pub struct OrdersArgs {
    /// Only orders still awaiting payment.
    #[arg(long)]
    pub unpaid: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Get a config value.
    Get {
        /// Config key (dot-separated).
        key: String,
    },
    /// Set a config value.
    Set {
        /// Config key (dot-separated).
        key: String,
        /// Value to set.
        value: String,
    },
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
