//! Checkout command.

use anyhow::{anyhow, bail, Context as _, Result};
use chrono::Local;
use dialoguer::{Confirm, Input};
use medishop_commerce::cart::CartAccess;
use medishop_commerce::checkout::{
    CheckoutError, CheckoutForm, CheckoutOutcome, PaymentMethod, PrescriptionFile, ShippingDetails,
};
use serde_json::json;

use super::CheckoutArgs;
use crate::context::Context;
use crate::output::format_bytes;

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.open_cart()?;
    if cart.state().is_empty() {
        ctx.output.info("Browse medicines with `medishop shop`.");
        bail!(CheckoutError::EmptyCart.user_message());
    }

    let payment_method = PaymentMethod::parse(&args.payment).ok_or_else(|| {
        anyhow!(
            "Unknown payment method '{}'. Use cashOnDelivery or sslcommerz.",
            args.payment
        )
    })?;
    let customer = ctx.customer(args.email.as_deref());
    let interactive = !args.yes && !ctx.output.is_json();

    let shipping = ShippingDetails::new(
        field(args.name, "Recipient name", interactive)?,
        field(args.address, "Delivery address", interactive)?,
        field(args.phone, "Contact number", interactive)?,
    );
    let mut form = CheckoutForm::new(shipping, payment_method);
    if let Some(path) = &args.prescription {
        let path = ctx.resolve_path(&path.to_string_lossy());
        let bytes = std::fs::read(&path)
            .with_context(|| format!("Failed to read prescription {}", path.display()))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "prescription".to_string());
        let content_type = PrescriptionFile::content_type_for(&file_name);
        ctx.output.debug(&format!(
            "Attaching {} ({}, {})",
            file_name,
            content_type,
            format_bytes(bytes.len() as u64)
        ));
        form = form.with_prescription(PrescriptionFile::new(file_name, content_type, bytes));
    }

    if interactive {
        crate::commands::cart::print_cart(&cart, ctx)?;
        ctx.output.kv("payment", payment_method.label());
        let confirmed = Confirm::new()
            .with_prompt("Place this order?")
            .default(true)
            .interact()?;
        if !confirmed {
            ctx.output.info("Cancelled.");
            return Ok(());
        }
    }

    let flow = ctx.checkout_flow()?;
    let spinner = ctx.output.spinner(match payment_method {
        PaymentMethod::CashOnDelivery => "Placing order...",
        PaymentMethod::Online => "Starting payment...",
    });
    let result = flow.submit(&mut cart, &customer, &form).await;
    spinner.finish_and_clear();

    let outcome = result.map_err(|e| anyhow!(e.user_message()))?;
    report(&outcome, ctx);
    Ok(())
}

/// Take a flag value, or ask for it when running interactively.
fn field(value: Option<String>, prompt: &str, interactive: bool) -> Result<String> {
    match value {
        Some(value) => Ok(value),
        None if interactive => Ok(Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?),
        None => Ok(String::new()),
    }
}

fn report(outcome: &CheckoutOutcome, ctx: &Context) {
    let placed_at = Local::now();

    if ctx.output.is_json() {
        let value = match outcome {
            CheckoutOutcome::Placed { total } => json!({
                "status": "placed",
                "message": outcome.user_message(),
                "total": total.display_amount(),
                "placed_at": placed_at.to_rfc3339(),
            }),
            CheckoutOutcome::RedirectToGateway { url } => json!({
                "status": "redirect",
                "message": outcome.user_message(),
                "url": url,
                "placed_at": placed_at.to_rfc3339(),
            }),
        };
        ctx.output.json(&value);
        return;
    }

    ctx.output.success(outcome.user_message());
    match outcome {
        CheckoutOutcome::Placed { total } => {
            ctx.output.kv("total", &total.display());
            ctx.output.kv("payment", PaymentMethod::CashOnDelivery.label());
        }
        CheckoutOutcome::RedirectToGateway { url } => {
            ctx.output.info("Complete your payment at:");
            ctx.output.info(url);
        }
    }
    ctx.output
        .kv("placed at", &placed_at.format("%Y-%m-%d %H:%M").to_string());
}
