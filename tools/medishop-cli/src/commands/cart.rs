//! Cart commands.

use anyhow::{bail, Context as _, Result};
use dialoguer::Confirm;
use medishop_commerce::cart::{CartAccess, CartLineItem, PersistentCart};
use medishop_commerce::services::CatalogService;
use medishop_commerce::ProductId;
use serde::Serialize;

use super::{CartArgs, CartCommand};
use crate::context::Context;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    match args.command {
        Some(CartCommand::Show) | None => show_cart(ctx),
        Some(CartCommand::Add { id, quantity }) => add_item(&id, quantity, ctx).await,
        Some(CartCommand::Update { id, quantity }) => update_item(&id, quantity, ctx),
        Some(CartCommand::Remove { id }) => remove_item(&id, ctx),
        Some(CartCommand::Clear { yes }) => clear_cart(yes, ctx),
    }
}

#[derive(Serialize)]
struct CartSummary<'a> {
    items: &'a [CartLineItem],
    item_count: usize,
    unit_count: i64,
    total: String,
    requires_prescription: bool,
}

fn show_cart(ctx: &Context) -> Result<()> {
    let cart = ctx.open_cart()?;
    print_cart(&cart, ctx)
}

pub(crate) fn print_cart(cart: &PersistentCart, ctx: &Context) -> Result<()> {
    let store = cart.store();
    let total = store.total().context("Could not calculate the cart total")?;

    if ctx.output.is_json() {
        ctx.output.json(&CartSummary {
            items: store.items(),
            item_count: store.item_count(),
            unit_count: store.unit_count(),
            total: total.display_amount(),
            requires_prescription: store.requires_prescription(),
        });
        return Ok(());
    }

    ctx.output.header(&format!("Cart ({})", store.item_count()));
    if store.is_empty() {
        ctx.output.info("Your cart is empty.");
        ctx.output.info("Browse medicines with `medishop shop`.");
        return Ok(());
    }

    let widths = [26, 28, 10, 5, 10];
    ctx.output
        .table_row(&["ID", "NAME", "PRICE", "QTY", "SUBTOTAL"], &widths);
    for item in store.items() {
        let name = if item.prescription_required {
            format!("{} (Rx)", item.name)
        } else {
            item.name.clone()
        };
        let subtotal = item.subtotal()?;
        ctx.output.table_row(
            &[
                item.product_id.as_str(),
                &crate::output::truncate(&name, widths[1]),
                &item.price.display(),
                &item.quantity.to_string(),
                &subtotal.display(),
            ],
            &widths,
        );
    }
    ctx.output.info("");
    ctx.output.kv("total", &total.display());
    if store.requires_prescription() {
        ctx.output
            .warn("A prescription image is required at checkout (--prescription <file>).");
    }
    Ok(())
}

async fn add_item(id: &str, quantity: i64, ctx: &Context) -> Result<()> {
    if quantity <= 0 {
        bail!("Quantity must be at least 1");
    }

    let api = ctx.api()?;
    let id = ProductId::new(id.trim());
    let spinner = ctx.output.spinner("Checking stock...");
    let found = api.get_medicine(&id).await;
    spinner.finish_and_clear();

    let Some(medicine) = found.context("Failed to load medicine")? else {
        bail!("Medicine not found: {}", id);
    };

    let mut cart = ctx.open_cart()?;
    let before = cart
        .store()
        .get_item(&medicine.id)
        .map_or(0, |item| item.quantity);
    let now = cart
        .add_item(CartLineItem::from_medicine(&medicine, quantity))
        .with_context(|| format!("Could not add {} to the cart", medicine.name))?;

    if was_capped(before, quantity, now) {
        ctx.output.warn(&format!(
            "Only {} of {} can be ordered; quantity capped",
            now, medicine.name
        ));
    }
    ctx.output
        .success(&format!("{} in cart: {}", medicine.name, now));
    print_totals(&cart, ctx)
}

fn update_item(id: &str, quantity: i64, ctx: &Context) -> Result<()> {
    let mut cart = ctx.open_cart()?;
    let id = ProductId::new(id.trim());

    if !cart.update_quantity(&id, quantity)? {
        ctx.output.info(&format!("{} is not in the cart", id));
        return Ok(());
    }

    match cart.store().get_item(&id) {
        Some(item) => ctx
            .output
            .success(&format!("{} quantity set to {}", item.name, item.quantity)),
        None => ctx.output.success(&format!("Removed {}", id)),
    }
    print_totals(&cart, ctx)
}

fn remove_item(id: &str, ctx: &Context) -> Result<()> {
    let mut cart = ctx.open_cart()?;
    let id = ProductId::new(id.trim());

    if cart.remove_item(&id)? {
        ctx.output.success(&format!("Removed {}", id));
        print_totals(&cart, ctx)?;
    } else {
        ctx.output.info(&format!("{} is not in the cart", id));
    }
    Ok(())
}

fn clear_cart(yes: bool, ctx: &Context) -> Result<()> {
    let mut cart = ctx.open_cart()?;
    if cart.store().is_empty() {
        ctx.output.info("Your cart is already empty.");
        return Ok(());
    }

    if !yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Remove all {} item(s) from the cart?",
                cart.store().item_count()
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.info("Cancelled.");
            return Ok(());
        }
    }

    cart.clear()?;
    ctx.output.success("Cart cleared");
    Ok(())
}

fn print_totals(cart: &PersistentCart, ctx: &Context) -> Result<()> {
    let store = cart.store();
    let total = store.total().context("Could not calculate the cart total")?;
    ctx.output.kv(
        "cart",
        &format!(
            "{} item(s), {} unit(s), {}",
            store.item_count(),
            store.unit_count(),
            total.display()
        ),
    );
    Ok(())
}

/// Whether the store gave back fewer units than were asked for.
fn was_capped(before: i64, requested: i64, now: i64) -> bool {
    now < before.saturating_add(requested)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_was_capped() {
        assert!(!was_capped(0, 3, 3));
        assert!(was_capped(2, 5, 4));
        assert!(was_capped(5, i64::MAX, 9999));
        assert!(!was_capped(i64::MAX, 1, i64::MAX));
    }
}
