//! Order history command.

use anyhow::{bail, Context as _, Result};
use medishop_commerce::checkout::{OrderSummary, OrderedProduct};
use medishop_commerce::services::OrderService;

use super::OrdersArgs;
use crate::context::Context;

/// Run the orders command.
pub async fn run(args: OrdersArgs, ctx: &Context) -> Result<()> {
    if ctx.config.api.access_token.is_none() {
        bail!("Please log in to view your orders (set api.access_token).");
    }

    let api = ctx.api()?;
    let spinner = ctx.output.spinner("Loading your orders...");
    let found = api.my_orders().await;
    spinner.finish_and_clear();

    let mut orders = found.context("Failed to fetch orders")?;
    if args.unpaid {
        orders.retain(OrderSummary::is_unpaid);
    }

    if ctx.output.is_json() {
        ctx.output.json(&orders);
        return Ok(());
    }

    ctx.output.header(&format!("My Orders ({})", orders.len()));
    if orders.is_empty() {
        ctx.output.info("You have no orders yet.");
        return Ok(());
    }
    ctx.output.info("Status Pending means Unpaid.");

    for order in &orders {
        ctx.output.header(&format!("Order {}", order.id));
        ctx.output.kv("created", order.created_date().unwrap_or("-"));
        ctx.output.kv("status", &order.status);
        for product in &order.products {
            ctx.output.list_item(&product_line(product));
        }
    }
    Ok(())
}

fn product_line(product: &OrderedProduct) -> String {
    format!(
        "{} (x{})",
        product.name().unwrap_or("Unknown product"),
        product.quantity
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use medishop_commerce::checkout::OrderedProductRef;
    use medishop_commerce::ProductId;

    #[test]
    fn test_product_line() {
        let named = OrderedProduct {
            product_id: Some(OrderedProductRef::Expanded {
                id: Some(ProductId::new("m1")),
                name: Some("Napa Extra".to_string()),
            }),
            quantity: 2,
        };
        assert_eq!(product_line(&named), "Napa Extra (x2)");

        let deleted = OrderedProduct {
            product_id: None,
            quantity: 1,
        };
        assert_eq!(product_line(&deleted), "Unknown product (x1)");
    }
}
