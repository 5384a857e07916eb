//! Medicine detail command.

use anyhow::{bail, Context as _, Result};
use medishop_commerce::cart::QuantityPicker;
use medishop_commerce::catalog::{related_medicines, Medicine};
use medishop_commerce::services::CatalogService;
use medishop_commerce::ProductId;
use serde::Serialize;

use super::MedicineArgs;
use crate::context::Context;
use crate::output::stock_label;

#[derive(Serialize)]
struct MedicineDetail<'a> {
    medicine: &'a Medicine,
    in_cart: bool,
    max_quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    related: Option<Vec<&'a Medicine>>,
}

/// Run the medicine command.
pub async fn run(args: MedicineArgs, ctx: &Context) -> Result<()> {
    let api = ctx.api()?;
    let id = ProductId::new(args.id.trim());

    let spinner = ctx.output.spinner("Loading medicine...");
    let found = api.get_medicine(&id).await;
    spinner.finish_and_clear();

    let Some(medicine) = found.context("Failed to load medicine")? else {
        bail!("Medicine not found: {}", id);
    };

    let catalog = if args.related {
        api.list_medicines(None)
            .await
            .context("Failed to load related medicines")?
    } else {
        Vec::new()
    };
    let related = args
        .related
        .then(|| related_medicines(&catalog, &medicine));

    let cart = ctx.open_cart()?;
    let detail = MedicineDetail {
        medicine: &medicine,
        in_cart: cart.store().is_in_cart(&medicine.id),
        max_quantity: QuantityPicker::for_medicine(&medicine).max(),
        related,
    };

    if ctx.output.is_json() {
        ctx.output.json(&detail);
        return Ok(());
    }

    print_detail(&detail, ctx);
    Ok(())
}

fn print_detail(detail: &MedicineDetail<'_>, ctx: &Context) {
    let m = detail.medicine;
    ctx.output.header(&m.name);
    ctx.output.kv("id", m.id.as_str());
    ctx.output.kv("price", &m.price.display());
    for (key, value) in [
        ("generic", &m.generic),
        ("brand", &m.brand),
        ("form", &m.form),
        ("category", &m.category),
        ("manufacturer", &m.manufacturer),
        ("expires", &m.expiry_date),
    ] {
        if let Some(value) = value {
            ctx.output.kv(key, value);
        }
    }
    if !m.symptoms.is_empty() {
        ctx.output.kv("treats", &m.symptoms.join(", "));
    }
    if m.prescription_required {
        ctx.output.kv("prescription", "required");
    }

    if m.is_out_of_stock() {
        ctx.output.warn("Out of stock");
    } else {
        ctx.output.kv("in stock", &stock_label(m.quantity));
        ctx.output.kv("max per order", &detail.max_quantity.to_string());
    }
    if detail.in_cart {
        ctx.output.info("Already in your cart");
    }

    if let Some(description) = &m.description {
        ctx.output.info("");
        ctx.output.info(description);
    }

    if let Some(related) = &detail.related {
        ctx.output.header("Related medicines");
        if related.is_empty() {
            ctx.output.info("None found.");
        }
        for r in related {
            ctx.output
                .list_item(&format!("{}  {}  ({})", r.name, r.price.display(), r.id));
        }
    }
}
