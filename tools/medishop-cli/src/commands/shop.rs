//! Shop listing command.

use anyhow::{Context as _, Result};
use medishop_commerce::cart::CartAccess;
use medishop_commerce::search::{ShopPage, ShopQuery, SortOption};
use medishop_commerce::services::CatalogService;

use super::ShopArgs;
use crate::context::Context;
use crate::output::{cart_badge, stock_label, truncate};

/// Run the shop command.
pub async fn run(args: ShopArgs, ctx: &Context) -> Result<()> {
    let query = build_query(&args, ctx.config.shop.per_page);
    let api = ctx.api()?;

    let spinner = ctx.output.spinner("Loading medicines...");
    let medicines = api.list_medicines(query.search.as_deref()).await;
    spinner.finish_and_clear();
    let medicines = medicines.context("Failed to load medicines")?;
    ctx.output.debug(&format!("{} medicine(s) from the catalog", medicines.len()));

    let cart = ctx.open_cart()?;
    let page = query.apply(&medicines, cart.state());

    if ctx.output.is_json() {
        ctx.output.json(&page);
        return Ok(());
    }

    print_page(&page, &query, ctx);
    Ok(())
}

/// Flags to query. Filters are applied before the page so the page is kept.
fn build_query(args: &ShopArgs, default_per_page: usize) -> ShopQuery {
    let mut query = ShopQuery::new().with_per_page(args.per_page.unwrap_or(default_per_page));
    if let Some(search) = &args.search {
        query = query.with_search(search.as_str());
    }
    if let Some(category) = &args.category {
        query = query.with_category(category.as_str());
    }
    if let Some(form) = &args.form {
        query = query.with_form(form.as_str());
    }
    if let Some(required) = args.prescription {
        query = query.with_prescription(required);
    }
    if let Some(sort) = &args.sort {
        query = query.with_sort(SortOption::from_param(sort));
    }
    query.with_page(args.page)
}

fn print_page(page: &ShopPage, query: &ShopQuery, ctx: &Context) {
    let title = match &query.search {
        Some(term) => format!("Medicines matching \"{term}\""),
        None => "Medicines".to_string(),
    };
    ctx.output.header(&title);

    if page.entries.is_empty() {
        ctx.output.info("No medicines found.");
        return;
    }

    let widths = [26, 28, 12, 10, 6, 14];
    ctx.output
        .table_row(&["ID", "NAME", "FORM", "PRICE", "STOCK", ""], &widths);
    for entry in &page.entries {
        let m = &entry.medicine;
        let name = if m.prescription_required {
            format!("{} (Rx)", m.name)
        } else {
            m.name.clone()
        };
        ctx.output.table_row(
            &[
                m.id.as_str(),
                &truncate(&name, widths[1]),
                m.form.as_deref().unwrap_or("-"),
                &m.price.display(),
                &stock_label(m.quantity),
                &cart_badge(entry.button),
            ],
            &widths,
        );
    }

    let p = &page.pagination;
    let pages: Vec<String> = page
        .page_numbers
        .iter()
        .map(|n| {
            if *n == p.page {
                format!("[{n}]")
            } else {
                n.to_string()
            }
        })
        .collect();
    ctx.output.info("");
    ctx.output.info(&format!(
        "Page {} of {} ({} medicine(s))   {}",
        p.page,
        p.total_pages,
        p.total,
        pages.join(" ")
    ));
    if query.sort != SortOption::None {
        ctx.output.debug(&format!("Sorted by {}", query.sort.display_name()));
    }
}
