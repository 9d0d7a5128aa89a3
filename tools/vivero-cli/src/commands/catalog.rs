//! List products through the store API.

use anyhow::{Context as _, Result};
use vivero_storefront::{RequestLocale, StorefrontClient};

use super::CatalogArgs;
use crate::context::Context;

/// Run the catalog command.
pub async fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let backend = ctx.config.backend();
    if backend.publishable_key.is_none() {
        ctx.output
            .warn("No publishable key configured; the store API will likely reject the request");
    }

    let client = StorefrontClient::builder(backend)
        .with_locale()
        .build()
        .context("Failed to build storefront client")?;

    let locale = args.locale.or_else(|| ctx.config.storefront.locale.clone());
    ctx.output.debug(&format!(
        "GET {} (locale: {})",
        client.url("/store/products"),
        locale.as_deref().unwrap_or("none")
    ));

    let page = RequestLocale::scope(locale, client.list_products(args.limit))
        .await
        .context("Failed to list products")?;

    if ctx.output.is_json() {
        ctx.output.json(&page.products);
        return Ok(());
    }

    ctx.output
        .header(&format!("Products ({} of {})", page.products.len(), page.count));

    if page.products.is_empty() {
        ctx.output.info("No products found");
        return Ok(());
    }

    let widths = [24, 36, 24];
    ctx.output.table_row(&["HANDLE", "TITLE", "SKU"], &widths);
    for product in &page.products {
        let skus: Vec<&str> = product
            .variants
            .iter()
            .filter_map(|v| v.sku.as_deref())
            .collect();
        let skus = skus.join(", ");
        ctx.output.table_row(
            &[product.handle.as_str(), product.title.as_str(), skus.as_str()],
            &widths,
        );
    }

    Ok(())
}
