//! Command handlers.
//!
//! Each handler builds one `SupplierScraper` per supplier over the HTTP
//! browser and prints the resulting records to stdout as JSON. Logs go to
//! stderr so the output can be piped.

use std::io::Write;

use anyhow::Context;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use supplyscan_core::{AppConfig, ScrapedProduct, SupplierConfig, SuppliersFile};
use supplyscan_scraper::{HttpBrowser, ScrapeSettings, SupplierAdapter, SupplierScraper};

#[derive(Debug, Serialize)]
struct SupplierSummary<'a> {
    slug: String,
    name: &'a str,
    profile: String,
    base_url: &'a str,
    categories: Vec<&'a str>,
    deals: bool,
    coupons: bool,
}

pub(crate) fn list_suppliers(registry: &SuppliersFile) -> anyhow::Result<()> {
    let summaries: Vec<SupplierSummary<'_>> = registry
        .enabled()
        .map(|s| SupplierSummary {
            slug: s.slug(),
            name: &s.name,
            profile: s.profile_name(),
            base_url: &s.base_url,
            categories: s.category_urls.keys().map(String::as_str).collect(),
            deals: s.deals_url.is_some(),
            coupons: s.coupons_url.is_some(),
        })
        .collect();
    print_json(&summaries)
}

pub(crate) async fn products(
    config: &AppConfig,
    registry: &SuppliersFile,
    slug: &str,
    category: Option<&str>,
) -> anyhow::Result<()> {
    let supplier = find_supplier(registry, slug)?;
    if let Some(category) = category {
        if !supplier.category_urls.contains_key(category) {
            let known: Vec<&str> = supplier.category_urls.keys().map(String::as_str).collect();
            anyhow::bail!(
                "supplier '{slug}' has no category '{category}' (known: {})",
                known.join(", ")
            );
        }
    }

    let scraper = build_scraper(config, supplier)?;
    let products = scraper.scrape_products(category).await;
    tracing::info!(
        supplier = scraper.adapter().name(),
        profile = scraper.adapter().profile_name(),
        count = products.len(),
        "products scraped"
    );
    print_json(&products)
}

/// Scrapes every enabled supplier, at most `max_concurrent_suppliers` at a
/// time. A supplier whose adapter cannot be built is logged and skipped.
pub(crate) async fn products_all(
    config: &AppConfig,
    registry: &SuppliersFile,
) -> anyhow::Result<()> {
    let max_concurrent = config.max_concurrent_suppliers.max(1);

    let results: Vec<Vec<ScrapedProduct>> = stream::iter(registry.enabled())
        .map(|supplier| async move {
            match build_scraper(config, supplier) {
                Ok(scraper) => scraper.scrape_products(None).await,
                Err(e) => {
                    tracing::error!(supplier = %supplier.name, error = %e, "skipping supplier");
                    Vec::new()
                }
            }
        })
        .buffer_unordered(max_concurrent)
        .collect()
        .await;

    let products: Vec<ScrapedProduct> = results.into_iter().flatten().collect();
    tracing::info!(count = products.len(), "all suppliers scraped");
    print_json(&products)
}

pub(crate) async fn deals(
    config: &AppConfig,
    registry: &SuppliersFile,
    slug: &str,
) -> anyhow::Result<()> {
    let supplier = find_supplier(registry, slug)?;
    if supplier.deals_url.is_none() {
        tracing::info!(supplier = %supplier.name, "no deals page configured");
    }
    let scraper = build_scraper(config, supplier)?;
    print_json(&scraper.scrape_deals().await)
}

pub(crate) async fn coupons(
    config: &AppConfig,
    registry: &SuppliersFile,
    slug: &str,
) -> anyhow::Result<()> {
    let supplier = find_supplier(registry, slug)?;
    let scraper = build_scraper(config, supplier)?;
    print_json(&scraper.scrape_coupons().await)
}

fn find_supplier<'a>(registry: &'a SuppliersFile, slug: &str) -> anyhow::Result<&'a SupplierConfig> {
    registry.find(slug).ok_or_else(|| {
        let known: Vec<String> = registry.enabled().map(SupplierConfig::slug).collect();
        anyhow::anyhow!(
            "supplier '{slug}' not found or disabled (enabled: {})",
            known.join(", ")
        )
    })
}

fn build_scraper(
    config: &AppConfig,
    supplier: &SupplierConfig,
) -> anyhow::Result<SupplierScraper<HttpBrowser>> {
    let adapter = SupplierAdapter::from_config(supplier)
        .with_context(|| format!("building adapter for supplier '{}'", supplier.name))?;
    let browser = HttpBrowser::new(config.nav_timeout_secs, &config.user_agent)
        .context("building HTTP browser")?;
    Ok(SupplierScraper::new(
        browser,
        adapter,
        ScrapeSettings::from_app_config(config),
    ))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
