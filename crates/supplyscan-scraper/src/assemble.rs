//! Turns raw candidates into canonical records.
//!
//! Products are lenient: a candidate with no parseable price still becomes
//! a record. Deals are strict: without a deal price there is no deal.

use std::sync::LazyLock;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use regex::Regex;
use supplyscan_core::{DealType, ScrapedDeal, ScrapedProduct};

use crate::adapter::SupplierAdapter;
use crate::extract::RawCandidate;
use crate::normalize::{calculate_discount, classify_stock, infer_brand, parse_price};

/// How long a deal without an advertised end date is assumed to run.
pub const DEFAULT_DEAL_LIFETIME_DAYS: i64 = 7;

static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{4})-(\d{2})-(\d{2})\b").expect("valid regex"));
static UK_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,2})/(\d{1,2})/(\d{4})\b").expect("valid regex"));
static LONG_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(\d{1,2})(?:st|nd|rd|th)?\s+(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?,?\s+(\d{4})\b",
    )
    .expect("valid regex")
});

/// Per-page values shared by every product assembled from one snapshot.
#[derive(Debug, Clone, Copy)]
pub struct AssemblyContext<'a> {
    pub adapter: &'a SupplierAdapter,
    pub category: &'a str,
    pub subcategory: Option<&'a str>,
    pub now: DateTime<Utc>,
}

/// Builds a [`ScrapedProduct`].
///
/// The first price token is taken as the current price and the second as
/// the regular price; the product is on sale only when the regular price is
/// strictly higher.
#[must_use]
pub fn assemble_product(candidate: RawCandidate, ctx: &AssemblyContext<'_>) -> ScrapedProduct {
    let adapter = ctx.adapter;
    let current_price = parse_price(candidate.current_price_text.as_deref());
    let listed_regular = parse_price(candidate.regular_price_text.as_deref());
    let discount_percentage = calculate_discount(current_price, listed_regular);
    let is_on_sale = discount_percentage.is_some();

    let brand = infer_brand(&candidate.name, adapter.brands()).or_else(|| {
        candidate
            .brand_hint
            .as_deref()
            .map(|hint| infer_brand(hint, adapter.brands()).unwrap_or_else(|| hint.to_owned()))
    });
    let stock_status = classify_stock(&candidate.stock_status_text, adapter.stock_vocabulary());
    let product_url = candidate
        .product_url
        .unwrap_or_else(|| adapter.search_url(&candidate.name));

    ScrapedProduct {
        sku: candidate.sku,
        name: candidate.name,
        brand,
        category: ctx.category.to_owned(),
        subcategory: ctx.subcategory.map(str::to_owned),
        current_price,
        regular_price: if is_on_sale { listed_regular } else { None },
        is_on_sale,
        discount_percentage,
        description: candidate.description,
        highlights: candidate.highlights,
        image_url: candidate.image_url,
        product_url,
        stock_status,
        supplier: adapter.name().to_owned(),
        scraped_at: ctx.now,
    }
}

/// Builds a [`ScrapedDeal`], or `None` when the candidate has no parseable
/// deal price.
///
/// Without an advertised end date the deal expires
/// [`DEFAULT_DEAL_LIFETIME_DAYS`] after `now`.
#[must_use]
pub fn assemble_deal(
    candidate: RawCandidate,
    adapter: &SupplierAdapter,
    source_url: &str,
    now: DateTime<Utc>,
) -> Option<ScrapedDeal> {
    let deal_price = parse_price(candidate.current_price_text.as_deref())?;
    let listed_original = parse_price(candidate.regular_price_text.as_deref());
    let discount = calculate_discount(Some(deal_price), listed_original);
    let original_price = listed_original.filter(|_| discount.is_some());
    let discount_percentage = discount.unwrap_or(0);

    let expires_at = candidate
        .expiry_text
        .as_deref()
        .and_then(parse_expiry)
        .or_else(|| parse_expiry(&candidate.text))
        .unwrap_or_else(|| now + Duration::days(DEFAULT_DEAL_LIFETIME_DAYS));

    let deal_type = classify_deal(&candidate.text);
    let product_sku = (!candidate.sku.starts_with("gen-")).then_some(candidate.sku);

    Some(ScrapedDeal {
        product_sku,
        title: candidate.name,
        description: candidate.description,
        original_price,
        deal_price,
        discount_percentage,
        deal_type,
        expires_at,
        source_url: source_url.to_owned(),
        image_url: candidate.image_url,
        supplier: adapter.name().to_owned(),
    })
}

/// Classifies a promotion from its tile text.
#[must_use]
pub fn classify_deal(text: &str) -> DealType {
    let lower = text.to_lowercase();
    if lower.contains("clearance") {
        DealType::Clearance
    } else if ["bundle", "multi-buy", "multibuy", "multi buy"]
        .iter()
        .any(|k| lower.contains(k))
    {
        DealType::Bundle
    } else if lower.contains("flash") {
        DealType::FlashSale
    } else {
        DealType::WeeklyDeal
    }
}

/// Finds an end date in free text and returns the end of that day (UTC).
///
/// Recognises RFC 3339 timestamps, `yyyy-mm-dd`, `dd/mm/yyyy` and
/// `d Month yyyy`.
#[must_use]
pub fn parse_expiry(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Some(ts.with_timezone(&Utc));
    }

    let date = ISO_DATE
        .captures(text)
        .and_then(|c| ymd(&c[1], &c[2], &c[3]))
        .or_else(|| {
            UK_DATE
                .captures(text)
                .and_then(|c| ymd(&c[3], &c[2], &c[1]))
        })
        .or_else(|| {
            LONG_DATE.captures(text).and_then(|c| {
                let month = month_number(&c[2])?;
                ymd(&c[3], &month.to_string(), &c[1])
            })
        })?;

    Some(date.and_hms_opt(23, 59, 59)?.and_utc())
}

fn ymd(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

fn month_number(abbrev: &str) -> Option<u32> {
    const MONTHS: [&str; 12] = [
        "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
    ];
    let lower = abbrev.to_ascii_lowercase();
    MONTHS
        .iter()
        .position(|m| *m == lower)
        .and_then(|idx| u32::try_from(idx + 1).ok())
}

#[cfg(test)]
#[path = "assemble_test.rs"]
mod tests;
