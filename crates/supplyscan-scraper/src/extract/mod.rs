//! Multi-strategy listing extraction.
//!
//! Strategies run in a fixed order and the first one that yields anything
//! wins:
//!
//! 1. [`Strategy::Embedded`]: `(sku, name, price)` triples in inline scripts.
//! 2. [`Strategy::Cards`]: the first product-card selector with more than two
//!    matches.
//! 3. [`Strategy::Anchors`]: product links, each widened to its nearest
//!    priced ancestor.
//!
//! Everything here is synchronous and works on a parsed [`Html`] snapshot,
//! which is `!Send`; parse, extract, and drop it without crossing an
//! `.await`.

mod anchors;
mod cards;
mod coupons;
mod embedded;
pub(crate) mod text;

use chrono::{DateTime, Utc};
use scraper::Html;
use supplyscan_core::{ScrapedCoupon, ScrapedDeal, ScrapedProduct};

use crate::adapter::{ExtractionRules, SupplierAdapter};
use crate::assemble::{assemble_deal, assemble_product, AssemblyContext};
use crate::dedup::Deduplicator;

pub use text::CurrencyMatcher;

/// Unvalidated listing data from one region of one snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawCandidate {
    pub sku: String,
    pub name: String,
    pub current_price_text: Option<String>,
    pub regular_price_text: Option<String>,
    pub image_url: Option<String>,
    pub product_url: Option<String>,
    /// Text to classify against the stock vocabulary.
    pub stock_status_text: String,
    pub brand_hint: Option<String>,
    pub description: Option<String>,
    pub highlights: Vec<String>,
    pub expiry_text: Option<String>,
    /// Whitespace-collapsed text of the whole region.
    pub text: String,
}

impl RawCandidate {
    pub(crate) fn new(sku: String, name: String) -> Self {
        Self {
            sku,
            name,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Embedded,
    Cards,
    Anchors,
}

impl Strategy {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Embedded => "embedded",
            Strategy::Cards => "cards",
            Strategy::Anchors => "anchors",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of [`extract_candidates`]. `strategy` is `None` when every
/// strategy came up empty.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub strategy: Option<Strategy>,
    pub candidates: Vec<RawCandidate>,
}

type StrategyFn = fn(&Html, &ExtractionRules, &mut Deduplicator) -> Vec<RawCandidate>;

const PIPELINE: [(Strategy, StrategyFn); 3] = [
    (Strategy::Embedded, embedded::extract),
    (Strategy::Cards, cards::extract),
    (Strategy::Anchors, anchors::extract),
];

/// Runs the strategies in order and returns the first non-empty result.
///
/// `dedup` is shared across strategies, so a SKU is never emitted twice
/// within one call.
pub fn extract_candidates(
    document: &Html,
    rules: &ExtractionRules,
    dedup: &mut Deduplicator,
) -> Extraction {
    for (strategy, run) in PIPELINE {
        let candidates = run(document, rules, dedup);
        if candidates.is_empty() {
            tracing::debug!(strategy = strategy.as_str(), "strategy found no candidates");
            continue;
        }
        tracing::debug!(
            strategy = strategy.as_str(),
            count = candidates.len(),
            "extraction strategy matched"
        );
        return Extraction {
            strategy: Some(strategy),
            candidates,
        };
    }

    Extraction::default()
}

/// Extracts and assembles the products on one listing page.
///
/// SKUs are unique within the returned list.
#[must_use]
pub fn extract_products(
    html: &str,
    adapter: &SupplierAdapter,
    category: &str,
    subcategory: Option<&str>,
) -> Vec<ScrapedProduct> {
    let document = Html::parse_document(html);
    let mut dedup = Deduplicator::new();
    let extraction = extract_candidates(&document, adapter.rules(), &mut dedup);

    let ctx = AssemblyContext {
        adapter,
        category,
        subcategory,
        now: Utc::now(),
    };
    extraction
        .candidates
        .into_iter()
        .map(|candidate| assemble_product(candidate, &ctx))
        .collect()
}

/// Extracts and assembles the deals on a deals page.
///
/// Deal tiles are matched with the looser deal selectors (a single match is
/// enough), falling back to the anchor walk. Candidates without a deal
/// price are dropped.
#[must_use]
pub fn extract_deals(
    html: &str,
    adapter: &SupplierAdapter,
    source_url: &str,
    now: DateTime<Utc>,
) -> Vec<ScrapedDeal> {
    let document = Html::parse_document(html);
    let rules = adapter.rules();
    let mut dedup = Deduplicator::new();

    let mut candidates: Vec<RawCandidate> =
        cards::first_selector_matching(&document, &rules.deal_selectors, 1)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|tile| cards::read_region(tile, rules, None))
            .filter(|candidate| dedup.insert(&candidate.sku))
            .collect();
    if candidates.is_empty() {
        tracing::debug!(source_url, "no deal tiles matched; falling back to anchor walk");
        candidates = anchors::extract(&document, rules, &mut dedup);
    }

    let found = candidates.len();
    let deals: Vec<ScrapedDeal> = candidates
        .into_iter()
        .filter_map(|candidate| assemble_deal(candidate, adapter, source_url, now))
        .collect();
    if deals.len() < found {
        tracing::debug!(
            source_url,
            dropped = found - deals.len(),
            "dropped deal candidates without a price"
        );
    }
    deals
}

/// Extracts voucher codes from a coupons page.
#[must_use]
pub fn extract_coupons(
    html: &str,
    adapter: &SupplierAdapter,
    source_url: &str,
    now: DateTime<Utc>,
) -> Vec<ScrapedCoupon> {
    let document = Html::parse_document(html);
    coupons::extract(&document, adapter, source_url, now)
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
