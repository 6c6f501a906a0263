//! Strategy C: walk up from product links to the nearest priced ancestor.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use super::cards::read_region;
use super::text::element_text;
use super::RawCandidate;
use crate::adapter::ExtractionRules;
use crate::dedup::Deduplicator;

static ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("valid selector"));

const MAX_ANCESTOR_DEPTH: usize = 8;

pub(crate) fn extract(
    document: &Html,
    rules: &ExtractionRules,
    dedup: &mut Deduplicator,
) -> Vec<RawCandidate> {
    let mut candidates = Vec::new();

    for anchor in document.select(&ANCHOR) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let Some(sku) = rules
            .product_link
            .captures(href)
            .and_then(|c| c.get(1).or_else(|| c.get(0)))
            .map(|m| m.as_str().to_owned())
        else {
            continue;
        };
        if dedup.contains(&sku) {
            continue;
        }

        let region = priced_ancestor(anchor, rules).unwrap_or(anchor);
        let Some(mut candidate) = read_region(region, rules, Some(sku)) else {
            continue;
        };
        // The region may hold several links; the one we walked from is the product.
        if let Some(url) = super::text::resolve_url(&rules.base_url, href) {
            candidate.product_url = Some(url);
        }
        if dedup.insert(&candidate.sku) {
            candidates.push(candidate);
        }
    }

    candidates
}

/// Nearest ancestor (at most eight levels up) whose text carries a price.
fn priced_ancestor<'a>(anchor: ElementRef<'a>, rules: &ExtractionRules) -> Option<ElementRef<'a>> {
    anchor
        .ancestors()
        .filter_map(ElementRef::wrap)
        .take(MAX_ANCESTOR_DEPTH)
        .find(|ancestor| rules.currency.contains(&element_text(*ancestor)))
}
