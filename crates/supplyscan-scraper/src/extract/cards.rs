//! Strategy B: product-card DOM walk.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use super::text::{element_text, fallback_sku, resolve_url};
use super::RawCandidate;
use crate::adapter::ExtractionRules;
use crate::dedup::Deduplicator;

fn selector(source: &str) -> Selector {
    Selector::parse(source).expect("valid selector")
}

/// Name sources in priority order.
static HEADINGS: LazyLock<[Selector; 3]> = LazyLock::new(|| {
    [
        selector("h1, h2, h3, h4"),
        selector("[class*='title'], [class*='Title']"),
        selector("[class*='name'], [class*='Name']"),
    ]
});
static LINK: LazyLock<Selector> = LazyLock::new(|| selector("a[href]"));
static IMAGE: LazyLock<Selector> = LazyLock::new(|| selector("img"));
static BRAND: LazyLock<Selector> =
    LazyLock::new(|| selector("[data-brand], [class*='brand'], [class*='Brand']"));
static DESCRIPTION: LazyLock<Selector> =
    LazyLock::new(|| selector("[class*='desc'], [class*='Desc']"));
static STOCK: LazyLock<Selector> = LazyLock::new(|| {
    selector("[class*='stock'], [class*='Stock'], [class*='availability'], [class*='Availability']")
});
static HIGHLIGHT: LazyLock<Selector> = LazyLock::new(|| selector("li"));
static EXPIRY: LazyLock<Selector> = LazyLock::new(|| {
    selector("time, [class*='expir'], [class*='Expir'], [class*='ends'], [class*='countdown']")
});

const MAX_HIGHLIGHTS: usize = 5;
pub(crate) const MIN_NAME_CHARS: usize = 3;

/// Walks the first card selector with more than two matches.
pub(crate) fn extract(
    document: &Html,
    rules: &ExtractionRules,
    dedup: &mut Deduplicator,
) -> Vec<RawCandidate> {
    let Some(cards) = first_selector_matching(document, &rules.card_selectors, 3) else {
        return Vec::new();
    };

    cards
        .into_iter()
        .filter_map(|card| read_region(card, rules, None))
        .filter(|candidate| dedup.insert(&candidate.sku))
        .collect()
}

/// Elements matched by the first selector yielding at least `min_matches`.
pub(crate) fn first_selector_matching<'a>(
    document: &'a Html,
    selectors: &[Selector],
    min_matches: usize,
) -> Option<Vec<ElementRef<'a>>> {
    selectors.iter().find_map(|selector| {
        let matched: Vec<ElementRef<'a>> = document.select(selector).collect();
        (matched.len() >= min_matches).then_some(matched)
    })
}

/// Reads one listing region into a candidate.
///
/// `sku_hint` is used when the caller already derived the SKU (anchor
/// walk); otherwise it comes from data attributes, then the product-link
/// pattern, then a hash of URL and name. Returns `None` for regions without
/// a usable name.
pub(crate) fn read_region(
    region: ElementRef<'_>,
    rules: &ExtractionRules,
    sku_hint: Option<String>,
) -> Option<RawCandidate> {
    let links: Vec<ElementRef<'_>> = std::iter::once(region)
        .filter(|el| el.value().name() == "a" && el.value().attr("href").is_some())
        .chain(region.select(&LINK))
        .collect();
    let product_link = links
        .iter()
        .find(|a| {
            a.value()
                .attr("href")
                .is_some_and(|href| rules.product_link.is_match(href))
        })
        .or_else(|| links.first())
        .copied();

    let name = HEADINGS
        .iter()
        .find_map(|heading| {
            region
                .select(heading)
                .map(element_text)
                .find(|text| !text.is_empty())
        })
        .or_else(|| link_text(product_link, &links))?;
    if name.chars().count() < MIN_NAME_CHARS {
        return None;
    }

    let product_url = product_link
        .and_then(|a| a.value().attr("href"))
        .and_then(|href| resolve_url(&rules.base_url, href));

    let sku = sku_hint
        .or_else(|| sku_from_attributes(region, &rules.sku_attributes))
        .or_else(|| sku_from_links(&links, rules))
        .unwrap_or_else(|| fallback_sku(product_url.as_deref().unwrap_or_default(), &name));

    let text = element_text(region);
    let mut prices = rules.currency.tokens(&text).into_iter();
    let current_price_text = prices.next();
    let regular_price_text = prices.next();

    let stock_status_text = region
        .select(&STOCK)
        .map(element_text)
        .find(|t| !t.is_empty())
        .unwrap_or_else(|| text.clone());

    let image_url = region.select(&IMAGE).find_map(|img| {
        ["src", "data-src"]
            .iter()
            .filter_map(|attr| img.value().attr(attr))
            .find(|src| !src.trim().is_empty() && !src.starts_with("data:"))
            .and_then(|src| resolve_url(&rules.base_url, src))
    });

    let brand_hint = region
        .value()
        .attr("data-brand")
        .map(str::to_owned)
        .or_else(|| {
            region.select(&BRAND).find_map(|el| {
                el.value()
                    .attr("data-brand")
                    .map(str::to_owned)
                    .or_else(|| Some(element_text(el)))
            })
        })
        .filter(|b| !b.trim().is_empty());

    let description = region
        .select(&DESCRIPTION)
        .map(element_text)
        .find(|t| !t.is_empty());

    let highlights = region
        .select(&HIGHLIGHT)
        .map(element_text)
        .filter(|t| !t.is_empty())
        .take(MAX_HIGHLIGHTS)
        .collect();

    let expiry_text = region.select(&EXPIRY).find_map(|el| {
        el.value()
            .attr("datetime")
            .map(str::to_owned)
            .or_else(|| Some(element_text(el)))
            .filter(|t| !t.is_empty())
    });

    Some(RawCandidate {
        sku,
        name,
        current_price_text,
        regular_price_text,
        image_url,
        product_url,
        stock_status_text,
        brand_hint,
        description,
        highlights,
        expiry_text,
        text,
    })
}

/// Text of the product link, else of the first link that has any.
fn link_text(product_link: Option<ElementRef<'_>>, links: &[ElementRef<'_>]) -> Option<String> {
    product_link
        .into_iter()
        .chain(links.iter().copied())
        .map(element_text)
        .find(|text| !text.is_empty())
}

fn sku_from_attributes(region: ElementRef<'_>, attributes: &[String]) -> Option<String> {
    let on_region = attributes
        .iter()
        .find_map(|attr| non_empty(region.value().attr(attr)));
    on_region.or_else(|| {
        region
            .descendants()
            .filter_map(ElementRef::wrap)
            .find_map(|el| {
                attributes
                    .iter()
                    .find_map(|attr| non_empty(el.value().attr(attr)))
            })
    })
}

fn sku_from_links(links: &[ElementRef<'_>], rules: &ExtractionRules) -> Option<String> {
    links.iter().find_map(|a| {
        let href = a.value().attr("href")?;
        let captures = rules.product_link.captures(href)?;
        captures.get(1).map(|m| m.as_str().to_owned())
    })
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

#[cfg(test)]
#[path = "cards_test.rs"]
mod tests;
