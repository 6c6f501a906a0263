//! Strategy A: product data embedded in inline scripts.
//!
//! Storefronts frequently ship their listing state as JSON (or JSON-like
//! object literals) inside `<script>` tags. A script whose payload parses as
//! JSON is walked recursively, which covers schema.org `Product` objects with
//! nested `offers`. Anything else is scanned for flat objects carrying a
//! `"sku"` key.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};
use serde_json::{Map, Value};

use super::text::{collapse_whitespace, resolve_url};
use super::RawCandidate;
use crate::adapter::ExtractionRules;
use crate::dedup::Deduplicator;

static SCRIPT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("script").expect("valid selector"));

static FLAT_SKU_OBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\{[^{}]*"sku"[^{}]*\}"#).expect("valid regex"));

static SKU_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""sku"\s*:\s*(?:"([^"]+)"|(\d+))"#).expect("valid regex")
});

static NAME_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""name"\s*:\s*"((?:[^"\\]|\\.)*)""#).expect("valid regex")
});

static PRICE_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""price"\s*:\s*(?:"([^"]*)"|(\d+(?:\.\d+)?))"#).expect("valid regex")
});

static URL_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""url"\s*:\s*"([^"]+)""#).expect("valid regex"));

const TELLTALES: [&str; 3] = [r#""products""#, r#""sku""#, r#""items""#];

/// Scans inline scripts for `(sku, name, price)` triples.
///
/// All three fields are required. The first occurrence of a SKU wins.
pub(crate) fn extract(
    document: &Html,
    rules: &ExtractionRules,
    dedup: &mut Deduplicator,
) -> Vec<RawCandidate> {
    let mut candidates = Vec::new();

    for script in document.select(&SCRIPT) {
        let body: String = script.text().collect();
        if !TELLTALES.iter().any(|t| body.contains(t)) {
            continue;
        }

        let found = match json_payload(&body) {
            Some(payload) => {
                let mut found = Vec::new();
                collect_products(&payload, &mut found);
                found
            }
            None => FLAT_SKU_OBJECT
                .find_iter(&body)
                .filter_map(|object| read_object(object.as_str()))
                .collect(),
        };

        for fields in found {
            let name = collapse_whitespace(&fields.name);
            if name.chars().count() < 3 || !dedup.insert(&fields.sku) {
                continue;
            }
            candidates.push(RawCandidate {
                current_price_text: Some(rules.currency.with_symbol(&fields.price)),
                product_url: fields
                    .url
                    .as_deref()
                    .and_then(|href| resolve_url(&rules.base_url, href)),
                image_url: fields
                    .image
                    .as_deref()
                    .and_then(|src| resolve_url(&rules.base_url, src)),
                brand_hint: fields.brand,
                text: name.clone(),
                ..RawCandidate::new(fields.sku, name)
            });
        }
    }

    candidates
}

#[derive(Debug, Default)]
struct EmbeddedFields {
    sku: String,
    name: String,
    price: String,
    url: Option<String>,
    image: Option<String>,
    brand: Option<String>,
}

/// The script body as JSON: either the whole body, or the span from the
/// first opening bracket to the last closing one (`window.__STATE__ = {..};`).
fn json_payload(body: &str) -> Option<Value> {
    let body = body.trim();
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        return Some(value);
    }
    let start = body.find(['{', '['])?;
    let end = body.rfind(['}', ']'])?;
    if end <= start {
        return None;
    }
    serde_json::from_str(&body[start..=end]).ok()
}

/// Depth-first walk collecting every object that reads as a product. A
/// matched object is not descended into, so offers and variants nested
/// inside a product do not surface on their own.
fn collect_products(value: &Value, found: &mut Vec<EmbeddedFields>) {
    match value {
        Value::Object(map) => {
            if let Some(fields) = read_map(map) {
                found.push(fields);
                return;
            }
            for child in map.values() {
                collect_products(child, found);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_products(item, found);
            }
        }
        _ => {}
    }
}

fn read_map(map: &Map<String, Value>) -> Option<EmbeddedFields> {
    let sku = map
        .get("sku")
        .or_else(|| map.get("productID"))
        .and_then(scalar_text)?;
    let name = map.get("name")?.as_str()?.to_owned();
    let offer = first_offer(map);
    let price = map.get("price").and_then(scalar_text).or_else(|| {
        offer
            .and_then(|o| o.get("price").or_else(|| o.get("lowPrice")))
            .and_then(scalar_text)
    })?;
    let url = map
        .get("url")
        .or_else(|| offer.and_then(|o| o.get("url")))
        .and_then(Value::as_str)
        .map(str::to_owned);
    let image = match map.get("image") {
        Some(Value::String(src)) => Some(src.clone()),
        Some(Value::Array(list)) => list.iter().find_map(Value::as_str).map(str::to_owned),
        _ => None,
    };
    let brand = match map.get("brand") {
        Some(Value::String(brand)) => Some(brand.clone()),
        Some(Value::Object(brand)) => brand.get("name").and_then(Value::as_str).map(str::to_owned),
        _ => None,
    }
    .filter(|b| !b.trim().is_empty());

    Some(EmbeddedFields {
        sku,
        name,
        price,
        url,
        image,
        brand,
    })
}

fn first_offer(map: &Map<String, Value>) -> Option<&Map<String, Value>> {
    match map.get("offers")? {
        Value::Object(offer) => Some(offer),
        Value::Array(offers) => offers.iter().find_map(Value::as_object),
        _ => None,
    }
}

/// Parses one object as JSON when it is valid JSON, otherwise falls back to
/// per-field patterns (object literals with trailing commas, single values
/// spliced from templates, and so on).
fn read_object(object: &str) -> Option<EmbeddedFields> {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(object) {
        return read_map(&map);
    }

    let sku = capture_either(&SKU_FIELD, object)?;
    let name = NAME_FIELD
        .captures(object)?
        .get(1)
        .map(|m| unescape(m.as_str()))?;
    let price = capture_either(&PRICE_FIELD, object)?;
    let url = URL_FIELD
        .captures(object)
        .and_then(|c| c.get(1))
        .map(|m| unescape(m.as_str()));
    Some(EmbeddedFields {
        sku,
        name,
        price,
        url,
        ..EmbeddedFields::default()
    })
}

fn scalar_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_owned(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

fn capture_either(pattern: &Regex, haystack: &str) -> Option<String> {
    let captures = pattern.captures(haystack)?;
    let value = captures.get(1).or_else(|| captures.get(2))?.as_str().trim();
    (!value.is_empty()).then(|| value.to_owned())
}

fn unescape(raw: &str) -> String {
    serde_json::from_str::<String>(&format!("\"{raw}\"")).unwrap_or_else(|_| raw.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::rules;

    fn run(html: &str) -> Vec<RawCandidate> {
        let document = Html::parse_document(html);
        extract(&document, &rules(), &mut Deduplicator::new())
    }

    #[test]
    fn reads_json_objects_in_any_field_order() {
        let html = r#"<html><body><script>
            window.__STATE__ = {"products": [
                {"name": "Twin and Earth 2.5mm 50m", "price": "54.99", "sku": "101"},
                {"price": 3.2, "sku": 102, "name": "Wago 221 Connector"}
            ]};
        </script></body></html>"#;
        let found = run(html);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].sku, "101");
        assert_eq!(found[0].current_price_text.as_deref(), Some("£54.99"));
        assert_eq!(found[1].sku, "102");
        assert_eq!(found[1].name, "Wago 221 Connector");
        assert_eq!(found[1].current_price_text.as_deref(), Some("£3.2"));
    }

    #[test]
    fn tolerates_object_literals_that_are_not_json() {
        let html = r#"<script>var items = [{"sku": "A-1", "name": "Cable Clips 100pk", "price": "£4.10",}];</script>"#;
        let found = run(html);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].sku, "A-1");
        assert_eq!(found[0].current_price_text.as_deref(), Some("£4.10"));
    }

    #[test]
    fn objects_missing_a_field_are_skipped() {
        let html = r#"<script>{"products": [{"sku": "1", "name": "No Price Here"}, {"sku": "2", "price": "1.00"}]}</script>"#;
        assert!(run(html).is_empty());
    }

    #[test]
    fn first_occurrence_of_a_sku_wins() {
        let html = r#"<script>{"items": [
            {"sku": "7", "name": "First Listing", "price": "1.00"},
            {"sku": "7", "name": "Second Listing", "price": "2.00"}
        ]}</script>"#;
        let found = run(html);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "First Listing");
    }

    #[test]
    fn scripts_without_telltales_are_ignored() {
        let html = r#"<script>var config = {"id": "7", "name": "Tracking", "price": "0"};</script>"#;
        assert!(run(html).is_empty());
    }

    #[test]
    fn relative_urls_are_resolved() {
        let html = r#"<script>{"products": [{"sku": "9", "name": "Fused Spur", "price": "6.00", "url": "/p/fused-spur/9"}]}</script>"#;
        let found = run(html);
        assert_eq!(
            found[0].product_url.as_deref(),
            Some("https://www.example.com/p/fused-spur/9")
        );
    }

    #[test]
    fn json_ld_products_with_nested_offers() {
        let html = r#"<html><head><script type="application/ld+json">
        {
          "@context": "https://schema.org",
          "@type": "ItemList",
          "itemListElement": [
            {"@type": "ListItem", "position": 1, "item": {
              "@type": "Product", "sku": "330011", "name": "Hager 10 Way Consumer Unit",
              "image": ["/img/cu10.jpg"], "brand": {"@type": "Brand", "name": "Hager"},
              "offers": {"@type": "Offer", "price": "129.99", "priceCurrency": "GBP",
                         "url": "/p/hager-10-way/330011", "sku": "OFFER-1"}
            }},
            {"@type": "ListItem", "position": 2, "item": {
              "@type": "Product", "sku": "330012", "name": "Wylex 6A MCB",
              "offers": [{"@type": "Offer", "price": 4.5}]
            }}
          ]
        }
        </script></head><body></body></html>"#;
        let found = run(html);
        assert_eq!(found.len(), 2);

        assert_eq!(found[0].sku, "330011");
        assert_eq!(found[0].name, "Hager 10 Way Consumer Unit");
        assert_eq!(found[0].current_price_text.as_deref(), Some("£129.99"));
        assert_eq!(
            found[0].product_url.as_deref(),
            Some("https://www.example.com/p/hager-10-way/330011")
        );
        assert_eq!(
            found[0].image_url.as_deref(),
            Some("https://www.example.com/img/cu10.jpg")
        );
        assert_eq!(found[0].brand_hint.as_deref(), Some("Hager"));

        assert_eq!(found[1].sku, "330012");
        assert_eq!(found[1].current_price_text.as_deref(), Some("£4.5"));
    }

    #[test]
    fn assigned_state_objects_with_nested_values() {
        let html = r#"<script>window.__STATE__ = {"listing": {"products": [
            {"sku": "55", "name": "Cable Tie 300mm", "price": {"amount": 2}, "pricing": {"now": 1}},
            {"sku": "56", "name": "Junction Box 30A", "price": "3.10", "meta": {"colour": "white"}}
        ]}};</script>"#;
        let found = run(html);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].sku, "56");
        assert_eq!(found[0].current_price_text.as_deref(), Some("£3.10"));
    }
}
