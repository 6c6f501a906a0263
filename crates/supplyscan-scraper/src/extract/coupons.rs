//! Voucher-code extraction.

use std::collections::HashSet;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use scraper::Html;
use supplyscan_core::ScrapedCoupon;

use super::cards::first_selector_matching;
use super::text::element_text;
use crate::adapter::SupplierAdapter;
use crate::assemble::parse_expiry;

static CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bcode\s*:?\s*([A-Z0-9][A-Z0-9-]{3,})\b").expect("valid regex")
});
static PERCENT_OFF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(\d{1,3})\s*%\s*off\b").expect("valid regex"));

/// Reads every coupon tile once per code. Tiles without a code are skipped.
pub(crate) fn extract(
    document: &Html,
    adapter: &SupplierAdapter,
    source_url: &str,
    now: DateTime<Utc>,
) -> Vec<ScrapedCoupon> {
    let Some(tiles) = first_selector_matching(document, &adapter.rules().coupon_selectors, 1)
    else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    tiles
        .into_iter()
        .filter_map(|tile| {
            let text = element_text(tile);
            let code = tile
                .value()
                .attr("data-code")
                .map(str::to_owned)
                .or_else(|| CODE.captures(&text).map(|c| c[1].to_owned()))?
                .to_uppercase();
            if !seen.insert(code.clone()) {
                return None;
            }
            let discount_percentage = PERCENT_OFF
                .captures(&text)
                .and_then(|c| c[1].parse::<i32>().ok())
                .filter(|pct| (1..=100).contains(pct));
            let expires_at = parse_expiry(&text).filter(|at| *at > now);

            Some(ScrapedCoupon {
                code,
                description: text,
                discount_percentage,
                expires_at,
                source_url: source_url.to_owned(),
                supplier: adapter.name().to_owned(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::test_support::adapter_with_profile;

    #[test]
    fn reads_code_percentage_and_expiry() {
        let adapter = adapter_with_profile("toolstation");
        let html = r#"<body>
            <div class="voucher-card">Save 10% off all cable. Use code: CABLE10. Ends 31/12/2030</div>
            <div class="voucher-card" data-code="free-del">Free delivery over £25</div>
            <div class="voucher-card">Use code: CABLE10 again</div>
        </body>"#;
        let now = Utc.with_ymd_and_hms(2030, 6, 1, 0, 0, 0).unwrap();
        let document = Html::parse_document(html);
        let coupons = extract(&document, &adapter, "https://www.example.com/voucher-codes", now);

        assert_eq!(coupons.len(), 2);
        assert_eq!(coupons[0].code, "CABLE10");
        assert_eq!(coupons[0].discount_percentage, Some(10));
        assert_eq!(
            coupons[0].expires_at,
            Some(Utc.with_ymd_and_hms(2030, 12, 31, 23, 59, 59).unwrap())
        );
        assert_eq!(coupons[1].code, "FREE-DEL");
        assert_eq!(coupons[1].discount_percentage, None);
        assert_eq!(coupons[1].expires_at, None);
    }

    #[test]
    fn profiles_without_coupon_selectors_yield_nothing() {
        let adapter = adapter_with_profile("screwfix");
        let document = Html::parse_document(r#"<div class="voucher">code: SAVE20</div>"#);
        assert!(extract(&document, &adapter, "https://www.example.com/", Utc::now()).is_empty());
    }
}
