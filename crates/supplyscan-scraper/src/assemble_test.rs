use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use supplyscan_core::StockStatus;

use super::*;
use crate::test_support::adapter;

fn candidate(current: Option<&str>, regular: Option<&str>) -> RawCandidate {
    RawCandidate {
        current_price_text: current.map(str::to_owned),
        regular_price_text: regular.map(str::to_owned),
        ..RawCandidate::new("12345".to_string(), "Wylex 6A MCB Type B".to_string())
    }
}

fn product(candidate: RawCandidate) -> ScrapedProduct {
    let adapter = adapter();
    let ctx = AssemblyContext {
        adapter: &adapter,
        category: "protection",
        subcategory: None,
        now: Utc::now(),
    };
    assemble_product(candidate, &ctx)
}

#[test]
fn product_without_price_is_still_emitted() {
    let p = product(candidate(None, None));
    assert_eq!(p.current_price, None);
    assert!(!p.is_on_sale);
    assert_eq!(p.discount_percentage, None);
    assert_eq!(p.stock_status, StockStatus::Unknown);
}

#[test]
fn regular_price_kept_only_when_on_sale() {
    let on_sale = product(candidate(Some("£4.50"), Some("£6.00")));
    assert!(on_sale.is_on_sale);
    assert_eq!(on_sale.regular_price, Some(Decimal::new(600, 2)));
    assert_eq!(on_sale.discount_percentage, Some(25));

    let equal = product(candidate(Some("£6.00"), Some("£6.00")));
    assert!(!equal.is_on_sale);
    assert_eq!(equal.regular_price, None);
    assert_eq!(equal.discount_percentage, None);
}

#[test]
fn brand_from_name_then_hint() {
    assert_eq!(product(candidate(None, None)).brand.as_deref(), Some("Wylex"));

    let mut unbranded = RawCandidate::new("1".to_string(), "Generic 6A MCB".to_string());
    unbranded.brand_hint = Some("hager".to_string());
    assert_eq!(product(unbranded).brand.as_deref(), Some("Hager"));

    let mut unknown = RawCandidate::new("2".to_string(), "Generic 6A MCB".to_string());
    unknown.brand_hint = Some("Lewden".to_string());
    assert_eq!(product(unknown).brand.as_deref(), Some("Lewden"));
}

#[test]
fn deal_requires_price() {
    let now = Utc::now();
    assert!(assemble_deal(candidate(None, None), &adapter(), "https://x", now).is_none());
    assert!(
        assemble_deal(candidate(Some("POA"), None), &adapter(), "https://x", now).is_none()
    );
}

#[test]
fn deal_ignores_original_price_not_above_deal_price() {
    let deal = assemble_deal(
        candidate(Some("£10.00"), Some("£8.00")),
        &adapter(),
        "https://x",
        Utc::now(),
    )
    .unwrap();
    assert_eq!(deal.original_price, None);
    assert_eq!(deal.discount_percentage, 0);
}

#[test]
fn deal_expiry_defaults_to_a_week() {
    let now = Utc::now();
    let deal = assemble_deal(candidate(Some("£1"), None), &adapter(), "https://x", now).unwrap();
    let expected = now + Duration::days(7);
    assert!((deal.expires_at - expected).num_seconds().abs() <= 1);
}

#[test]
fn classify_deal_keywords() {
    assert_eq!(classify_deal("CLEARANCE - last few"), DealType::Clearance);
    assert_eq!(classify_deal("Multi-buy: 3 for £10"), DealType::Bundle);
    assert_eq!(classify_deal("Socket bundle"), DealType::Bundle);
    assert_eq!(classify_deal("Flash sale today only"), DealType::FlashSale);
    assert_eq!(classify_deal("This week's deals"), DealType::WeeklyDeal);
}

#[test]
fn parse_expiry_formats() {
    let end_of = |y, m, d| Utc.with_ymd_and_hms(y, m, d, 23, 59, 59).unwrap();
    assert_eq!(parse_expiry("Ends 2030-03-09"), Some(end_of(2030, 3, 9)));
    assert_eq!(parse_expiry("Offer ends 09/03/2030"), Some(end_of(2030, 3, 9)));
    assert_eq!(parse_expiry("Valid until 9th March 2030"), Some(end_of(2030, 3, 9)));
    assert_eq!(parse_expiry("until 9 Mar 2030"), Some(end_of(2030, 3, 9)));
    assert_eq!(
        parse_expiry("2030-03-09T12:00:00Z"),
        Some(Utc.with_ymd_and_hms(2030, 3, 9, 12, 0, 0).unwrap())
    );
    assert_eq!(parse_expiry("while stocks last"), None);
    assert_eq!(parse_expiry("31/02/2030"), None);
}
