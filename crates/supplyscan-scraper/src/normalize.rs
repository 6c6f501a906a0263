//! Price, discount, brand, and stock-status normalization.
//!
//! Everything here is a pure function over strings so the assemblers in
//! [`crate::assemble`] can compose them without touching the DOM.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use supplyscan_core::StockStatus;

static NUMERIC_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d[\d,]*(?:\.\d+)?|\.\d+").expect("valid regex"));

/// Parses a currency string such as `"£1,234.56"` into a [`Decimal`].
///
/// The first numeric token wins; currency symbols, surrounding words and
/// thousands separators are ignored, and a bare fraction (`"£.99"`) reads as
/// `0.99`. Returns `None` for missing input, text without any numeric token,
/// or a token too large for a `Decimal`.
#[must_use]
pub fn parse_price(text: Option<&str>) -> Option<Decimal> {
    let token = NUMERIC_TOKEN.find(text?)?.as_str();
    let mut cleaned: String = token.chars().filter(|c| *c != ',').collect();
    if cleaned.starts_with('.') {
        cleaned.insert(0, '0');
    }
    Decimal::from_str(&cleaned).ok()
}

/// Whole-number percentage saved when `regular` is reduced to `current`.
///
/// Returns `None` unless both prices are known and `regular > current`; a
/// regular price at or below the current price is treated as "not on sale",
/// never as a negative discount. Rounds half away from zero and keeps the
/// result in `1..=100` so a genuine reduction never reports 0%. Prices too
/// large to compute with yield `None`.
#[must_use]
pub fn calculate_discount(current: Option<Decimal>, regular: Option<Decimal>) -> Option<i32> {
    let (current, regular) = (current?, regular?);
    if regular <= current || regular <= Decimal::ZERO {
        return None;
    }

    let pct = regular
        .checked_sub(current)?
        .checked_mul(Decimal::ONE_HUNDRED)?
        .checked_div(regular)?;
    let rounded = pct
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i32()?;
    Some(rounded.clamp(1, 100))
}

/// Returns the first brand from `brands` that occurs in `name`
/// (case-insensitive), preserving the vocabulary's casing.
#[must_use]
pub fn infer_brand(name: &str, brands: &[String]) -> Option<String> {
    let lower = name.to_lowercase();
    brands
        .iter()
        .find(|brand| !brand.is_empty() && lower.contains(&brand.to_lowercase()))
        .cloned()
}

/// Maps free stock text onto a [`StockStatus`] via an ordered vocabulary.
///
/// Phrases are matched as case-insensitive substrings in order, so more
/// specific phrases (`"out of stock"`, `"unavailable"`) must precede the
/// phrases they contain (`"available"`).
#[must_use]
pub fn classify_stock(text: &str, vocabulary: &[(String, StockStatus)]) -> StockStatus {
    let lower = text.to_lowercase();
    vocabulary
        .iter()
        .find(|(phrase, _)| lower.contains(phrase.as_str()))
        .map_or(StockStatus::Unknown, |(_, status)| *status)
}

/// Stock phrases shared by most storefronts, most specific first.
pub const DEFAULT_STOCK_PHRASES: &[(&str, StockStatus)] = &[
    ("out of stock", StockStatus::OutOfStock),
    ("unavailable", StockStatus::OutOfStock),
    ("sold out", StockStatus::OutOfStock),
    ("in stock", StockStatus::InStock),
    ("available", StockStatus::Available),
];

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
