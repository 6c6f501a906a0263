//! Built-in extraction profiles.
//!
//! A profile is pure data: the selectors, link pattern and vocabularies that
//! tune the generic engine to one supplier's markup. Adding a supplier means
//! adding a profile (or reusing `generic`), never new control flow.

mod generic;
mod screwfix;
mod toolstation;

use supplyscan_core::StockStatus;

/// Static extraction profile for one family of storefront markup.
#[derive(Debug)]
pub struct Profile {
    pub name: &'static str,
    /// Product card selectors, most specific first.
    pub card_selectors: &'static [&'static str],
    /// Looser selectors for deal and offer tiles.
    pub deal_selectors: &'static [&'static str],
    pub coupon_selectors: &'static [&'static str],
    /// Regex over product hrefs; capture group 1 is the SKU.
    pub product_link_pattern: &'static str,
    /// Data attributes carrying the SKU, checked in order.
    pub sku_attributes: &'static [&'static str],
    pub brands: &'static [&'static str],
    /// Ordered `(phrase, status)` pairs; earlier phrases win.
    pub stock_vocabulary: &'static [(&'static str, StockStatus)],
    pub currency_symbol: &'static str,
    /// Search path with a trailing query key; the product name is appended.
    pub search_path: &'static str,
    pub readiness_selector: &'static str,
    pub readiness_min_elements: usize,
}

const PROFILES: &[&Profile] = &[
    &screwfix::PROFILE,
    &toolstation::PROFILE,
    &generic::PROFILE,
];

/// Looks up a built-in profile by name.
#[must_use]
pub fn profile(name: &str) -> Option<&'static Profile> {
    PROFILES.iter().copied().find(|p| p.name == name)
}

/// Names of every built-in profile.
#[must_use]
pub fn profile_names() -> Vec<&'static str> {
    PROFILES.iter().map(|p| p.name).collect()
}

/// Brand list shared by the UK electrical wholesalers.
pub(crate) const UK_ELECTRICAL_BRANDS: &[&str] = &[
    "Schneider Electric",
    "Schneider",
    "Hager",
    "Wylex",
    "MK",
    "Crabtree",
    "BG",
    "Click",
    "Knightsbridge",
    "Aurora",
    "Ansell",
    "JCC",
    "Megger",
    "Fluke",
    "Kewtech",
    "Di-Log",
    "Doncaster Cables",
    "Prysmian",
    "Pitacs",
    "Philips",
    "Ledvance",
    "Timeguard",
    "Wago",
];
