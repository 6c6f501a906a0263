use supplyscan_core::StockStatus;

use super::{Profile, UK_ELECTRICAL_BRANDS};

/// Toolstation shows branch availability as "Collect today" and
/// "No stock" rather than the usual phrases.
const STOCK_PHRASES: &[(&str, StockStatus)] = &[
    ("out of stock", StockStatus::OutOfStock),
    ("no stock", StockStatus::OutOfStock),
    ("unavailable", StockStatus::OutOfStock),
    ("sold out", StockStatus::OutOfStock),
    ("in stock", StockStatus::InStock),
    ("collect today", StockStatus::InStock),
    ("available", StockStatus::Available),
];

/// Toolstation listing pages: `/<slug>/p<numeric sku>` product links and
/// a public voucher-code page.
pub(super) const PROFILE: Profile = Profile {
    name: "toolstation",
    card_selectors: &[
        "[data-testid='product-card']",
        "div[class*='product-card']",
        "div[class*='ProductTile']",
        "article[class*='product']",
        "li[class*='product']",
    ],
    deal_selectors: &[
        "[data-testid='product-card']",
        "[class*='offer']",
        "[class*='deal']",
        "article",
    ],
    coupon_selectors: &[
        "[class*='voucher']",
        "[class*='coupon']",
        "[class*='promo-code']",
    ],
    product_link_pattern: r"/p(\d{3,})(?:[/?#]|$)",
    sku_attributes: &["data-sku", "data-product-code", "data-product-id"],
    brands: UK_ELECTRICAL_BRANDS,
    stock_vocabulary: STOCK_PHRASES,
    currency_symbol: "£",
    search_path: "/search?q=",
    readiness_selector: "[data-testid='product-card'], a[href*='/p']",
    readiness_min_elements: 3,
};
