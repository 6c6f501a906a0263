use super::{Profile, UK_ELECTRICAL_BRANDS};
use crate::normalize::DEFAULT_STOCK_PHRASES;

/// Screwfix listing pages: `/p/<slug>/<numeric sku>` product links and
/// `data-qaid` test hooks on product tiles.
pub(super) const PROFILE: Profile = Profile {
    name: "screwfix",
    card_selectors: &[
        "[data-qaid='product-tile']",
        "[data-qaid='product_card']",
        "div[class*='ProductCard']",
        "article[class*='product']",
        "li[class*='product']",
    ],
    deal_selectors: &[
        "[data-qaid='product-tile']",
        "[class*='promo-tile']",
        "[class*='offer']",
        "article",
    ],
    coupon_selectors: &[],
    product_link_pattern: r"/p/[^/?#]+/(\d{3,})",
    sku_attributes: &["data-product-id", "data-sku", "data-code"],
    brands: UK_ELECTRICAL_BRANDS,
    stock_vocabulary: DEFAULT_STOCK_PHRASES,
    currency_symbol: "£",
    search_path: "/search?search=",
    readiness_selector: "[data-qaid='product-tile'], a[href*='/p/']",
    readiness_min_elements: 3,
};
