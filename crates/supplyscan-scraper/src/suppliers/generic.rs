use super::{Profile, UK_ELECTRICAL_BRANDS};
use crate::normalize::DEFAULT_STOCK_PHRASES;

/// Common storefront conventions for suppliers without a dedicated profile.
pub(super) const PROFILE: Profile = Profile {
    name: "generic",
    card_selectors: &[
        "[data-product-id]",
        "[data-sku]",
        "[class*='product-card']",
        "[class*='product-item']",
        "[class*='product-tile']",
        "article[class*='product']",
        "li[class*='product']",
    ],
    deal_selectors: &[
        "[class*='product']",
        "[class*='offer']",
        "[class*='deal']",
        "article",
    ],
    coupon_selectors: &["[class*='voucher']", "[class*='coupon']"],
    product_link_pattern: r"/(?:p|product|products)/(?:[^/?#]+/)*?([A-Za-z0-9][A-Za-z0-9-]{2,})/?(?:[?#]|$)",
    sku_attributes: &["data-sku", "data-product-id", "data-id"],
    brands: UK_ELECTRICAL_BRANDS,
    stock_vocabulary: DEFAULT_STOCK_PHRASES,
    currency_symbol: "£",
    search_path: "/search?q=",
    readiness_selector: "[class*='product']",
    readiness_min_elements: 3,
};
