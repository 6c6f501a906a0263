pub mod adapter;
pub mod assemble;
pub mod dedup;
pub mod error;
pub mod extract;
pub mod navigate;
pub mod normalize;
pub mod page;
pub mod readiness;
pub mod scroll;
pub mod supplier;
pub mod suppliers;

#[cfg(test)]
mod test_support;

pub use adapter::SupplierAdapter;
pub use error::{PageError, ScraperError};
pub use extract::{extract_coupons, extract_deals, extract_products};
pub use normalize::{calculate_discount, infer_brand, parse_price};
pub use page::http::HttpBrowser;
pub use page::{Browser, PageController};
pub use supplier::{ScrapeObserver, ScrapeSettings, SupplierScraper, TracingObserver, UrlOutcome};
