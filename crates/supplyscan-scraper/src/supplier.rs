//! Per-supplier orchestration.
//!
//! One page per run, visited URL by URL:
//! navigate → wait for content → scroll → snapshot → extract → assemble,
//! then a fixed politeness delay before the next URL. A URL that fails to
//! load is reported and skipped; nothing a target site does can fail the
//! whole run.

use std::sync::{Arc, LazyLock};
use std::time::Duration;

use chrono::Utc;
use regex::Regex;
use reqwest::Url;
use supplyscan_core::{AppConfig, ScrapedCoupon, ScrapedDeal, ScrapedProduct};

use crate::adapter::SupplierAdapter;
use crate::extract::text::humanize;
use crate::extract::{extract_coupons, extract_deals, extract_products};
use crate::navigate::{navigate_with_retry, NavigationPolicy};
use crate::page::{Browser, PageController};
use crate::readiness::{wait_for_content, Readiness};
use crate::scroll::{load_lazy_content, ScrollPolicy};

/// Path segments that are catalogue ids rather than names (`cat830944`, `c660`).
static ID_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]{0,3}\d+$").expect("valid regex"));

/// Timing knobs for one scrape run.
#[derive(Debug, Clone)]
pub struct ScrapeSettings {
    pub navigation: NavigationPolicy,
    pub readiness_timeout: Duration,
    pub readiness_poll: Duration,
    pub scroll: ScrollPolicy,
    /// Pause between successive URL visits.
    pub politeness_delay: Duration,
}

impl ScrapeSettings {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        let step_timeout = Duration::from_secs(config.nav_timeout_secs);
        Self {
            navigation: NavigationPolicy {
                max_attempts: config.nav_max_attempts,
                attempt_timeout: step_timeout,
                backoff_base: Duration::from_millis(config.nav_backoff_base_ms),
            },
            readiness_timeout: Duration::from_millis(config.readiness_timeout_ms),
            readiness_poll: Duration::from_millis(config.readiness_poll_ms),
            scroll: ScrollPolicy {
                max_iterations: config.scroll_max_iterations,
                pause: Duration::from_millis(config.scroll_pause_ms),
                step_timeout,
            },
            politeness_delay: Duration::from_millis(config.politeness_delay_ms),
        }
    }

    /// Settings with every pause removed and short timeouts.
    #[must_use]
    pub fn immediate() -> Self {
        Self {
            navigation: NavigationPolicy {
                max_attempts: 2,
                attempt_timeout: Duration::from_millis(200),
                backoff_base: Duration::ZERO,
            },
            readiness_timeout: Duration::ZERO,
            readiness_poll: Duration::from_millis(1),
            scroll: ScrollPolicy {
                max_iterations: 3,
                pause: Duration::ZERO,
                step_timeout: Duration::from_millis(200),
            },
            politeness_delay: Duration::ZERO,
        }
    }
}

/// What happened at one URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlOutcome {
    /// Loaded and extracted; carries the number of records produced.
    Scraped(usize),
    NavigationFailed,
    ExtractionFailed,
}

/// Receives per-URL outcomes. Implementations must not block.
pub trait ScrapeObserver: Send + Sync {
    fn on_url(&self, supplier: &str, url: &str, outcome: UrlOutcome);

    fn on_run_complete(&self, _supplier: &str, _kind: &'static str, _records: usize) {}
}

/// Logs outcomes through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ScrapeObserver for TracingObserver {
    fn on_url(&self, supplier: &str, url: &str, outcome: UrlOutcome) {
        match outcome {
            UrlOutcome::Scraped(count) => {
                tracing::info!(supplier, url, count, "scraped page");
            }
            UrlOutcome::NavigationFailed => {
                tracing::warn!(supplier, url, "navigation failed; skipping URL");
            }
            UrlOutcome::ExtractionFailed => {
                tracing::warn!(supplier, url, "could not snapshot page; skipping URL");
            }
        }
    }

    fn on_run_complete(&self, supplier: &str, kind: &'static str, records: usize) {
        tracing::info!(supplier, kind, records, "scrape run complete");
    }
}

struct Target {
    category: String,
    subcategory: Option<String>,
    url: String,
}

/// Drives one supplier's scrape runs over a [`Browser`].
pub struct SupplierScraper<B: Browser> {
    browser: B,
    adapter: SupplierAdapter,
    settings: ScrapeSettings,
    observer: Arc<dyn ScrapeObserver>,
}

impl<B: Browser> SupplierScraper<B> {
    #[must_use]
    pub fn new(browser: B, adapter: SupplierAdapter, settings: ScrapeSettings) -> Self {
        Self {
            browser,
            adapter,
            settings,
            observer: Arc::new(TracingObserver),
        }
    }

    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn ScrapeObserver>) -> Self {
        self.observer = observer;
        self
    }

    #[must_use]
    pub fn adapter(&self) -> &SupplierAdapter {
        &self.adapter
    }

    /// Scrapes every configured category URL, or only those of
    /// `category_filter`.
    ///
    /// Never fails: unreachable URLs contribute nothing and an unknown
    /// category yields an empty list.
    pub async fn scrape_products(&self, category_filter: Option<&str>) -> Vec<ScrapedProduct> {
        let targets = self.product_targets(category_filter);
        if targets.is_empty() {
            return Vec::new();
        }
        let Some(mut page) = self.open_page().await else {
            return Vec::new();
        };

        let products = self.products_from(&mut page, &targets).await;
        page.close().await;

        self.observer
            .on_run_complete(self.adapter.name(), "products", products.len());
        products
    }

    /// Scrapes the deals page. Suppliers without one yield an empty list
    /// without opening a page.
    pub async fn scrape_deals(&self) -> Vec<ScrapedDeal> {
        let Some(url) = self.single_url(self.adapter.config().deals_url.as_deref(), "deals")
        else {
            return Vec::new();
        };
        let Some(mut page) = self.open_page().await else {
            return Vec::new();
        };

        let deals = match self.load(&mut page, &url).await {
            Ok(html) => {
                let deals = extract_deals(&html, &self.adapter, &url, Utc::now());
                self.observer
                    .on_url(self.adapter.name(), &url, UrlOutcome::Scraped(deals.len()));
                deals
            }
            Err(outcome) => {
                self.observer.on_url(self.adapter.name(), &url, outcome);
                Vec::new()
            }
        };
        page.close().await;

        self.observer
            .on_run_complete(self.adapter.name(), "deals", deals.len());
        deals
    }

    /// Scrapes the voucher-code page. Most suppliers publish none, which is
    /// a permanent empty result rather than a failure.
    pub async fn scrape_coupons(&self) -> Vec<ScrapedCoupon> {
        let Some(url) = self.single_url(self.adapter.config().coupons_url.as_deref(), "coupons")
        else {
            return Vec::new();
        };
        let Some(mut page) = self.open_page().await else {
            return Vec::new();
        };

        let coupons = match self.load(&mut page, &url).await {
            Ok(html) => {
                let coupons = extract_coupons(&html, &self.adapter, &url, Utc::now());
                self.observer
                    .on_url(self.adapter.name(), &url, UrlOutcome::Scraped(coupons.len()));
                coupons
            }
            Err(outcome) => {
                self.observer.on_url(self.adapter.name(), &url, outcome);
                Vec::new()
            }
        };
        page.close().await;

        self.observer
            .on_run_complete(self.adapter.name(), "coupons", coupons.len());
        coupons
    }

    async fn products_from(&self, page: &mut B::Page, targets: &[Target]) -> Vec<ScrapedProduct> {
        let mut products = Vec::new();

        for (idx, target) in targets.iter().enumerate() {
            if idx > 0 && !self.settings.politeness_delay.is_zero() {
                tokio::time::sleep(self.settings.politeness_delay).await;
            }

            let outcome = match self.load(page, &target.url).await {
                Ok(html) => {
                    let found = extract_products(
                        &html,
                        &self.adapter,
                        &target.category,
                        target.subcategory.as_deref(),
                    );
                    let count = found.len();
                    products.extend(found);
                    UrlOutcome::Scraped(count)
                }
                Err(outcome) => outcome,
            };
            self.observer
                .on_url(self.adapter.name(), &target.url, outcome);
        }

        products
    }

    /// Navigates, waits, scrolls and snapshots one URL.
    async fn load(&self, page: &mut B::Page, url: &str) -> Result<String, UrlOutcome> {
        if !navigate_with_retry(page, url, &self.settings.navigation).await {
            return Err(UrlOutcome::NavigationFailed);
        }

        let readiness = wait_for_content(
            page,
            self.adapter.readiness(),
            self.settings.readiness_timeout,
            self.settings.readiness_poll,
        )
        .await;
        if readiness == Readiness::TimedOut {
            tracing::debug!(supplier = self.adapter.name(), url, "extracting before content signalled ready");
        }

        let scroll = load_lazy_content(page, &self.settings.scroll).await;
        tracing::debug!(
            supplier = self.adapter.name(),
            url,
            grew = scroll.grew,
            stopped = ?scroll.stopped,
            "lazy loading finished"
        );

        match tokio::time::timeout(self.settings.navigation.attempt_timeout, page.content()).await {
            Ok(Ok(html)) => Ok(html),
            Ok(Err(e)) => {
                tracing::debug!(supplier = self.adapter.name(), url, error = %e, "snapshot failed");
                Err(UrlOutcome::ExtractionFailed)
            }
            Err(_) => {
                tracing::debug!(supplier = self.adapter.name(), url, "snapshot timed out");
                Err(UrlOutcome::ExtractionFailed)
            }
        }
    }

    async fn open_page(&self) -> Option<B::Page> {
        match tokio::time::timeout(self.settings.navigation.attempt_timeout, self.browser.new_page())
            .await
        {
            Ok(Ok(page)) => Some(page),
            Ok(Err(e)) => {
                tracing::warn!(supplier = self.adapter.name(), error = %e, "could not open page");
                None
            }
            Err(_) => {
                tracing::warn!(supplier = self.adapter.name(), "timed out opening page");
                None
            }
        }
    }

    fn single_url(&self, path: Option<&str>, kind: &'static str) -> Option<String> {
        let path = path?;
        let url = self.adapter.resolve(path);
        if url.is_none() {
            tracing::warn!(supplier = self.adapter.name(), kind, path, "unresolvable URL");
        }
        url
    }

    fn product_targets(&self, category_filter: Option<&str>) -> Vec<Target> {
        let categories = &self.adapter.config().category_urls;
        if let Some(filter) = category_filter {
            if !categories.contains_key(filter) {
                tracing::warn!(
                    supplier = self.adapter.name(),
                    category = filter,
                    "unknown category; nothing to scrape"
                );
                return Vec::new();
            }
        }

        categories
            .iter()
            .filter(|(category, _)| category_filter.is_none_or(|f| f == category.as_str()))
            .flat_map(|(category, paths)| {
                paths.iter().filter_map(move |path| {
                    let Some(url) = self.adapter.resolve(path) else {
                        tracing::warn!(
                            supplier = self.adapter.name(),
                            category = category.as_str(),
                            path = path.as_str(),
                            "unresolvable category URL"
                        );
                        return None;
                    };
                    Some(Target {
                        category: category.clone(),
                        subcategory: subcategory_for(&url, category),
                        url,
                    })
                })
            })
            .collect()
    }
}

/// Humanized last named path segment, when it names something other than
/// the category itself.
fn subcategory_for(url: &str, category: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let segment = parsed
        .path_segments()?
        .rev()
        .find(|s| !s.is_empty() && !ID_SEGMENT.is_match(s))?;
    let label = humanize(segment);
    (label != humanize(category)).then_some(label)
}
