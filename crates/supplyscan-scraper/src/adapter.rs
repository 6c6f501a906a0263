//! Data-driven supplier descriptor.
//!
//! A [`SupplierAdapter`] binds a [`SupplierConfig`] (where the listings
//! live) to a compiled extraction profile (how to read them). The engine in
//! [`crate::supplier`] is identical for every supplier.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use regex::Regex;
use reqwest::Url;
use scraper::Selector;
use supplyscan_core::{StockStatus, SupplierConfig};

use crate::error::ScraperError;
use crate::extract::text::{resolve_url, CurrencyMatcher};
use crate::readiness::ReadinessSignal;
use crate::suppliers::{profile, Profile};

/// Compiled selectors and patterns consumed by the extraction strategies.
#[derive(Debug, Clone)]
pub struct ExtractionRules {
    pub base_url: Url,
    pub card_selectors: Vec<Selector>,
    pub deal_selectors: Vec<Selector>,
    pub coupon_selectors: Vec<Selector>,
    pub product_link: Regex,
    pub sku_attributes: Vec<String>,
    pub currency: CurrencyMatcher,
}

#[derive(Debug, Clone)]
pub struct SupplierAdapter {
    config: SupplierConfig,
    slug: String,
    profile_name: &'static str,
    rules: ExtractionRules,
    brands: Vec<String>,
    stock_vocabulary: Vec<(String, StockStatus)>,
    search_path: &'static str,
    readiness: ReadinessSignal,
}

impl SupplierAdapter {
    /// Builds an adapter using the profile named in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::UnknownProfile`] when no built-in profile has
    /// that name, or any error from [`SupplierAdapter::with_profile`].
    pub fn from_config(config: &SupplierConfig) -> Result<Self, ScraperError> {
        let name = config.profile_name();
        let profile = profile(&name).ok_or(ScraperError::UnknownProfile(name))?;
        Self::with_profile(config, profile)
    }

    /// Builds an adapter from an explicit profile.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidBaseUrl`] if the supplier's base URL
    /// does not parse, or [`ScraperError::InvalidSelector`] /
    /// [`ScraperError::InvalidPattern`] if the profile does not compile.
    pub fn with_profile(
        config: &SupplierConfig,
        profile: &'static Profile,
    ) -> Result<Self, ScraperError> {
        let base_url =
            Url::parse(&config.base_url).map_err(|e| ScraperError::InvalidBaseUrl {
                base_url: config.base_url.clone(),
                reason: e.to_string(),
            })?;

        let rules = ExtractionRules {
            base_url,
            card_selectors: compile_selectors(profile.card_selectors)?,
            deal_selectors: compile_selectors(profile.deal_selectors)?,
            coupon_selectors: compile_selectors(profile.coupon_selectors)?,
            product_link: Regex::new(profile.product_link_pattern)?,
            sku_attributes: profile
                .sku_attributes
                .iter()
                .map(|a| (*a).to_string())
                .collect(),
            currency: CurrencyMatcher::new(profile.currency_symbol)?,
        };

        let brands = if config.brands.is_empty() {
            profile.brands.iter().map(|b| (*b).to_string()).collect()
        } else {
            config.brands.clone()
        };

        let readiness = ReadinessSignal::new(
            profile.currency_symbol,
            profile.readiness_selector,
            profile.readiness_min_elements,
        )?;

        Ok(Self {
            config: config.clone(),
            slug: config.slug(),
            profile_name: profile.name,
            rules,
            brands,
            stock_vocabulary: profile
                .stock_vocabulary
                .iter()
                .map(|(phrase, status)| ((*phrase).to_string(), *status))
                .collect(),
            search_path: profile.search_path,
            readiness,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.config.name
    }

    #[must_use]
    pub fn slug(&self) -> &str {
        &self.slug
    }

    #[must_use]
    pub fn profile_name(&self) -> &'static str {
        self.profile_name
    }

    #[must_use]
    pub fn config(&self) -> &SupplierConfig {
        &self.config
    }

    #[must_use]
    pub fn rules(&self) -> &ExtractionRules {
        &self.rules
    }

    #[must_use]
    pub fn brands(&self) -> &[String] {
        &self.brands
    }

    #[must_use]
    pub fn stock_vocabulary(&self) -> &[(String, StockStatus)] {
        &self.stock_vocabulary
    }

    #[must_use]
    pub fn readiness(&self) -> &ReadinessSignal {
        &self.readiness
    }

    /// Resolves a configured path (or absolute URL) against the base URL.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<String> {
        resolve_url(&self.rules.base_url, path)
    }

    /// Supplier search URL for `name`; the fallback `product_url` for
    /// listings without a usable link.
    #[must_use]
    pub fn search_url(&self, name: &str) -> String {
        format!(
            "{}{}{}",
            self.config.base_url.trim_end_matches('/'),
            self.search_path,
            utf8_percent_encode(name, NON_ALPHANUMERIC)
        )
    }
}

fn compile_selectors(sources: &[&str]) -> Result<Vec<Selector>, ScraperError> {
    sources
        .iter()
        .map(|source| {
            Selector::parse(source).map_err(|e| ScraperError::InvalidSelector {
                selector: (*source).to_string(),
                reason: e.to_string(),
            })
        })
        .collect()
}
