//! Shared fixtures for unit tests.

use std::collections::BTreeMap;

use supplyscan_core::SupplierConfig;

use crate::adapter::{ExtractionRules, SupplierAdapter};

pub(crate) fn supplier_config(profile: &str) -> SupplierConfig {
    SupplierConfig {
        name: "Example Electrical".to_string(),
        base_url: "https://www.example.com".to_string(),
        category_urls: BTreeMap::from([(
            "cable".to_string(),
            vec!["/c/cable/twin-and-earth".to_string()],
        )]),
        deals_url: Some("/deals".to_string()),
        coupons_url: None,
        profile: Some(profile.to_string()),
        brands: vec![],
        enabled: true,
    }
}

pub(crate) fn adapter_with_profile(profile: &str) -> SupplierAdapter {
    SupplierAdapter::from_config(&supplier_config(profile)).expect("built-in profile compiles")
}

/// Screwfix-style rules over `https://www.example.com`.
pub(crate) fn adapter() -> SupplierAdapter {
    adapter_with_profile("screwfix")
}

pub(crate) fn rules() -> ExtractionRules {
    adapter().rules().clone()
}
