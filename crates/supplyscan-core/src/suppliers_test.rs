use std::collections::BTreeMap;
use std::path::Path;

use super::*;

fn supplier(name: &str, base_url: &str) -> SupplierConfig {
    let mut category_urls = BTreeMap::new();
    category_urls.insert("cable".to_string(), vec!["/cable".to_string()]);
    SupplierConfig {
        name: name.to_string(),
        base_url: base_url.to_string(),
        category_urls,
        deals_url: None,
        coupons_url: None,
        profile: None,
        brands: vec![],
        enabled: true,
    }
}

#[test]
fn slug_simple_name() {
    assert_eq!(
        supplier("City Wholesale", "https://example.com").slug(),
        "city-wholesale"
    );
}

#[test]
fn slug_special_characters() {
    assert_eq!(
        supplier("Edmundson's Electrical", "https://example.com").slug(),
        "edmundsons-electrical"
    );
}

#[test]
fn profile_name_defaults_to_slug() {
    let config = supplier("Screwfix", "https://www.screwfix.com");
    assert_eq!(config.profile_name(), "screwfix");
}

#[test]
fn profile_name_prefers_explicit_profile() {
    let mut config = supplier("City Wholesale", "https://example.com");
    config.profile = Some("generic".to_string());
    assert_eq!(config.profile_name(), "generic");
}

#[test]
fn validate_rejects_empty_name() {
    let file = SuppliersFile {
        suppliers: vec![supplier("  ", "https://example.com")],
    };
    let err = validate_suppliers(&file).unwrap_err();
    assert!(err.to_string().contains("non-empty"));
}

#[test]
fn validate_rejects_non_http_base_url() {
    let file = SuppliersFile {
        suppliers: vec![supplier("Screwfix", "ftp://screwfix.com")],
    };
    let err = validate_suppliers(&file).unwrap_err();
    assert!(err.to_string().contains("http://"));
}

#[test]
fn validate_rejects_category_without_paths() {
    let mut config = supplier("Screwfix", "https://www.screwfix.com");
    config.category_urls.insert("lighting".to_string(), vec![]);
    let file = SuppliersFile {
        suppliers: vec![config],
    };
    let err = validate_suppliers(&file).unwrap_err();
    assert!(err.to_string().contains("'lighting' has no paths"));
}

#[test]
fn validate_rejects_duplicate_name() {
    let file = SuppliersFile {
        suppliers: vec![
            supplier("Toolstation", "https://www.toolstation.com"),
            supplier("toolstation", "https://www.toolstation.com"),
        ],
    };
    let err = validate_suppliers(&file).unwrap_err();
    assert!(err.to_string().contains("duplicate supplier name"));
}

#[test]
fn validate_rejects_duplicate_slug() {
    let file = SuppliersFile {
        suppliers: vec![
            supplier("City Wholesale", "https://a.example"),
            supplier("City--Wholesale", "https://b.example"),
        ],
    };
    let err = validate_suppliers(&file).unwrap_err();
    assert!(err.to_string().contains("duplicate supplier"));
}

#[test]
fn parse_suppliers_applies_defaults() {
    let yaml = r"
suppliers:
  - name: Screwfix
    base_url: https://www.screwfix.com
";
    let file = parse_suppliers(yaml).unwrap();
    let config = &file.suppliers[0];
    assert!(config.enabled);
    assert!(config.category_urls.is_empty());
    assert!(config.deals_url.is_none());
    assert!(config.brands.is_empty());
}

#[test]
fn find_skips_disabled_suppliers() {
    let mut disabled = supplier("City Wholesale", "https://example.com");
    disabled.enabled = false;
    let file = SuppliersFile {
        suppliers: vec![supplier("Screwfix", "https://www.screwfix.com"), disabled],
    };
    assert!(file.find("screwfix").is_some());
    assert!(file.find("city-wholesale").is_none());
    assert_eq!(file.enabled().count(), 1);
}

#[test]
fn load_suppliers_from_real_file() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("config")
        .join("suppliers.yaml");
    assert!(
        path.exists(),
        "suppliers.yaml missing at {path:?}; required for this test"
    );
    let result = load_suppliers(&path);
    assert!(result.is_ok(), "failed to load suppliers.yaml: {result:?}");
    let file = result.unwrap();
    assert!(file.find("screwfix").is_some());
    assert!(file.find("toolstation").is_some());
}

#[test]
fn load_suppliers_missing_file_is_io_error() {
    let err = load_suppliers(Path::new("/nonexistent/suppliers.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::SuppliersFileIo { .. }));
}
