use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Read-only description of where a supplier's listings live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierConfig {
    pub name: String,
    pub base_url: String,
    /// Category key → ordered list of paths (relative to `base_url`) or absolute URLs.
    #[serde(default)]
    pub category_urls: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub deals_url: Option<String>,
    #[serde(default)]
    pub coupons_url: Option<String>,
    /// Built-in extraction profile; defaults to the supplier slug.
    #[serde(default)]
    pub profile: Option<String>,
    /// Brand vocabulary overriding the profile's list when non-empty.
    #[serde(default)]
    pub brands: Vec<String>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl SupplierConfig {
    /// Generate a URL-safe slug from the supplier name.
    #[must_use]
    pub fn slug(&self) -> String {
        self.name
            .to_lowercase()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' {
                    c
                } else if c == ' ' {
                    '-'
                } else {
                    '\0'
                }
            })
            .filter(|&c| c != '\0')
            .collect::<String>()
            .split('-')
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("-")
    }

    /// Name of the extraction profile to use for this supplier.
    #[must_use]
    pub fn profile_name(&self) -> String {
        self.profile.clone().unwrap_or_else(|| self.slug())
    }
}

#[derive(Debug, Deserialize)]
pub struct SuppliersFile {
    pub suppliers: Vec<SupplierConfig>,
}

impl SuppliersFile {
    /// Find an enabled supplier by slug.
    #[must_use]
    pub fn find(&self, slug: &str) -> Option<&SupplierConfig> {
        self.suppliers
            .iter()
            .find(|s| s.enabled && s.slug() == slug)
    }

    pub fn enabled(&self) -> impl Iterator<Item = &SupplierConfig> {
        self.suppliers.iter().filter(|s| s.enabled)
    }
}

/// Load and validate the supplier registry from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_suppliers(path: &Path) -> Result<SuppliersFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SuppliersFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_suppliers(&content)
}

/// Parse and validate a supplier registry from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_suppliers(content: &str) -> Result<SuppliersFile, ConfigError> {
    let suppliers_file: SuppliersFile =
        serde_yaml::from_str(content).map_err(ConfigError::SuppliersFileParse)?;

    validate_suppliers(&suppliers_file)?;

    Ok(suppliers_file)
}

fn validate_suppliers(suppliers_file: &SuppliersFile) -> Result<(), ConfigError> {
    let mut seen_names = HashSet::new();
    let mut seen_slugs = HashSet::new();

    for supplier in &suppliers_file.suppliers {
        if supplier.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "supplier name must be non-empty".to_string(),
            ));
        }

        if !(supplier.base_url.starts_with("https://") || supplier.base_url.starts_with("http://"))
        {
            return Err(ConfigError::Validation(format!(
                "supplier '{}' has base_url '{}'; must start with http:// or https://",
                supplier.name, supplier.base_url
            )));
        }

        if let Some((category, _)) = supplier
            .category_urls
            .iter()
            .find(|(_, paths)| paths.is_empty())
        {
            return Err(ConfigError::Validation(format!(
                "supplier '{}' category '{category}' has no paths",
                supplier.name
            )));
        }

        let lower_name = supplier.name.to_lowercase();
        if !seen_names.insert(lower_name) {
            return Err(ConfigError::Validation(format!(
                "duplicate supplier name: '{}'",
                supplier.name
            )));
        }

        let slug = supplier.slug();
        if !seen_slugs.insert(slug.clone()) {
            return Err(ConfigError::Validation(format!(
                "duplicate supplier slug: '{}' (from supplier '{}')",
                slug, supplier.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "suppliers_test.rs"]
mod tests;
