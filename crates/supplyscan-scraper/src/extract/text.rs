//! Text and URL helpers shared by the extraction strategies.

use std::sync::LazyLock;

use regex::Regex;
use reqwest::Url;
use scraper::ElementRef;
use sha2::{Digest, Sha256};

use crate::error::ScraperError;

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Collapse runs of whitespace into single spaces and trim the ends.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

/// Visible text of an element, whitespace-collapsed.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    let raw: String = element.text().collect::<Vec<_>>().join(" ");
    collapse_whitespace(&raw)
}

/// Finds currency-amount tokens (`£12.99`, `£ 1,299`) in free text.
#[derive(Debug, Clone)]
pub struct CurrencyMatcher {
    symbol: String,
    token: Regex,
}

impl CurrencyMatcher {
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidPattern`] if the symbol produces an
    /// unusable pattern, which only happens for pathological input.
    pub fn new(symbol: &str) -> Result<Self, ScraperError> {
        let token = Regex::new(&format!(
            r"{}\s?\d[\d,]*(?:\.\d+)?",
            regex::escape(symbol)
        ))?;
        Ok(Self {
            symbol: symbol.to_owned(),
            token,
        })
    }

    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// All currency tokens in document order.
    #[must_use]
    pub fn tokens(&self, text: &str) -> Vec<String> {
        self.token
            .find_iter(text)
            .map(|m| m.as_str().to_owned())
            .collect()
    }

    #[must_use]
    pub fn contains(&self, text: &str) -> bool {
        self.token.is_match(text)
    }

    /// Ensures price text carries the currency symbol.
    #[must_use]
    pub fn with_symbol(&self, price: &str) -> String {
        let price = price.trim();
        if price.starts_with(&self.symbol) {
            price.to_owned()
        } else {
            format!("{}{price}", self.symbol)
        }
    }
}

/// Resolves `href` against `base`. Fragment-only, `javascript:` and
/// `mailto:` links resolve to nothing.
pub(crate) fn resolve_url(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    let lower = href.to_ascii_lowercase();
    if href.is_empty()
        || href.starts_with('#')
        || lower.starts_with("javascript:")
        || lower.starts_with("mailto:")
        || lower.starts_with("tel:")
    {
        return None;
    }
    base.join(href).ok().map(String::from)
}

/// Deterministic identifier for a listing that exposes no SKU.
///
/// Stable across runs as long as the product URL and name are unchanged.
pub(crate) fn fallback_sku(product_url: &str, name: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(product_url.as_bytes());
    hasher.update([0u8]);
    hasher.update(name.as_bytes());
    let hex = format!("{:x}", hasher.finalize());
    format!("gen-{}", &hex[..12])
}

/// `"cable-ties"` → `"Cable Ties"`.
pub(crate) fn humanize(segment: &str) -> String {
    segment
        .split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapse_whitespace_normalizes_runs() {
        assert_eq!(collapse_whitespace("  Twin \n\t Socket  "), "Twin Socket");
    }

    #[test]
    fn currency_tokens_in_document_order() {
        let matcher = CurrencyMatcher::new("£").unwrap();
        let tokens = matcher.tokens("Was £1,299.00 now £ 999 (save £300)");
        assert_eq!(tokens, vec!["£1,299.00", "£ 999", "£300"]);
    }

    #[test]
    fn currency_symbol_is_escaped() {
        let matcher = CurrencyMatcher::new("$").unwrap();
        assert!(matcher.contains("only $5.00"));
        assert!(!matcher.contains("only 5.00"));
    }

    #[test]
    fn with_symbol_prefixes_bare_amounts() {
        let matcher = CurrencyMatcher::new("£").unwrap();
        assert_eq!(matcher.with_symbol("12.50"), "£12.50");
        assert_eq!(matcher.with_symbol("£12.50"), "£12.50");
    }

    #[test]
    fn resolve_url_joins_relative_paths() {
        let base = Url::parse("https://www.example.com/c/cable").unwrap();
        assert_eq!(
            resolve_url(&base, "/p/twin-earth/123456").as_deref(),
            Some("https://www.example.com/p/twin-earth/123456")
        );
        assert_eq!(
            resolve_url(&base, "https://cdn.example.com/a.jpg").as_deref(),
            Some("https://cdn.example.com/a.jpg")
        );
    }

    #[test]
    fn resolve_url_skips_non_navigational_links() {
        let base = Url::parse("https://www.example.com/").unwrap();
        assert_eq!(resolve_url(&base, "#reviews"), None);
        assert_eq!(resolve_url(&base, "javascript:void(0)"), None);
        assert_eq!(resolve_url(&base, "mailto:sales@example.com"), None);
    }

    #[test]
    fn fallback_sku_is_deterministic() {
        let a = fallback_sku("https://example.com/p/1", "Twin Socket");
        let b = fallback_sku("https://example.com/p/1", "Twin Socket");
        let c = fallback_sku("https://example.com/p/1", "Single Socket");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.starts_with("gen-"));
        assert_eq!(a.len(), "gen-".len() + 12);
    }

    #[test]
    fn humanize_title_cases_slug_words() {
        assert_eq!(humanize("cable-ties"), "Cable Ties");
        assert_eq!(humanize("twin_and_earth"), "Twin And Earth");
    }
}
