use std::collections::HashSet;

/// Set of SKUs already emitted within one extraction call.
///
/// Create a fresh instance per page scrape; identifiers repeating across
/// separate calls are expected and must not be suppressed.
#[derive(Debug, Default)]
pub struct Deduplicator {
    seen: HashSet<String>,
}

impl Deduplicator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `sku` and returns `true` if it had not been seen before.
    pub fn insert(&mut self, sku: &str) -> bool {
        if self.seen.contains(sku) {
            return false;
        }
        self.seen.insert(sku.to_owned())
    }

    #[must_use]
    pub fn contains(&self, sku: &str) -> bool {
        self.seen.contains(sku)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
