//! Best-effort wait for dynamically rendered listings.

use std::sync::LazyLock;
use std::time::Duration;

use scraper::{Html, Selector};
use tokio::time::Instant;

use crate::error::ScraperError;
use crate::page::PageController;

static BODY: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("body").expect("valid selector"));

/// Heuristic "the listing has rendered" condition.
///
/// Satisfied when the body text shows the currency symbol next to a digit,
/// or when more than `min_elements` nodes match the product-ish selector.
#[derive(Debug, Clone)]
pub struct ReadinessSignal {
    currency_symbol: String,
    product_selector: Selector,
    min_elements: usize,
}

/// Result of [`wait_for_content`]. Neither variant is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Ready,
    TimedOut,
}

impl ReadinessSignal {
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidSelector`] if `product_selector` does
    /// not parse.
    pub fn new(
        currency_symbol: &str,
        product_selector: &str,
        min_elements: usize,
    ) -> Result<Self, ScraperError> {
        let selector =
            Selector::parse(product_selector).map_err(|e| ScraperError::InvalidSelector {
                selector: product_selector.to_owned(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            currency_symbol: currency_symbol.to_owned(),
            product_selector: selector,
            min_elements,
        })
    }

    #[must_use]
    pub fn is_satisfied(&self, html: &str) -> bool {
        let document = Html::parse_document(html);

        if document.select(&self.product_selector).count() > self.min_elements {
            return true;
        }

        let Some(body) = document.select(&BODY).next() else {
            return false;
        };
        let text: String = body.text().collect();
        text.match_indices(self.currency_symbol.as_str())
            .any(|(idx, sym)| {
                text[idx + sym.len()..]
                    .trim_start()
                    .starts_with(|c: char| c.is_ascii_digit())
            })
    }
}

/// Polls the page until `signal` holds or `timeout` elapses.
///
/// A timeout is not a failure: the caller extracts whatever has rendered.
/// Snapshot errors while polling count as "not ready yet".
pub async fn wait_for_content<P: PageController>(
    page: &mut P,
    signal: &ReadinessSignal,
    timeout: Duration,
    poll_interval: Duration,
) -> Readiness {
    let deadline = Instant::now() + timeout;

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        // Always take at least one snapshot, even with a zero timeout.
        let snapshot_budget = remaining.max(Duration::from_millis(1));
        match tokio::time::timeout(snapshot_budget, page.content()).await {
            Ok(Ok(html)) if signal.is_satisfied(&html) => return Readiness::Ready,
            Ok(Ok(_)) => {}
            Ok(Err(err)) => tracing::debug!(error = %err, "snapshot failed while waiting for content"),
            Err(_) => tracing::debug!("snapshot timed out while waiting for content"),
        }

        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            tracing::debug!(
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
                "content readiness not observed; proceeding anyway"
            );
            return Readiness::TimedOut;
        }
        tokio::time::sleep(poll_interval.min(remaining)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PageError;

    fn signal() -> ReadinessSignal {
        ReadinessSignal::new("£", ".product-card", 3).unwrap()
    }

    #[test]
    fn satisfied_by_currency_amount_in_body() {
        assert!(signal().is_satisfied("<html><body><span>£12.99</span></body></html>"));
    }

    #[test]
    fn currency_symbol_without_amount_is_not_enough() {
        assert!(!signal().is_satisfied("<html><body><p>Prices in £ shown at checkout</p></body></html>"));
    }

    #[test]
    fn only_body_text_counts_and_signal_is_reusable() {
        let signal = signal();
        let head_only = "<html><head><title>From £5 a month</title></head><body><p>Loading</p></body></html>";
        let rendered = "<html><body><p>Now £5.00</p></body></html>";
        for _ in 0..50 {
            assert!(!signal.is_satisfied(head_only));
            assert!(signal.is_satisfied(rendered));
        }
    }

    #[test]
    fn satisfied_by_element_count() {
        let cards = "<div class=\"product-card\"></div>".repeat(4);
        let html = format!("<html><body>{cards}</body></html>");
        assert!(signal().is_satisfied(&html));
    }

    #[test]
    fn element_count_must_exceed_threshold() {
        let cards = "<div class=\"product-card\"></div>".repeat(3);
        let html = format!("<html><body>{cards}</body></html>");
        assert!(!signal().is_satisfied(&html));
    }

    #[test]
    fn invalid_selector_is_rejected() {
        let err = ReadinessSignal::new("£", "div[", 1).unwrap_err();
        assert!(matches!(err, ScraperError::InvalidSelector { .. }));
    }

    /// Renders prices only after `render_after` snapshots.
    struct SlowPage {
        snapshots: u32,
        render_after: u32,
    }

    impl PageController for SlowPage {
        async fn goto(&mut self, _url: &str) -> Result<(), PageError> {
            Ok(())
        }

        async fn content(&mut self) -> Result<String, PageError> {
            self.snapshots += 1;
            if self.snapshots > self.render_after {
                Ok("<html><body>£4.50</body></html>".to_owned())
            } else {
                Ok("<html><body>Loading…</body></html>".to_owned())
            }
        }

        async fn scroll_to_bottom(&mut self) -> Result<(), PageError> {
            Ok(())
        }

        async fn close(self) {}
    }

    #[tokio::test]
    async fn waits_until_content_renders() {
        let mut page = SlowPage {
            snapshots: 0,
            render_after: 2,
        };
        let readiness = wait_for_content(
            &mut page,
            &signal(),
            Duration::from_secs(5),
            Duration::from_millis(1),
        )
        .await;
        assert_eq!(readiness, Readiness::Ready);
        assert_eq!(page.snapshots, 3);
    }

    #[tokio::test]
    async fn times_out_without_error() {
        let mut page = SlowPage {
            snapshots: 0,
            render_after: u32::MAX,
        };
        let readiness = wait_for_content(
            &mut page,
            &signal(),
            Duration::from_millis(20),
            Duration::from_millis(5),
        )
        .await;
        assert_eq!(readiness, Readiness::TimedOut);
        assert!(page.snapshots >= 1);
    }
}
