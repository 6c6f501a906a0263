//! Bounded navigation retry.
//!
//! Every attempt is capped by a timeout and failures back off exponentially.
//! The outcome is a plain `bool`: the caller logs and skips the URL, it never
//! has to unwind an error.

use std::time::Duration;

use crate::page::PageController;

/// How hard to try before giving up on a URL.
#[derive(Debug, Clone)]
pub struct NavigationPolicy {
    /// Total attempts including the first. Values below 1 are treated as 1.
    pub max_attempts: u32,
    /// Upper bound on a single `goto` call.
    pub attempt_timeout: Duration,
    /// Base delay for exponential backoff: `backoff_base * 2^attempt`.
    pub backoff_base: Duration,
}

/// Navigates `page` to `url`, retrying on error or timeout.
///
/// Returns `true` as soon as one attempt succeeds and `false` once all
/// `max_attempts` are exhausted.
///
/// # Backoff schedule (example with `backoff_base = 1s`, `max_attempts = 4`)
///
/// | Attempt | Sleep before next attempt |
/// |---------|--------------------------|
/// | 0 (initial) | 1 × 2^0 = 1 s |
/// | 1 | 1 × 2^1 = 2 s |
/// | 2 | 1 × 2^2 = 4 s |
/// | 3 (last) | none; gives up |
pub async fn navigate_with_retry<P: PageController>(
    page: &mut P,
    url: &str,
    policy: &NavigationPolicy,
) -> bool {
    let max_attempts = policy.max_attempts.max(1);

    for attempt in 0..max_attempts {
        match tokio::time::timeout(policy.attempt_timeout, page.goto(url)).await {
            Ok(Ok(())) => {
                if attempt > 0 {
                    tracing::debug!(url, attempt, "navigation succeeded after retry");
                }
                return true;
            }
            Ok(Err(err)) => {
                tracing::warn!(url, attempt, max_attempts, error = %err, "navigation attempt failed");
            }
            Err(_) => {
                tracing::warn!(
                    url,
                    attempt,
                    max_attempts,
                    timeout_ms = u64::try_from(policy.attempt_timeout.as_millis()).unwrap_or(u64::MAX),
                    "navigation attempt timed out"
                );
            }
        }

        if attempt + 1 < max_attempts {
            let factor = 1u32 << attempt.min(31);
            let delay = policy.backoff_base.saturating_mul(factor);
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }
    }

    false
}
