//! Lazy-load scrolling.

use std::time::Duration;

use crate::page::PageController;

#[derive(Debug, Clone)]
pub struct ScrollPolicy {
    pub max_iterations: u32,
    /// Pause after each scroll to let new content render.
    pub pause: Duration,
    /// Upper bound on a single scroll or snapshot call.
    pub step_timeout: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollStop {
    NoGrowth,
    IterationLimit,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollOutcome {
    /// Scrolls that produced new content.
    pub grew: u32,
    pub stopped: ScrollStop,
}

/// Scrolls until the document stops growing or `max_iterations` is reached.
///
/// Document size stands in for page height. A scroll or snapshot failure
/// ends the loop quietly; extraction proceeds on whatever is loaded.
pub async fn load_lazy_content<P: PageController>(
    page: &mut P,
    policy: &ScrollPolicy,
) -> ScrollOutcome {
    let mut grew = 0u32;
    let Some(mut previous) = measure(page, policy.step_timeout).await else {
        return ScrollOutcome {
            grew,
            stopped: ScrollStop::Failed,
        };
    };

    for _ in 0..policy.max_iterations {
        match tokio::time::timeout(policy.step_timeout, page.scroll_to_bottom()).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                tracing::debug!(error = %err, grew, "scroll failed; continuing with loaded content");
                return ScrollOutcome {
                    grew,
                    stopped: ScrollStop::Failed,
                };
            }
            Err(_) => {
                tracing::debug!(grew, "scroll timed out; continuing with loaded content");
                return ScrollOutcome {
                    grew,
                    stopped: ScrollStop::Failed,
                };
            }
        }

        if !policy.pause.is_zero() {
            tokio::time::sleep(policy.pause).await;
        }

        let Some(current) = measure(page, policy.step_timeout).await else {
            return ScrollOutcome {
                grew,
                stopped: ScrollStop::Failed,
            };
        };
        if current <= previous {
            return ScrollOutcome {
                grew,
                stopped: ScrollStop::NoGrowth,
            };
        }
        previous = current;
        grew += 1;
    }

    ScrollOutcome {
        grew,
        stopped: ScrollStop::IterationLimit,
    }
}

async fn measure<P: PageController>(page: &mut P, step_timeout: Duration) -> Option<usize> {
    match tokio::time::timeout(step_timeout, page.content()).await {
        Ok(Ok(html)) => Some(html.len()),
        Ok(Err(err)) => {
            tracing::debug!(error = %err, "snapshot failed during scroll");
            None
        }
        Err(_) => None,
    }
}
