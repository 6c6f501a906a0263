//! Static-document [`Browser`] backed by `reqwest`.
//!
//! Fetches server-rendered HTML and exposes it through the
//! [`PageController`] interface. No script runs, so scrolling is a no-op
//! and content that only appears after client-side rendering is invisible;
//! strategy A (embedded script data) is usually what finds products on
//! such pages.

use std::time::Duration;

use reqwest::Client;

use crate::error::{PageError, ScraperError};
use crate::page::{Browser, PageController};

/// Hands out [`HttpPage`]s sharing one connection pool.
#[derive(Debug, Clone)]
pub struct HttpBrowser {
    client: Client,
}

impl HttpBrowser {
    /// Creates an `HttpBrowser` with the given request timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }
}

impl Browser for HttpBrowser {
    type Page = HttpPage;

    async fn new_page(&self) -> Result<HttpPage, PageError> {
        Ok(HttpPage {
            client: self.client.clone(),
            url: None,
            body: None,
        })
    }
}

/// The most recently fetched document for one logical page.
#[derive(Debug)]
pub struct HttpPage {
    client: Client,
    url: Option<String>,
    body: Option<String>,
}

impl HttpPage {
    /// URL of the currently loaded document, if any.
    #[must_use]
    pub fn current_url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}

impl PageController for HttpPage {
    async fn goto(&mut self, url: &str) -> Result<(), PageError> {
        let response = self
            .client
            .get(url)
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8",
            )
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-GB,en;q=0.9")
            .header(reqwest::header::CACHE_CONTROL, "no-cache")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PageError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Err(PageError::Navigation {
                url: url.to_owned(),
                reason: "empty response body".to_owned(),
            });
        }

        self.url = Some(url.to_owned());
        self.body = Some(body);
        Ok(())
    }

    async fn content(&mut self) -> Result<String, PageError> {
        self.body.clone().ok_or(PageError::NoDocument)
    }

    async fn scroll_to_bottom(&mut self) -> Result<(), PageError> {
        Ok(())
    }

    async fn close(self) {
        tracing::trace!(url = ?self.url, "closing http page");
    }
}
