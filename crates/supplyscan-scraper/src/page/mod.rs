//! Browser-automation seam.
//!
//! The engine never drives a browser directly. It talks to a
//! [`PageController`] obtained from a [`Browser`], reads document snapshots
//! as HTML strings, and does all extraction over a parsed
//! [`scraper::Html`] on its own side of the boundary. A headless-browser
//! binding and the bundled [`http::HttpBrowser`] are equally valid
//! implementations.

pub mod http;

use std::future::Future;

use crate::error::PageError;

/// A single browser tab (or equivalent) reused across every URL in a run.
pub trait PageController: Send {
    /// Navigates to `url`, replacing the current document.
    ///
    /// Implementations need not bound their own running time; callers wrap
    /// this in a timeout.
    fn goto(&mut self, url: &str) -> impl Future<Output = Result<(), PageError>> + Send;

    /// Returns a snapshot of the current document as serialized HTML.
    fn content(&mut self) -> impl Future<Output = Result<String, PageError>> + Send;

    /// Scrolls to the bottom of the document to trigger lazy loading.
    fn scroll_to_bottom(&mut self) -> impl Future<Output = Result<(), PageError>> + Send;

    /// Releases the page. Called exactly once, on every exit path of a run.
    fn close(self) -> impl Future<Output = ()> + Send
    where
        Self: Sized;
}

/// Source of fresh [`PageController`]s.
pub trait Browser: Send + Sync {
    type Page: PageController;

    /// Opens a new page.
    ///
    /// # Errors
    ///
    /// Returns [`PageError`] when the underlying browser cannot provide a page.
    fn new_page(&self) -> impl Future<Output = Result<Self::Page, PageError>> + Send;
}
