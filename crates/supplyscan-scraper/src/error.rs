use thiserror::Error;

/// Errors raised by a [`crate::PageController`] implementation.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    #[error("no document loaded; navigate first")]
    NoDocument,

    #[error("in-page evaluation failed: {0}")]
    Evaluation(String),
}

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("invalid selector \"{selector}\": {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    #[error("unknown extraction profile '{0}'")]
    UnknownProfile(String),

    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}
