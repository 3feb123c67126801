//! Error types for the faculty-search crate.
//!
//! Per-URL problems are modelled as values ([`FetchError`]) so callers can
//! log them and move on. Only [`SearchError::SeedUnreachable`] aborts a
//! crawl run.

/// Failure kinds reported by a [`crate::fetch::Fetcher`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The URL could not be parsed or uses an unsupported scheme.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Connection, DNS, TLS or timeout failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with a non-success status code.
    #[error("HTTP status {0}")]
    Status(u16),

    /// The response body could not be read or decoded.
    #[error("body read failed: {0}")]
    Body(String),

    /// The HTTP client itself could not be constructed.
    #[error("client error: {0}")]
    Client(String),
}

/// Errors that can occur while crawling, extracting or ranking.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// A fetch failed where the caller could not skip it.
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// The root directory page could not be retrieved; the crawl cannot start.
    #[error("seed page unreachable: {0}")]
    SeedUnreachable(String),

    /// HTML or selector parsing failed.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid configuration.
    #[error("config error: {0}")]
    Config(String),

    /// The record store rejected an operation.
    #[error("store error: {0}")]
    Store(String),
}

/// Convenience type alias for faculty-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
