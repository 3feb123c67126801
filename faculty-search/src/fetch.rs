//! Document fetching behind a pluggable trait.
//!
//! The pipeline only needs "give me the markup at this URL or tell me why
//! not". [`HttpFetcher`] is the production implementation; tests substitute
//! in-memory fetchers or point it at a mock server.

use crate::config::CrawlConfig;
use crate::error::FetchError;
use crate::http;

/// Retrieves raw document text for a URL.
///
/// Failures are returned as [`FetchError`] values. Callers log them and skip
/// the URL; a fetch failure never aborts a batch on its own.
///
/// All implementations must be `Send + Sync` so fetches can be fanned out.
pub trait Fetcher: Send + Sync {
    /// Fetch the document at `url` and return its body as text.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] describing why the document could not be retrieved.
    fn fetch(
        &self,
        url: &str,
    ) -> impl std::future::Future<Output = Result<String, FetchError>> + Send;
}

/// [`Fetcher`] backed by a shared [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a fetcher from crawl configuration (timeout, User-Agent).
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Client`] if the HTTP client cannot be built.
    pub fn new(config: &CrawlConfig) -> Result<Self, FetchError> {
        Ok(Self {
            client: http::build_client(config)?,
        })
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let parsed = url::Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{url}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(FetchError::InvalidUrl(format!(
                "{url}: unsupported scheme `{}`",
                parsed.scheme()
            )));
        }

        tracing::trace!(%url, "fetching page");

        let response = self
            .client
            .get(parsed)
            .header("Accept", "text/html,application/xhtml+xml")
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Body(e.to_string()))?;

        tracing::trace!(%url, bytes = body.len(), "page received");
        Ok(body)
    }
}
