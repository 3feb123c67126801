//! Shared HTTP client for directory and profile page requests.
//!
//! Provides a configured [`reqwest::Client`] with an identifying
//! User-Agent, cookie support, a bounded redirect policy and the
//! configured timeout.

use crate::config::CrawlConfig;
use crate::error::FetchError;
use std::time::Duration;

/// User-Agent sent when the configuration does not override it.
pub const DEFAULT_USER_AGENT: &str = concat!(
    "faculty-search/",
    env!("CARGO_PKG_VERSION"),
    " (+research directory indexer)"
);

/// Build a [`reqwest::Client`] configured for page fetching.
///
/// The client has:
/// - Cookie store enabled (some CMS pages set a session cookie before redirecting)
/// - Timeout from config
/// - Custom User-Agent if configured, otherwise [`DEFAULT_USER_AGENT`]
/// - At most 10 redirects
///
/// # Errors
///
/// Returns [`FetchError::Client`] if the client cannot be constructed.
pub fn build_client(config: &CrawlConfig) -> Result<reqwest::Client, FetchError> {
    let ua = config
        .user_agent
        .clone()
        .unwrap_or_else(|| DEFAULT_USER_AGENT.to_owned());

    reqwest::Client::builder()
        .cookie_store(true)
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(ua)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| FetchError::Client(format!("failed to build HTTP client: {e}")))
}
