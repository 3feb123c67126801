//! Crawl and ranking configuration with sensible defaults.
//!
//! [`CrawlConfig`] controls where discovery starts, which links count as
//! directory pages, how faculty cards and research blocks are located, and
//! fetch behaviour. [`RankConfig`] controls the vector space and result
//! presentation. Both deserialize with `#[serde(default)]` so partial TOML
//! sections work.

use crate::error::SearchError;
use scraper::Selector;
use serde::{Deserialize, Serialize};

/// Biological Sciences index page at Cal Poly Pomona.
pub const DEFAULT_SEED_URL: &str = "https://www.cpp.edu/sci/biological-sciences/index.shtml";

/// CSS selectors locating the parts of a faculty card on a directory page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardSelectors {
    /// Container of a single faculty card.
    pub card: String,
    /// Display name inside the card.
    pub name: String,
    /// Title or role label inside the card.
    pub title: String,
    /// Outbound link to the personal page inside the card.
    pub link: String,
}

impl Default for CardSelectors {
    fn default() -> Self {
        Self {
            card: "div.card-body".into(),
            name: "h3".into(),
            title: "div.text-muted".into(),
            link: "a[title]".into(),
        }
    }
}

/// Configuration for discovery and extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlConfig {
    /// Root directory page. Failing to fetch it aborts the crawl.
    pub seed_url: String,
    /// Path substrings that mark a link as a directory sub-page.
    pub directory_patterns: Vec<String>,
    /// Faculty card selectors.
    pub card: CardSelectors,
    /// When set, a card is accepted only if its resolved link's
    /// `host + path` contains this substring. `None` accepts any link.
    pub personal_page_pattern: Option<String>,
    /// Container holding the research summary on a profile page.
    pub research_selector: String,
    /// Maximum number of pages fetched at once.
    pub concurrency: usize,
    /// Per-request timeout in seconds.
    pub timeout_seconds: u64,
    /// Custom User-Agent. `None` uses the crate's identifying agent.
    pub user_agent: Option<String>,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            seed_url: DEFAULT_SEED_URL.into(),
            directory_patterns: vec![
                "/faculty/index.shtml".into(),
                "/faculty/lecturers.shtml".into(),
                "/faculty/emeriti.shtml".into(),
            ],
            card: CardSelectors::default(),
            personal_page_pattern: None,
            research_selector: "div.section-intro".into(),
            concurrency: 4,
            timeout_seconds: 10,
            user_agent: None,
        }
    }
}

impl CrawlConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `seed_url` must be an absolute URL
    /// - `directory_patterns` must contain at least one non-empty pattern
    /// - `concurrency` and `timeout_seconds` must be greater than 0
    /// - every selector must parse
    pub fn validate(&self) -> Result<(), SearchError> {
        if url::Url::parse(&self.seed_url).is_err() {
            return Err(SearchError::Config(format!(
                "seed_url is not an absolute URL: {}",
                self.seed_url
            )));
        }
        if self.directory_patterns.iter().all(|p| p.trim().is_empty()) {
            return Err(SearchError::Config(
                "at least one directory pattern must be configured".into(),
            ));
        }
        if self.concurrency == 0 {
            return Err(SearchError::Config(
                "concurrency must be greater than 0".into(),
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        for selector in [
            &self.card.card,
            &self.card.name,
            &self.card.title,
            &self.card.link,
            &self.research_selector,
        ] {
            parse_selector(selector)?;
        }
        Ok(())
    }
}

/// Configuration for ranking and result presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankConfig {
    /// Vocabulary cap; the terms with highest document frequency are kept.
    pub max_features: usize,
    /// Results per page when the caller does not specify one.
    pub page_size: usize,
    /// Characters of research text kept in a snippet.
    pub snippet_chars: usize,
    /// Marker written on both sides of a highlighted query term.
    pub highlight_marker: String,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            max_features: 5000,
            page_size: crate::types::DEFAULT_PAGE_SIZE,
            snippet_chars: 200,
            highlight_marker: "**".into(),
        }
    }
}

impl RankConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_features == 0 {
            return Err(SearchError::Config(
                "max_features must be greater than 0".into(),
            ));
        }
        if self.page_size == 0 {
            return Err(SearchError::Config("page_size must be greater than 0".into()));
        }
        if self.snippet_chars == 0 {
            return Err(SearchError::Config(
                "snippet_chars must be greater than 0".into(),
            ));
        }
        if self.highlight_marker.is_empty() {
            return Err(SearchError::Config(
                "highlight_marker must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Parse a CSS selector, mapping failures to [`SearchError::Parse`].
pub(crate) fn parse_selector(selector: &str) -> Result<Selector, SearchError> {
    Selector::parse(selector)
        .map_err(|e| SearchError::Parse(format!("invalid selector `{selector}`: {e:?}")))
}
