//! Faculty card extraction from directory pages.
//!
//! Directory pages list people as cards. A card becomes a [`FacultyEntry`]
//! only when it carries a name, a title label and an outbound link, and,
//! when a personal-page pattern is configured, the link points somewhere
//! matching it. Cards failing these checks are skipped silently.

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::config::{parse_selector, CrawlConfig};
use crate::error::Result;
use crate::orchestrator::url_normalize::normalize_url;
use crate::profile::collapse_whitespace;
use crate::types::FacultyEntry;

/// Compiled card selectors plus the optional personal-page scope filter.
#[derive(Debug, Clone)]
pub struct CardMatcher {
    card: Selector,
    name: Selector,
    title: Selector,
    link: Selector,
    personal_page_pattern: Option<String>,
}

impl CardMatcher {
    /// Compile the card selectors from crawl configuration.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SearchError::Parse`] if a selector is invalid.
    pub fn from_config(config: &CrawlConfig) -> Result<Self> {
        Ok(Self {
            card: parse_selector(&config.card.card)?,
            name: parse_selector(&config.card.name)?,
            title: parse_selector(&config.card.title)?,
            link: parse_selector(&config.card.link)?,
            personal_page_pattern: config
                .personal_page_pattern
                .as_deref()
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_owned),
        })
    }

    /// Extract accepted faculty entries from a parsed directory page.
    ///
    /// Links are resolved against `page_url` and canonicalised. Output keeps
    /// page order and may contain repeats; the store rejects those.
    pub fn extract(&self, document: &Html, page_url: &Url) -> Vec<FacultyEntry> {
        document
            .select(&self.card)
            .filter_map(|card| self.entry_from_card(card, page_url))
            .collect()
    }

    /// Parse raw markup and extract its faculty entries.
    pub fn extract_html(&self, html: &str, page_url: &Url) -> Vec<FacultyEntry> {
        self.extract(&Html::parse_document(html), page_url)
    }

    fn entry_from_card(&self, card: ElementRef<'_>, page_url: &Url) -> Option<FacultyEntry> {
        let name = collapse_whitespace(&card.select(&self.name).next()?.text().collect::<String>());
        let title = collapse_whitespace(&card.select(&self.title).next()?.text().collect::<String>());
        let href = card.select(&self.link).next()?.value().attr("href")?;

        if name.is_empty() {
            return None;
        }

        let link = page_url.join(href.trim()).ok()?;
        if !matches!(link.scheme(), "http" | "https") {
            return None;
        }
        if !self.in_scope(&link) {
            tracing::debug!(%link, "card link outside personal page scope");
            return None;
        }

        Some(FacultyEntry {
            name,
            title,
            profile_url: normalize_url(link.as_str()),
        })
    }

    fn in_scope(&self, link: &Url) -> bool {
        match &self.personal_page_pattern {
            None => true,
            Some(pattern) => {
                let host_path = format!("{}{}", link.host_str().unwrap_or_default(), link.path());
                host_path.contains(pattern.as_str())
            }
        }
    }
}
