//! Directory crawl: seed page → directory pages → faculty cards → store.
//!
//! Fetches the seed page, discovers directory sub-pages, fetches them with
//! bounded concurrency (output order preserved), extracts accepted faculty
//! cards and inserts each into the store if its URL is new. Cards are stored
//! as each page arrives, so an interrupted crawl keeps what it has seen.

use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::cards::CardMatcher;
use crate::config::CrawlConfig;
use crate::discover::discover_links_in_html;
use crate::error::{Result, SearchError};
use crate::fetch::Fetcher;
use crate::store::RecordStore;

/// Counts describing one crawl run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlReport {
    /// Directory pages discovered on the seed page.
    pub directories_found: usize,
    /// Directory pages that could not be fetched.
    pub directories_failed: usize,
    /// Accepted faculty cards across all directory pages.
    pub cards_found: usize,
    /// Cards stored as new records.
    pub inserted: usize,
    /// Cards whose URL was already stored.
    pub duplicates: usize,
    /// Cards the store failed to write.
    pub store_failures: usize,
}

/// Crawl the configured department directory into `store`.
///
/// # Pipeline
///
/// 1. Validate `config` and fetch `config.seed_url`
/// 2. Discover directory links on the seed page
/// 3. Fetch directory pages concurrently (at most `config.concurrency` at once)
/// 4. Extract faculty cards from each page that was fetched
/// 5. `insert_if_absent` every card; the store decides what is a duplicate
///
/// # Errors
///
/// Returns [`SearchError::SeedUnreachable`] if the seed page cannot be
/// fetched, or a config/parse error for invalid configuration. Failures on
/// individual directory pages or inserts are logged and counted instead.
pub async fn crawl_directory<F, S>(fetcher: &F, store: &S, config: &CrawlConfig) -> Result<CrawlReport>
where
    F: Fetcher,
    S: RecordStore + ?Sized,
{
    config.validate()?;
    let matcher = CardMatcher::from_config(config)?;
    let seed = Url::parse(&config.seed_url)
        .map_err(|e| SearchError::Config(format!("invalid seed_url: {e}")))?;

    let seed_html = fetcher.fetch(seed.as_str()).await.map_err(|err| {
        tracing::error!(url = %seed, error = %err, "seed page unreachable");
        SearchError::SeedUnreachable(format!("{seed}: {err}"))
    })?;

    let directories = discover_links_in_html(&seed_html, &seed, &config.directory_patterns);
    tracing::info!(count = directories.len(), "found faculty directory links");

    let mut report = CrawlReport {
        directories_found: directories.len(),
        ..CrawlReport::default()
    };

    let mut pages = stream::iter(directories)
        .map(|url| async move {
            let outcome = fetcher.fetch(url.as_str()).await;
            (url, outcome)
        })
        .buffered(config.concurrency);

    // Each page's cards are stored before the next result is awaited.
    while let Some((url, outcome)) = pages.next().await {
        let html = match outcome {
            Ok(html) => html,
            Err(err) => {
                tracing::warn!(%url, error = %err, "skipping directory page");
                report.directories_failed += 1;
                continue;
            }
        };

        let entries = matcher.extract_html(&html, &url);
        tracing::info!(%url, count = entries.len(), "processed directory page");
        report.cards_found += entries.len();

        for entry in entries {
            match store.insert_if_absent(&entry) {
                Ok(true) => {
                    tracing::info!(name = %entry.name, url = %entry.profile_url, "stored faculty record");
                    report.inserted += 1;
                }
                Ok(false) => {
                    tracing::debug!(url = %entry.profile_url, "faculty record already stored");
                    report.duplicates += 1;
                }
                Err(err) => {
                    tracing::warn!(url = %entry.profile_url, error = %err, "failed to store faculty record");
                    report.store_failures += 1;
                }
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::store::MemoryRecordStore;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct MapFetcher {
        pages: HashMap<String, String>,
    }

    impl MapFetcher {
        fn new(pages: &[(&str, &str)]) -> Self {
            Self {
                pages: pages
                    .iter()
                    .map(|(u, h)| ((*u).to_owned(), (*h).to_owned()))
                    .collect(),
            }
        }
    }

    impl Fetcher for MapFetcher {
        async fn fetch(&self, url: &str) -> std::result::Result<String, FetchError> {
            self.pages
                .get(url)
                .cloned()
                .ok_or(FetchError::Status(404))
        }
    }

    const SEED: &str = "https://dept.example.edu/bio/index.shtml";

    fn config() -> CrawlConfig {
        CrawlConfig {
            seed_url: SEED.into(),
            ..Default::default()
        }
    }

    fn card(name: &str, href: &str) -> String {
        format!(
            r#"<div class="card-body"><h3>{name}</h3><div class="text-muted">Professor</div><a title="site" href="{href}">site</a></div>"#
        )
    }

    #[tokio::test]
    async fn unreachable_seed_is_fatal() {
        let fetcher = MapFetcher::new(&[]);
        let store = MemoryRecordStore::new();
        let err = crawl_directory(&fetcher, &store, &config()).await.unwrap_err();
        assert!(matches!(err, SearchError::SeedUnreachable(_)));
    }

    #[tokio::test]
    async fn invalid_config_rejected_before_fetching() {
        let fetcher = MapFetcher::new(&[]);
        let store = MemoryRecordStore::new();
        let bad = CrawlConfig {
            concurrency: 0,
            ..config()
        };
        let err = crawl_directory(&fetcher, &store, &bad).await.unwrap_err();
        assert!(matches!(err, SearchError::Config(_)));
    }

    #[tokio::test]
    async fn crawls_directories_and_dedups_by_url() {
        let seed_html = r#"
            <a href="faculty/index.shtml">Faculty</a>
            <a href="faculty/lecturers.shtml">Lecturers</a>
            <a href="faculty/emeriti.shtml">Emeriti</a>
            <a href="news.shtml">News</a>
        "#;
        let faculty = format!(
            "{}{}",
            card("Ann", "https://dept.example.edu/~ann/"),
            card("Bo", "/~bo/index.shtml")
        );
        let lecturers = format!(
            "{}{}",
            card("Ann again", "https://DEPT.example.edu/~ann#top"),
            card("Cy", "https://cy.example.org/")
        );
        let fetcher = MapFetcher::new(&[
            (SEED, seed_html),
            ("https://dept.example.edu/bio/faculty/index.shtml", &faculty),
            ("https://dept.example.edu/bio/faculty/lecturers.shtml", &lecturers),
        ]);
        let store = MemoryRecordStore::new();

        let report = crawl_directory(&fetcher, &store, &config()).await.expect("crawl");

        assert_eq!(report.directories_found, 3);
        assert_eq!(report.directories_failed, 1);
        assert_eq!(report.cards_found, 4);
        assert_eq!(report.inserted, 3);
        assert_eq!(report.duplicates, 1);

        let urls: Vec<String> = store
            .all_records()
            .expect("records")
            .into_iter()
            .map(|r| r.profile_url)
            .collect();
        assert_eq!(
            urls,
            vec![
                "https://dept.example.edu/~ann",
                "https://dept.example.edu/~bo/index.shtml",
                "https://cy.example.org/",
            ]
        );
    }

    #[tokio::test]
    async fn recrawl_inserts_nothing_new() {
        let seed_html = r#"<a href="faculty/index.shtml">Faculty</a>"#;
        let faculty = card("Ann", "https://dept.example.edu/~ann");
        let fetcher = MapFetcher::new(&[
            (SEED, seed_html),
            ("https://dept.example.edu/bio/faculty/index.shtml", &faculty),
        ]);
        let store = MemoryRecordStore::new();

        let first = crawl_directory(&fetcher, &store, &config()).await.expect("first");
        let second = crawl_directory(&fetcher, &store, &config()).await.expect("second");
        assert_eq!(first.inserted, 1);
        assert_eq!(second.inserted, 0);
        assert_eq!(second.duplicates, 1);
        assert_eq!(store.len(), 1);
    }

    struct RecordingFetcher<'a> {
        pages: MapFetcher,
        store: &'a MemoryRecordStore,
        observed: Mutex<Vec<usize>>,
    }

    impl Fetcher for RecordingFetcher<'_> {
        async fn fetch(&self, url: &str) -> std::result::Result<String, FetchError> {
            if let Ok(mut observed) = self.observed.lock() {
                observed.push(self.store.len());
            }
            self.pages.fetch(url).await
        }
    }

    #[tokio::test]
    async fn cards_stored_before_next_page_is_fetched() {
        let seed_html = r#"
            <a href="faculty/a.shtml">A</a>
            <a href="faculty/b.shtml">B</a>
            <a href="faculty/c.shtml">C</a>
        "#;
        let a = card("Ann", "/~ann");
        let b = card("Bo", "/~bo");
        let c = card("Cy", "/~cy");
        let store = MemoryRecordStore::new();
        let fetcher = RecordingFetcher {
            pages: MapFetcher::new(&[
                (SEED, seed_html),
                ("https://dept.example.edu/bio/faculty/a.shtml", &a),
                ("https://dept.example.edu/bio/faculty/b.shtml", &b),
                ("https://dept.example.edu/bio/faculty/c.shtml", &c),
            ]),
            store: &store,
            observed: Mutex::new(Vec::new()),
        };
        let config = CrawlConfig {
            concurrency: 1,
            ..config()
        };

        let report = crawl_directory(&fetcher, &store, &config).await.expect("crawl");

        assert_eq!(report.inserted, 3);
        assert_eq!(*fetcher.observed.lock().expect("lock"), vec![0, 0, 1, 2]);
        assert_eq!(store.len(), 3);
    }
}
