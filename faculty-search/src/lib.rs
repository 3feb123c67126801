//! # faculty-search
//!
//! Faculty profile discovery, research-text extraction and relevance search.
//!
//! Crawls a department's faculty directory, follows each faculty card to the
//! member's personal page, extracts the research statement and ranks the
//! stored corpus against free-text queries with a TF-IDF vector space.
//!
//! ## Design
//!
//! - Pages are fetched through the [`Fetcher`] trait; [`HttpFetcher`] is the
//!   reqwest-backed implementation
//! - HTML is parsed with CSS selectors, all of them configurable
//! - Directory and profile pages are fetched concurrently with a fixed bound
//! - Persistence sits behind [`RecordStore`]; the store owns URL uniqueness
//! - Ranking rebuilds the vector space from the current corpus per query,
//!   so results always reflect what is stored
//!
//! ## Failure model
//!
//! Only an unreachable seed page aborts a crawl. Every other per-page failure
//! is logged and skipped.

pub mod cards;
pub mod config;
pub mod discover;
pub mod error;
pub mod fetch;
pub mod http;
pub mod orchestrator;
pub mod profile;
pub mod rank;
pub mod store;
pub mod text;
pub mod types;

pub use config::{CardSelectors, CrawlConfig, RankConfig};
pub use error::{FetchError, Result, SearchError};
pub use fetch::{Fetcher, HttpFetcher};
pub use orchestrator::{crawl_directory, extract_profiles, CrawlReport, ExtractReport};
pub use store::{MemoryRecordStore, RecordStore};
pub use types::{FacultyEntry, FacultyRecord, QueryRequest, RankedResult, RecordId, SearchPage};

/// Rank the stored corpus against a query and return the requested page.
///
/// Only records with non-blank research text take part. An empty corpus is
/// not an error: the returned page reports
/// [`SearchPage::is_empty_corpus`] so callers can tell "nothing indexed"
/// apart from "no matches".
///
/// # Errors
///
/// Returns [`SearchError::Config`] for an invalid `config` or a zero page
/// size, or the store's error if the corpus cannot be read.
///
/// # Examples
///
/// ```
/// use faculty_search::{FacultyEntry, MemoryRecordStore, QueryRequest, RankConfig, RecordStore};
///
/// # fn main() -> faculty_search::Result<()> {
/// let store = MemoryRecordStore::new();
/// store.insert_if_absent(&FacultyEntry {
///     name: "Jane Doe".into(),
///     title: "Professor".into(),
///     profile_url: "https://example.edu/~jdoe".into(),
/// })?;
/// let record = store.find_by_url("https://example.edu/~jdoe")?.expect("stored");
/// store.update_research_text(record.id, "Coral reef ecology and climate change")?;
///
/// let page = faculty_search::search(&store, &QueryRequest::new("coral reefs"), &RankConfig::default())?;
/// assert_eq!(page.results[0].name, "Jane Doe");
/// assert!(page.results[0].snippet.contains("**Coral**"));
/// # Ok(())
/// # }
/// ```
pub fn search<S>(store: &S, request: &QueryRequest, config: &RankConfig) -> Result<SearchPage>
where
    S: RecordStore + ?Sized,
{
    config.validate()?;
    if request.page_size == 0 {
        return Err(SearchError::Config("page_size must be greater than 0".into()));
    }
    let corpus = store.all_with_non_empty_research()?;
    tracing::debug!(documents = corpus.len(), page = request.page_number, "searching corpus");
    Ok(rank::search_corpus(request, &corpus, config))
}
