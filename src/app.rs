//! Command implementations shared by the CLI and tests.
//!
//! Each stage takes the store by reference; the caller opens it once and
//! drops it at exit.

use std::fmt::Write as _;

use faculty_search::{
    CrawlReport, ExtractReport, HttpFetcher, QueryRequest, RecordStore, SearchPage,
};

use crate::config::AppConfig;
use crate::error::Result;
use crate::store::SqliteRecordStore;

/// Printed when the corpus holds no research text at all.
pub const EMPTY_CORPUS_MESSAGE: &str =
    "No data indexed yet. Run `faculty-finder index` to crawl and extract profiles.";

/// Printed when the corpus exists but nothing matched the query.
pub const NO_MATCHES_MESSAGE: &str = "No matches for your query.";

const SEPARATOR_WIDTH: usize = 50;

/// Open the configured SQLite store.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or initialised.
pub fn open_store(config: &AppConfig) -> Result<SqliteRecordStore> {
    SqliteRecordStore::open(&config.store.database_path)
}

/// Crawl the faculty directory into `store` over HTTP.
///
/// # Errors
///
/// Fails on invalid configuration or an unreachable seed page.
pub async fn crawl<S>(config: &AppConfig, store: &S) -> Result<CrawlReport>
where
    S: RecordStore + ?Sized,
{
    let fetcher = HttpFetcher::new(&config.crawl).map_err(faculty_search::SearchError::from)?;
    let report = faculty_search::crawl_directory(&fetcher, store, &config.crawl).await?;
    tracing::info!(
        directories = report.directories_found,
        inserted = report.inserted,
        duplicates = report.duplicates,
        "crawl finished"
    );
    Ok(report)
}

/// Fetch every stored profile page and store its research text.
///
/// # Errors
///
/// Fails on invalid configuration or if the store cannot be listed.
pub async fn extract<S>(config: &AppConfig, store: &S) -> Result<ExtractReport>
where
    S: RecordStore + ?Sized,
{
    let fetcher = HttpFetcher::new(&config.crawl).map_err(faculty_search::SearchError::from)?;
    let report = faculty_search::extract_profiles(&fetcher, store, &config.crawl).await?;
    tracing::info!(
        processed = report.processed,
        updated = report.updated,
        empty = report.empty,
        failures = report.fetch_failures,
        "extraction finished"
    );
    Ok(report)
}

/// Crawl, then extract.
///
/// # Errors
///
/// Same as [`crawl`] and [`extract`].
pub async fn index<S>(config: &AppConfig, store: &S) -> Result<(CrawlReport, ExtractReport)>
where
    S: RecordStore + ?Sized,
{
    let crawled = crawl(config, store).await?;
    let extracted = extract(config, store).await?;
    Ok((crawled, extracted))
}

/// Run a query against the stored corpus.
///
/// `page_size` falls back to the configured default.
///
/// # Errors
///
/// Fails on invalid rank configuration, a zero page size, or a store error.
pub fn search<S>(
    config: &AppConfig,
    store: &S,
    query: &str,
    page_number: usize,
    page_size: Option<usize>,
) -> Result<SearchPage>
where
    S: RecordStore + ?Sized,
{
    let request = QueryRequest {
        query: query.to_owned(),
        page_number: page_number.max(1),
        page_size: page_size.unwrap_or(config.rank.page_size),
    };
    Ok(faculty_search::search(store, &request, &config.rank)?)
}

/// Render a result page for the terminal.
///
/// Empty corpus and "no matches" produce distinct messages.
pub fn format_page(query: &str, page: &SearchPage) -> String {
    if page.is_empty_corpus() {
        return format!("{EMPTY_CORPUS_MESSAGE}\n");
    }
    if !page.has_matches() {
        return format!("{NO_MATCHES_MESSAGE}\n");
    }

    let mut out = format!("\nResults for query: \"{query}\" (Page {})\n", page.page_number);
    if page.results.is_empty() {
        out.push_str("No results on this page.\n");
        return out;
    }

    let separator = "-".repeat(SEPARATOR_WIDTH);
    for result in &page.results {
        let _ = writeln!(out, "Faculty: {}", result.name);
        let _ = writeln!(out, "URL: {}", result.profile_url);
        let _ = writeln!(out, "Snippet: {}...", result.snippet);
        let _ = writeln!(out, "Relevance Score: {:.4}", result.relevance_score);
        let _ = writeln!(out, "{separator}");
    }
    out
}

/// One-line summary of a crawl.
pub fn format_crawl_report(report: &CrawlReport) -> String {
    format!(
        "Crawled {} directory pages ({} failed): {} cards, {} new, {} already stored",
        report.directories_found,
        report.directories_failed,
        report.cards_found,
        report.inserted,
        report.duplicates,
    )
}

/// One-line summary of an extraction run.
pub fn format_extract_report(report: &ExtractReport) -> String {
    format!(
        "Processed {} profiles: {} with research text, {} empty, {} unreachable",
        report.processed, report.updated, report.empty, report.fetch_failures,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use faculty_search::{RankedResult, RecordId};

    fn result(name: &str, score: f64) -> RankedResult {
        RankedResult {
            id: RecordId(1),
            name: name.into(),
            profile_url: "https://example.edu/~a".into(),
            relevance_score: score,
            snippet: "**Coral** reefs".into(),
        }
    }

    fn page(corpus_size: usize, results: Vec<RankedResult>) -> SearchPage {
        SearchPage {
            corpus_size,
            total_results: results.len(),
            matched_results: results.iter().filter(|r| r.relevance_score > 0.0).count(),
            page_number: 1,
            results,
        }
    }

    #[test]
    fn empty_corpus_message() {
        assert_eq!(format_page("coral", &page(0, vec![])), format!("{EMPTY_CORPUS_MESSAGE}\n"));
    }

    #[test]
    fn no_matches_message() {
        let out = format_page("coral", &page(1, vec![result("A", 0.0)]));
        assert_eq!(out, format!("{NO_MATCHES_MESSAGE}\n"));
    }

    #[test]
    fn results_formatted_with_four_decimal_scores() {
        let out = format_page("coral", &page(2, vec![result("Ann Lee", 0.123456)]));
        assert!(out.contains("Results for query: \"coral\" (Page 1)"));
        assert!(out.contains("Faculty: Ann Lee\n"));
        assert!(out.contains("URL: https://example.edu/~a\n"));
        assert!(out.contains("Snippet: **Coral** reefs...\n"));
        assert!(out.contains("Relevance Score: 0.1235\n"));
        assert!(out.contains(&"-".repeat(SEPARATOR_WIDTH)));
    }

    #[test]
    fn page_past_the_end() {
        let mut p = page(3, vec![]);
        p.total_results = 3;
        p.matched_results = 2;
        p.page_number = 4;
        let out = format_page("coral", &p);
        assert!(out.contains("(Page 4)"));
        assert!(out.ends_with("No results on this page.\n"));
    }

    #[test]
    fn report_summaries() {
        let crawl = CrawlReport {
            directories_found: 3,
            directories_failed: 1,
            cards_found: 5,
            inserted: 4,
            duplicates: 1,
            store_failures: 0,
        };
        assert_eq!(
            format_crawl_report(&crawl),
            "Crawled 3 directory pages (1 failed): 5 cards, 4 new, 1 already stored"
        );
        let extract = ExtractReport {
            processed: 4,
            updated: 3,
            empty: 0,
            fetch_failures: 1,
            store_failures: 0,
        };
        assert_eq!(
            format_extract_report(&extract),
            "Processed 4 profiles: 3 with research text, 0 empty, 1 unreachable"
        );
    }
}
