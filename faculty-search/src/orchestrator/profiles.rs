//! Profile pass: fetch every stored record's personal page and persist its
//! research text and term counts.

use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};

use crate::config::{parse_selector, CrawlConfig};
use crate::error::Result;
use crate::fetch::Fetcher;
use crate::profile::{extract_research_html, ExtractionSource};
use crate::store::RecordStore;
use crate::text::Normalizer;

/// Counts describing one extraction run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractReport {
    /// Records whose page was requested.
    pub processed: usize,
    /// Records that received non-empty research text.
    pub updated: usize,
    /// Records whose page yielded no research text.
    pub empty: usize,
    /// Profile pages that could not be fetched.
    pub fetch_failures: usize,
    /// Records the store failed to update.
    pub store_failures: usize,
}

/// Fetch each stored profile page and record its research text.
///
/// Pages are fetched at most `config.concurrency` at a time. A page with no
/// research text stores an empty string, which keeps the record out of the
/// ranking corpus. Fetch failures leave the record untouched. Each record is
/// written as its page arrives, so stopping early keeps finished work.
///
/// # Errors
///
/// Only configuration errors and failing to list the stored records abort
/// the run; per-record failures are logged and counted.
pub async fn extract_profiles<F, S>(fetcher: &F, store: &S, config: &CrawlConfig) -> Result<ExtractReport>
where
    F: Fetcher,
    S: RecordStore + ?Sized,
{
    config.validate()?;
    let research_block = parse_selector(&config.research_selector)?;
    let normalizer = Normalizer::default();
    let records = store.all_records()?;
    tracing::info!(count = records.len(), "extracting research text");

    let mut pages = stream::iter(records)
        .map(|record| async move {
            let outcome = fetcher.fetch(&record.profile_url).await;
            (record, outcome)
        })
        .buffered(config.concurrency);

    let mut report = ExtractReport::default();
    // Each record is written before the next result is awaited.
    while let Some((record, outcome)) = pages.next().await {
        report.processed += 1;
        let html = match outcome {
            Ok(html) => html,
            Err(err) => {
                tracing::warn!(url = %record.profile_url, error = %err, "profile page unavailable");
                report.fetch_failures += 1;
                continue;
            }
        };

        let extract = extract_research_html(&html, &research_block);
        match extract.source {
            ExtractionSource::SummaryBlock => {}
            ExtractionSource::Paragraphs => {
                tracing::debug!(url = %record.profile_url, "no summary block, used paragraphs");
            }
            ExtractionSource::Missing => {
                tracing::info!(url = %record.profile_url, "no research text found");
            }
        }

        if let Err(err) = store.update_research_text(record.id, &extract.text) {
            tracing::warn!(id = %record.id, error = %err, "failed to store research text");
            report.store_failures += 1;
            continue;
        }

        let terms = normalizer.term_counts(&extract.text);
        if let Err(err) = store.store_terms(record.id, &terms) {
            tracing::warn!(id = %record.id, error = %err, "failed to store term counts");
        }

        if extract.is_missing() {
            report.empty += 1;
        } else {
            tracing::info!(name = %record.name, terms = terms.len(), "stored research text");
            report.updated += 1;
        }
    }

    Ok(report)
}
