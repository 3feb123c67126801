//! Relevance ranking: TF-IDF vector space, cosine scoring, snippets, pagination.
//!
//! The vector space is rebuilt from the corpus snapshot on every query.
//! Ranking is a pure function of `(query, corpus, config)`; ties keep corpus
//! order so repeated queries return identical pages.

pub mod snippet;
pub mod tfidf;

use crate::config::RankConfig;
use crate::text::Normalizer;
use crate::types::{FacultyRecord, QueryRequest, RankedResult, SearchPage};

use self::snippet::highlight_snippet;
use self::tfidf::VectorSpace;

/// Rank every record with research text against `query`.
///
/// Records whose research text is absent or blank are skipped. An empty
/// corpus yields an empty sequence. Results are sorted by descending score;
/// equal scores keep corpus order.
pub fn rank(query: &str, corpus: &[FacultyRecord], config: &RankConfig) -> Vec<RankedResult> {
    let documents: Vec<(&FacultyRecord, &str)> = corpus
        .iter()
        .filter_map(|record| record.research().map(|text| (record, text)))
        .collect();

    if documents.is_empty() {
        tracing::debug!("ranking skipped: empty corpus");
        return Vec::new();
    }

    let texts: Vec<&str> = documents.iter().map(|(_, text)| *text).collect();
    let space = VectorSpace::fit(&texts, Normalizer::default(), config.max_features);
    let query_vector = space.transform(query);
    let scores = space.similarities(&query_vector);

    tracing::trace!(
        query,
        documents = documents.len(),
        vocabulary = space.vocabulary_len(),
        query_terms = query_vector.nnz(),
        "ranked corpus"
    );

    let mut results: Vec<RankedResult> = documents
        .into_iter()
        .zip(scores)
        .map(|((record, text), score)| RankedResult {
            id: record.id,
            name: record.name.clone(),
            profile_url: record.profile_url.clone(),
            relevance_score: score,
            snippet: highlight_snippet(
                text,
                query,
                config.snippet_chars,
                &config.highlight_marker,
            ),
        })
        .collect();

    // `sort_by` is stable: equal scores keep corpus order.
    results.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));
    results
}

/// Slice `[(page - 1) * size, page * size)` of `results`.
///
/// Page numbers below 1 are treated as 1; pages past the end are empty.
pub fn paginate<T: Clone>(results: &[T], page_number: usize, page_size: usize) -> Vec<T> {
    let page_number = page_number.max(1);
    let start = (page_number - 1).saturating_mul(page_size);
    if start >= results.len() {
        return Vec::new();
    }
    let end = start.saturating_add(page_size).min(results.len());
    results[start..end].to_vec()
}

/// Rank, then select the requested page.
pub fn search_corpus(
    request: &QueryRequest,
    corpus: &[FacultyRecord],
    config: &RankConfig,
) -> SearchPage {
    let corpus_size = corpus.iter().filter(|r| r.research().is_some()).count();
    let ranked = rank(&request.query, corpus, config);
    let page_number = request.page_number.max(1);

    SearchPage {
        corpus_size,
        total_results: ranked.len(),
        matched_results: ranked.iter().filter(|r| r.relevance_score > 0.0).count(),
        page_number,
        results: paginate(&ranked, page_number, request.page_size),
    }
}
