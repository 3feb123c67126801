//! Core types for faculty records, queries and ranked results.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default number of results per page.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Store-assigned identifier of a [`FacultyRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordId(pub i64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A faculty member found on a directory page, before it is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacultyEntry {
    /// Display name from the directory card.
    pub name: String,
    /// Title or role label. May be empty.
    pub title: String,
    /// Canonical absolute URL of the personal profile page.
    pub profile_url: String,
}

/// One stored faculty member, keyed uniquely by `profile_url`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacultyRecord {
    /// Store-assigned identifier.
    pub id: RecordId,
    /// Display name.
    pub name: String,
    /// Title or role label. May be empty.
    pub title: String,
    /// Canonical absolute URL; unique across the store.
    pub profile_url: String,
    /// Extracted research prose. `None` until the profile has been processed;
    /// `Some("")` when the page published no research statement.
    pub research_text: Option<String>,
}

impl FacultyRecord {
    /// Returns the research text if it is present and non-blank.
    ///
    /// Records without one never enter the ranking corpus.
    pub fn research(&self) -> Option<&str> {
        self.research_text
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }
}

/// A free-text query with pagination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    /// The raw query string.
    pub query: String,
    /// 1-based page number.
    pub page_number: usize,
    /// Results per page.
    pub page_size: usize,
}

impl QueryRequest {
    /// Build a request for the first page with the default page size.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page_number: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Select a page (values below 1 are treated as 1).
    pub fn page(mut self, page_number: usize) -> Self {
        self.page_number = page_number.max(1);
        self
    }
}

/// A single ranked faculty member for a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    /// Record the result was computed from.
    pub id: RecordId,
    /// Display name.
    pub name: String,
    /// Profile URL.
    pub profile_url: String,
    /// Cosine similarity between query and research text, clamped to `[0, 1]`.
    pub relevance_score: f64,
    /// Leading excerpt of the research text with query terms marked.
    pub snippet: String,
}

/// One page of ranked results plus the totals a caller needs for messaging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPage {
    /// Number of documents in the ranking corpus.
    pub corpus_size: usize,
    /// Number of ranked results before pagination.
    pub total_results: usize,
    /// Ranked results with a positive score, across all pages.
    pub matched_results: usize,
    /// The 1-based page that was selected.
    pub page_number: usize,
    /// Results on this page.
    pub results: Vec<RankedResult>,
}

impl SearchPage {
    /// True when nothing has been indexed yet.
    pub fn is_empty_corpus(&self) -> bool {
        self.corpus_size == 0
    }

    /// True when any ranked result, on any page, has a positive score.
    pub fn has_matches(&self) -> bool {
        self.matched_results > 0
    }
}
