//! Error types for the faculty-finder application.

use faculty_search::SearchError;

/// Top-level error type for the application layer.
#[derive(Debug, thiserror::Error)]
pub enum FinderError {
    /// Crawl, extraction or ranking failure.
    #[error(transparent)]
    Search(#[from] SearchError),

    /// SQLite failure in the record store.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Configuration file could not be parsed or written.
    #[error("config error: {0}")]
    Config(String),

    /// A store mutex was poisoned by a panicking writer.
    #[error("lock poisoned: {0}")]
    Lock(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<FinderError> for SearchError {
    fn from(err: FinderError) -> Self {
        match err {
            FinderError::Search(inner) => inner,
            other => SearchError::Store(other.to_string()),
        }
    }
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, FinderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_errors_pass_through_unchanged() {
        let err = FinderError::from(SearchError::Config("page_size must be greater than 0".into()));
        assert_eq!(err.to_string(), "config error: page_size must be greater than 0");
        assert!(matches!(SearchError::from(err), SearchError::Config(_)));
    }

    #[test]
    fn sqlite_errors_become_store_errors() {
        let err = FinderError::from(rusqlite::Error::QueryReturnedNoRows);
        let search = SearchError::from(err);
        assert!(matches!(search, SearchError::Store(_)));
        assert!(search.to_string().starts_with("store error: SQLite error"));
    }
}
