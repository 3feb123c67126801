//! Order-preserving URL deduplication.
//!
//! Discovery output keeps the order links were first seen in. Duplicate
//! faculty records are not handled here; the store's atomic
//! insert-if-absent is the only guard for those.

use std::collections::HashSet;

use url::Url;

/// Drop exact duplicate URLs, keeping the first occurrence of each.
pub fn dedup_urls(urls: Vec<Url>) -> Vec<Url> {
    let mut seen: HashSet<String> = HashSet::with_capacity(urls.len());
    urls.into_iter()
        .filter(|url| seen.insert(url.as_str().to_owned()))
        .collect()
}
