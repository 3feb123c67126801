//! Profile URL canonicalisation.
//!
//! Profile URLs are the store's unique key, so links that point at the same
//! page (differing only in fragment, tracking parameters, query order,
//! default port, host case or a trailing slash) must serialise identically.

use url::Url;

/// Query parameters that never change which page is served.
const TRACKING_PARAMS: &[&str] = &[
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_term",
    "utm_content",
    "fbclid",
    "gclid",
];

/// Canonicalise a profile URL.
///
/// 1. Lowercase scheme and host (`Url::parse` does this; the path is kept as-is).
/// 2. Drop the fragment.
/// 3. Drop default ports.
/// 4. Strip tracking parameters and sort the rest, keeping their encoding.
/// 5. Trim a trailing slash unless the path is just `/`.
///
/// Input that does not parse as an absolute URL is returned trimmed but
/// otherwise unchanged.
///
/// # Examples
///
/// ```
/// use faculty_search::orchestrator::url_normalize::normalize_url;
///
/// let a = normalize_url("https://WWW.Example.EDU/~jdoe/?b=2&a=1#research");
/// let b = normalize_url("https://www.example.edu/~jdoe?a=1&b=2");
/// assert_eq!(a, b);
/// ```
pub fn normalize_url(raw: &str) -> String {
    let raw = raw.trim();
    let Ok(mut parsed) = Url::parse(raw) else {
        return raw.to_string();
    };

    parsed.set_fragment(None);

    if is_default_port(&parsed) {
        let _ = parsed.set_port(None);
    }

    // Sort raw segments so the server still receives its own encoding.
    let mut params: Vec<&str> = parsed
        .query()
        .unwrap_or_default()
        .split('&')
        .filter(|segment| !segment.is_empty())
        .filter(|segment| {
            let key = segment.split_once('=').map_or(*segment, |(key, _)| key);
            !TRACKING_PARAMS.contains(&key.to_ascii_lowercase().as_str())
        })
        .collect();
    params.sort_unstable();
    let query = params.join("&");

    parsed.set_query((!query.is_empty()).then_some(query.as_str()));

    let path = parsed.path().to_string();
    if path.len() > 1 && path.ends_with('/') {
        parsed.set_path(path.trim_end_matches('/'));
    }

    parsed.to_string()
}

fn is_default_port(url: &Url) -> bool {
    matches!(
        (url.scheme(), url.port()),
        ("http", Some(80)) | ("https", Some(443))
    )
}
