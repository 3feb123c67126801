//! Directory link discovery.
//!
//! Enumerates the hyperlinks of a department page, resolves each `href`
//! against the page URL with standard relative-reference resolution, keeps
//! the ones whose path contains a configured directory pattern, and drops
//! repeats while preserving first-seen order.

use scraper::{Html, Selector};
use url::Url;

use crate::orchestrator::dedup::dedup_urls;

/// Discover directory sub-page links on a parsed page.
///
/// Links that cannot be resolved against `base` are skipped. An absolute
/// `href` resolves to itself; fragment- and query-only references resolve
/// relative to `base` per RFC 3986, never by string concatenation.
///
/// The result is deterministic for a given document: same URLs, same order.
///
/// # Examples
///
/// ```
/// use faculty_search::discover::discover_links;
/// use scraper::Html;
/// use url::Url;
///
/// let doc = Html::parse_document(r#"<a href="../faculty/jdoe.shtml">Doe</a>"#);
/// let base = Url::parse("https://example.edu/dept/index.shtml").unwrap();
/// let links = discover_links(&doc, &base, &["/faculty/".to_owned()]);
/// assert_eq!(links[0].as_str(), "https://example.edu/faculty/jdoe.shtml");
/// ```
pub fn discover_links(document: &Html, base: &Url, patterns: &[String]) -> Vec<Url> {
    let Ok(anchor) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let patterns: Vec<&str> = patterns
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect();

    let matched = document
        .select(&anchor)
        .filter_map(|el| el.value().attr("href"))
        .filter_map(|href| match base.join(href.trim()) {
            Ok(resolved) => Some(resolved),
            Err(err) => {
                tracing::debug!(href, error = %err, "skipping unresolvable link");
                None
            }
        })
        .filter(|resolved| matches_pattern(resolved, &patterns))
        .collect();

    dedup_urls(matched)
}

/// Convenience wrapper that parses raw markup first.
pub fn discover_links_in_html(html: &str, base: &Url, patterns: &[String]) -> Vec<Url> {
    discover_links(&Html::parse_document(html), base, patterns)
}

fn matches_pattern(url: &Url, patterns: &[&str]) -> bool {
    let path = url.path();
    patterns.iter().any(|pattern| path.contains(pattern))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.edu/dept/index.shtml").expect("base url")
    }

    fn patterns() -> Vec<String> {
        vec![
            "/faculty/index.shtml".into(),
            "/faculty/lecturers.shtml".into(),
            "/faculty/emeriti.shtml".into(),
        ]
    }

    #[test]
    fn resolves_parent_relative_href() {
        let html = r#"<a href="../faculty/jdoe.shtml">Doe</a>"#;
        let links = discover_links_in_html(html, &base(), &["/faculty/".into()]);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].as_str(), "https://example.edu/faculty/jdoe.shtml");
    }

    #[test]
    fn absolute_href_left_unchanged() {
        let html = r#"<a href="https://other.edu/bio/faculty/index.shtml">Bio</a>"#;
        let links = discover_links_in_html(html, &base(), &patterns());
        assert_eq!(links[0].as_str(), "https://other.edu/bio/faculty/index.shtml");
    }

    #[test]
    fn root_relative_href_resolves_against_host() {
        let html = r#"<a href="/sci/faculty/lecturers.shtml">Lecturers</a>"#;
        let links = discover_links_in_html(html, &base(), &patterns());
        assert_eq!(
            links[0].as_str(),
            "https://example.edu/sci/faculty/lecturers.shtml"
        );
    }

    #[test]
    fn non_matching_links_dropped() {
        let html = r#"
            <a href="/news/index.shtml">News</a>
            <a href="/faculty/emeriti.shtml">Emeriti</a>
            <a href="mailto:dept@example.edu">Mail</a>
        "#;
        let links = discover_links_in_html(html, &base(), &patterns());
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].path(), "/faculty/emeriti.shtml");
    }

    #[test]
    fn duplicates_collapse_to_first_seen_order() {
        let html = r#"
            <a href="/faculty/lecturers.shtml">Lecturers</a>
            <a href="faculty/index.shtml">Faculty</a>
            <a href="https://example.edu/faculty/lecturers.shtml">Lecturers again</a>
            <a href="/dept/faculty/index.shtml">Faculty again</a>
        "#;
        let links = discover_links_in_html(html, &base(), &patterns());
        let urls: Vec<&str> = links.iter().map(Url::as_str).collect();
        assert_eq!(
            urls,
            vec![
                "https://example.edu/faculty/lecturers.shtml",
                "https://example.edu/dept/faculty/index.shtml",
            ]
        );
    }

    #[test]
    fn fragment_only_href_resolves_against_base() {
        let base = Url::parse("https://example.edu/faculty/index.shtml").expect("base");
        let html = r##"<a href="#lecturers">Jump</a>"##;
        let links = discover_links_in_html(html, &base, &patterns());
        assert_eq!(
            links[0].as_str(),
            "https://example.edu/faculty/index.shtml#lecturers"
        );
    }

    #[test]
    fn query_only_href_resolves_against_base() {
        let base = Url::parse("https://example.edu/faculty/index.shtml").expect("base");
        let html = r#"<a href="?page=2">Next</a>"#;
        let links = discover_links_in_html(html, &base, &patterns());
        assert_eq!(
            links[0].as_str(),
            "https://example.edu/faculty/index.shtml?page=2"
        );
    }

    #[test]
    fn discovery_is_idempotent() {
        let html = r#"
            <a href="/faculty/index.shtml">A</a>
            <a href="/faculty/emeriti.shtml">B</a>
            <a href="/faculty/index.shtml">A</a>
        "#;
        let doc = Html::parse_document(html);
        let first = discover_links(&doc, &base(), &patterns());
        let second = discover_links(&doc, &base(), &patterns());
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn blank_patterns_match_nothing() {
        let html = r#"<a href="/faculty/index.shtml">A</a>"#;
        let links = discover_links_in_html(html, &base(), &["".into(), "  ".into()]);
        assert!(links.is_empty());
    }

    #[test]
    fn anchors_without_href_ignored() {
        let html = r#"<a name="top">Top</a><a href="/faculty/index.shtml">A</a>"#;
        let links = discover_links_in_html(html, &base(), &patterns());
        assert_eq!(links.len(), 1);
    }
}
