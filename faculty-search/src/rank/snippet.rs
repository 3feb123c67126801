//! Snippet generation with query-term highlighting.
//!
//! The research text is truncated first and highlighted second, so a marker
//! pair can never be split by the cut. Matches of different query terms are
//! merged when they overlap, so markers never nest.

use crate::text::is_word_char;

/// Query terms used for highlighting: lowercase query split on non-word runs.
pub fn highlight_terms(query: &str) -> Vec<String> {
    let mut terms: Vec<String> = query
        .to_lowercase()
        .split(|c: char| !is_word_char(c))
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .collect();
    terms.dedup();
    terms
}

/// Take the first `max_chars` characters of `text` and wrap every
/// case-insensitive occurrence of a query term in `marker`.
pub fn highlight_snippet(text: &str, query: &str, max_chars: usize, marker: &str) -> String {
    let chars: Vec<char> = text.chars().take(max_chars).collect();
    let folded: Vec<char> = chars.iter().map(|&c| fold(c)).collect();

    let mut spans: Vec<(usize, usize)> = Vec::new();
    for term in highlight_terms(query) {
        let needle: Vec<char> = term.chars().map(fold).collect();
        if needle.len() > folded.len() {
            continue;
        }
        for start in 0..=folded.len() - needle.len() {
            if folded[start..start + needle.len()] == needle[..] {
                spans.push((start, start + needle.len()));
            }
        }
    }
    let spans = merge_spans(spans);

    let mut out = String::with_capacity(chars.len() + spans.len() * marker.len() * 2);
    let mut pos = 0;
    for (start, end) in spans {
        out.extend(&chars[pos..start]);
        out.push_str(marker);
        out.extend(&chars[start..end]);
        out.push_str(marker);
        pos = end;
    }
    out.extend(&chars[pos..]);
    out
}

/// Single-character lowercase fold; characters that lowercase to several
/// characters are compared as-is.
fn fold(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

fn merge_spans(mut spans: Vec<(usize, usize)>) -> Vec<(usize, usize)> {
    spans.sort_unstable();
    let mut merged: Vec<(usize, usize)> = Vec::with_capacity(spans.len());
    for (start, end) in spans {
        match merged.last_mut() {
            Some(last) if start < last.1 => last.1 = last.1.max(end),
            _ => merged.push((start, end)),
        }
    }
    merged
}
