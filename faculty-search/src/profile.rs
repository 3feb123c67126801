//! Research-text extraction from faculty profile pages.
//!
//! Profile pages are loosely structured. The research statement usually sits
//! in a designated summary container; when a page has none, every paragraph
//! on the page is aggregated instead. A page with neither yields an empty
//! string, which is a valid "nothing published" outcome rather than an error.

use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

/// Elements whose text makes up a research summary block.
const TEXTUAL_ELEMENTS: &[&str] = &["p", "div", "li", "blockquote", "h2", "h3", "h4"];

/// Elements whose text is never prose.
const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "noscript"];

/// Which heuristic produced the research text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtractionSource {
    /// The designated research summary container.
    SummaryBlock,
    /// Paragraph aggregation over the whole page.
    Paragraphs,
    /// Neither heuristic found any text.
    Missing,
}

/// Outcome of research-text extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchExtract {
    /// Whitespace-collapsed research prose; empty when `source` is `Missing`.
    pub text: String,
    /// Heuristic that produced `text`.
    pub source: ExtractionSource,
}

impl ResearchExtract {
    fn missing() -> Self {
        Self {
            text: String::new(),
            source: ExtractionSource::Missing,
        }
    }

    /// True when the page published no research text.
    pub fn is_missing(&self) -> bool {
        self.source == ExtractionSource::Missing
    }
}

/// Extract research text using the summary container, then the paragraph fallback.
pub fn extract_research(document: &Html, research_block: &Selector) -> ResearchExtract {
    if let Some(block) = document.select(research_block).next() {
        let text = block_text(block);
        if !text.is_empty() {
            return ResearchExtract {
                text,
                source: ExtractionSource::SummaryBlock,
            };
        }
    }

    let text = paragraph_text(document);
    if text.is_empty() {
        ResearchExtract::missing()
    } else {
        ResearchExtract {
            text,
            source: ExtractionSource::Paragraphs,
        }
    }
}

/// Parse raw markup and extract its research text.
pub fn extract_research_html(html: &str, research_block: &Selector) -> ResearchExtract {
    extract_research(&Html::parse_document(html), research_block)
}

/// Research text only; empty string when nothing was found.
pub fn extract_research_text(document: &Html, research_block: &Selector) -> String {
    extract_research(document, research_block).text
}

/// Text of `block`, split at textual element boundaries.
///
/// Every text node belongs to exactly one segment, so nested containers
/// neither repeat nor drop their children's text.
fn block_text(block: ElementRef<'_>) -> String {
    let mut segments = Vec::new();
    let mut current = String::new();
    collect_segments(block, &mut current, &mut segments);
    flush_segment(&mut current, &mut segments);
    segments.join(" ")
}

fn collect_segments(element: ElementRef<'_>, current: &mut String, segments: &mut Vec<String>) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => current.push_str(text),
            Node::Element(el) => {
                let Some(child_el) = ElementRef::wrap(child) else {
                    continue;
                };
                let name = el.name();
                if SKIPPED_ELEMENTS.contains(&name) {
                    continue;
                }
                if TEXTUAL_ELEMENTS.contains(&name) {
                    flush_segment(current, segments);
                    collect_segments(child_el, current, segments);
                    flush_segment(current, segments);
                } else {
                    collect_segments(child_el, current, segments);
                }
            }
            _ => {}
        }
    }
}

fn flush_segment(current: &mut String, segments: &mut Vec<String>) {
    let text = collapse_whitespace(current);
    if !text.is_empty() {
        segments.push(text);
    }
    current.clear();
}

fn paragraph_text(document: &Html) -> String {
    let Ok(paragraph) = Selector::parse("p") else {
        return String::new();
    };
    document
        .select(&paragraph)
        .map(element_text)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn element_text(element: ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<Vec<_>>().join(" "))
}

/// Trim and collapse every whitespace run to a single space.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intro() -> Selector {
        Selector::parse("div.section-intro").expect("selector")
    }

    #[test]
    fn summary_block_preferred() {
        let html = r#"<html><body>
            <p>Office hours: Monday</p>
            <div class="section-intro">
                <p>My lab studies   membrane
                   transport.</p>
                <p>We use cryo-EM.</p>
            </div>
        </body></html>"#;
        let extract = extract_research_html(html, &intro());
        assert_eq!(extract.source, ExtractionSource::SummaryBlock);
        assert_eq!(extract.text, "My lab studies membrane transport. We use cryo-EM.");
    }

    #[test]
    fn nested_containers_not_duplicated() {
        let html = r#"<div class="section-intro">
            <div><p>Plant ecology.</p><p>Fire regimes.</p></div>
            <div>Soil microbes.</div>
        </div>"#;
        let extract = extract_research_html(html, &intro());
        assert_eq!(extract.text, "Plant ecology. Fire regimes. Soil microbes.");
    }

    #[test]
    fn mixed_content_container_keeps_its_own_text() {
        let html = r#"<div class="section-intro"><div>My lab studies coral reef ecology. <p>We also teach.</p> Field work in Belize.</div></div>"#;
        let extract = extract_research_html(html, &intro());
        assert_eq!(extract.source, ExtractionSource::SummaryBlock);
        assert_eq!(
            extract.text,
            "My lab studies coral reef ecology. We also teach. Field work in Belize."
        );
    }

    #[test]
    fn inline_markup_does_not_split_words() {
        let html = r#"<div class="section-intro"><p>Bio<em>chemistry</em> of <a href="/x">lipids</a>.</p><script>var x = 1;</script></div>"#;
        let extract = extract_research_html(html, &intro());
        assert_eq!(extract.text, "Biochemistry of lipids.");
    }

    #[test]
    fn bare_text_in_block_used() {
        let html = r#"<div class="section-intro">  Evolutionary <em>genomics</em> of fishes </div>"#;
        let extract = extract_research_html(html, &intro());
        assert_eq!(extract.text, "Evolutionary genomics of fishes");
        assert_eq!(extract.source, ExtractionSource::SummaryBlock);
    }

    #[test]
    fn falls_back_to_paragraphs() {
        let html = r#"<html><body>
            <h1>Dr. Jane Doe</h1>
            <p>Research in   neurobiology.</p>
            <div>Sidebar</div>
            <p>Teaching anatomy.</p>
        </body></html>"#;
        let extract = extract_research_html(html, &intro());
        assert_eq!(extract.source, ExtractionSource::Paragraphs);
        assert_eq!(extract.text, "Research in neurobiology. Teaching anatomy.");
    }

    #[test]
    fn empty_summary_block_falls_back() {
        let html = r#"<div class="section-intro">   </div><p>Marine biology.</p>"#;
        let extract = extract_research_html(html, &intro());
        assert_eq!(extract.source, ExtractionSource::Paragraphs);
        assert_eq!(extract.text, "Marine biology.");
    }

    #[test]
    fn nothing_found_is_missing_not_error() {
        let extract = extract_research_html("<html><body><div>Contact</div></body></html>", &intro());
        assert!(extract.is_missing());
        assert_eq!(extract.text, "");
    }

    #[test]
    fn extraction_is_total_on_garbage() {
        for input in ["", "<<<>>>", "<p", "plain text", "<div class=\"section-intro\"><p></div>"] {
            let doc = Html::parse_document(input);
            let _ = extract_research_text(&doc, &intro());
        }
    }

    #[test]
    fn collapse_whitespace_trims() {
        assert_eq!(collapse_whitespace("  a \n\t b  "), "a b");
        assert_eq!(collapse_whitespace("   "), "");
    }

    const FIXTURE_PROFILE: &str = include_str!("../test-data/profile_section_intro.html");

    #[test]
    fn fixture_profile_extracts_summary_only() {
        let extract = extract_research_html(FIXTURE_PROFILE, &intro());
        assert_eq!(extract.source, ExtractionSource::SummaryBlock);
        assert!(extract.text.contains("host-pathogen interactions"));
        assert!(extract.text.contains("antibiotic resistance"));
        assert!(!extract.text.contains("Office"));
        assert!(!extract.text.contains("  "));
    }
}
