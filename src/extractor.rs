//! Article content extraction.
//!
//! Given a parsed HTML document, finds the container most likely to hold the
//! main article text and renders it as plain text with an estimated reading
//! time. Works purely on the document tree, so it can be exercised against
//! synthetic pages without any network access.

use reqwest::Client;
use ego_tree::{NodeId, NodeRef};
use scraper::{ElementRef, Html, Node, Selector};
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

/// User-Agent string identifying this tool
pub const USER_AGENT: &str = concat!("summora/", env!("CARGO_PKG_VERSION"));

/// Default timeout for HTTP requests
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Ordered list of selectors for common article containers. The first
/// selector yielding a container above [`MIN_CONTAINER_LEN`] wins.
const CONTAINER_SELECTORS: [&str; 13] = [
    "article",
    "[role=\"article\"]",
    ".article",
    ".post-content",
    ".entry-content",
    ".content",
    "main",
    "#main",
    ".main",
    ".post",
    ".story",
    "#content",
    ".blog-post",
];

/// Minimum trimmed text length for a selector match to count as the article
const MIN_CONTAINER_LEN: usize = 1000;

/// Minimum length for a paragraph in the last-resort fallback
const MIN_PARAGRAPH_LEN: usize = 50;

/// Minimum length for a text node to count towards the heuristic scoring
const MIN_TEXT_NODE_LEN: usize = 20;

/// Reading speed used for the reading-time estimate
const WORDS_PER_MINUTE: u32 = 200;

/// Tags whose subtrees never contain article text
const NON_CONTENT_TAGS: [&str; 8] = [
    "script", "style", "nav", "header", "footer", "aside", "iframe", "form",
];

/// Class names marking chrome around the article (ads, social widgets, ...)
const NON_CONTENT_CLASSES: [&str; 12] = [
    "sidebar",
    "comments",
    "related",
    "recommended",
    "advertisement",
    "ad",
    "social",
    "share",
    "newsletter",
    "popup",
    "modal",
    "cookie",
];

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("failed to fetch URL: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("no readable content found on this page")]
    NoContent,
}

/// Plain-text rendition of a page's main article
#[derive(Debug, Clone)]
pub struct ExtractedContent {
    /// Page title
    pub title: String,
    /// Main text content, paragraphs joined by blank lines
    pub content: String,
    /// Estimated reading time in whole minutes, at least 1
    pub reading_time: u32,
    /// The original URL
    pub url: String,
}

/// Create a configured HTTP client for fetching pages
pub fn create_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()
}

/// Fetch a page and parse it into a document tree
pub async fn fetch_document(client: &Client, url: &str) -> Result<Html, ExtractError> {
    let response = client.get(url).send().await?;
    let html = response.text().await?;
    Ok(Html::parse_document(&html))
}

/// Extract the main article content from a parsed document.
///
/// Tries, in order: the fixed container-selector list, a text-density
/// heuristic over the whole tree, and finally plain paragraph collection.
/// A page with no usable text yields [`ExtractError::NoContent`].
pub fn extract(document: &Html, url: &str) -> Result<ExtractedContent, ExtractError> {
    let content = match find_container(document) {
        Some(container) => clean_content(container),
        None => paragraph_fallback(document),
    };

    if content.is_empty() {
        return Err(ExtractError::NoContent);
    }

    let title = extract_title(document).unwrap_or_else(|| url.to_string());
    let reading_time = reading_time(&content);

    Ok(ExtractedContent {
        title,
        content,
        reading_time,
        url: url.to_string(),
    })
}

/// Extract the page title from `<title>` or the first `<h1>`
fn extract_title(document: &Html) -> Option<String> {
    for selector_str in ["title", "h1"] {
        let selector = Selector::parse(selector_str).unwrap();
        if let Some(element) = document.select(&selector).next() {
            let title: String = element.text().collect();
            let title = title.trim();
            if !title.is_empty() {
                return Some(title.to_string());
            }
        }
    }
    None
}

/// Find the best article container via selectors, then via text density
fn find_container(document: &Html) -> Option<ElementRef<'_>> {
    selector_pass(document).or_else(|| densest_container(document))
}

/// Try each known container selector in order. Among all elements matching a
/// selector, the one with the most text wins, but only counts if it clears
/// the minimum-length bar.
fn selector_pass(document: &Html) -> Option<ElementRef<'_>> {
    for selector_str in CONTAINER_SELECTORS {
        let selector = Selector::parse(selector_str).unwrap();

        let best = document
            .select(&selector)
            .map(|element| {
                let text: String = element.text().collect();
                (element, text.trim().len())
            })
            .max_by_key(|(_, len)| *len);

        if let Some((element, len)) = best {
            if len > MIN_CONTAINER_LEN {
                return Some(element);
            }
        }
    }
    None
}

/// Score block-level containers by the total length of substantial text
/// nodes beneath them and return the densest one.
fn densest_container(document: &Html) -> Option<ElementRef<'_>> {
    let mut scores: HashMap<NodeId, usize> = HashMap::new();

    for node in document.tree.nodes() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let trimmed = text.text.trim();
        if trimmed.len() <= MIN_TEXT_NODE_LEN {
            continue;
        }

        // Credit the nearest block-level ancestor
        for ancestor in node.ancestors() {
            if let Some(element) = ElementRef::wrap(ancestor) {
                if matches!(
                    element.value().name(),
                    "div" | "article" | "section" | "main"
                ) {
                    *scores.entry(ancestor.id()).or_insert(0) += trimmed.len();
                    break;
                }
            }
        }
    }

    let (best_id, _) = scores.into_iter().max_by_key(|(_, score)| *score)?;
    ElementRef::wrap(document.tree.get(best_id)?)
}

/// Serialize a container as plain text: headings, paragraphs and list items
/// in document order, joined by blank lines, with non-content subtrees
/// (navigation, ads, widgets, forms) skipped.
fn clean_content(container: ElementRef<'_>) -> String {
    let mut blocks = Vec::new();
    collect_blocks(*container, &mut blocks);
    blocks.join("\n\n")
}

fn collect_blocks(node: NodeRef<'_, Node>, blocks: &mut Vec<String>) {
    for child in node.children() {
        let Some(element) = ElementRef::wrap(child) else {
            continue;
        };
        if is_non_content(&element) {
            continue;
        }

        match element.value().name() {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "p" => {
                let text = normalize_whitespace(&element.text().collect::<String>());
                if !text.is_empty() {
                    blocks.push(text);
                }
            }
            "li" => {
                let text = normalize_whitespace(&element.text().collect::<String>());
                if !text.is_empty() {
                    blocks.push(format!("- {}", text));
                }
            }
            _ => collect_blocks(child, blocks),
        }
    }
}

/// Whether an element is page chrome rather than article content
fn is_non_content(element: &ElementRef<'_>) -> bool {
    if NON_CONTENT_TAGS.contains(&element.value().name()) {
        return true;
    }
    element
        .value()
        .classes()
        .any(|class| NON_CONTENT_CLASSES.contains(&class))
}

/// Last resort: every substantial paragraph on the page
fn paragraph_fallback(document: &Html) -> String {
    let selector = Selector::parse("p").unwrap();

    let paragraphs: Vec<String> = document
        .select(&selector)
        .map(|p| normalize_whitespace(&p.text().collect::<String>()))
        .filter(|text| text.len() > MIN_PARAGRAPH_LEN)
        .collect();

    paragraphs.join("\n\n")
}

/// Collapse whitespace runs to single spaces and trim
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Estimated reading time in minutes at 200 words per minute, at least 1
pub fn reading_time(text: &str) -> u32 {
    let words = text.split_whitespace().count() as u32;
    words.div_ceil(WORDS_PER_MINUTE).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(body: &str) -> Html {
        Html::parse_document(&format!(
            "<html><head><title>Test Page</title></head><body>{}</body></html>",
            body
        ))
    }

    fn long_text(words: usize) -> String {
        vec!["lorem"; words].join(" ")
    }

    #[test]
    fn selector_pass_picks_longest_matching_element() {
        let short = vec!["ipsum"; 50].join(" ");
        let long = long_text(400);
        let document = page(&format!(
            "<article><p>{}</p></article><article><p>{}</p></article>",
            short, long
        ));

        let extracted = extract(&document, "https://example.com").unwrap();
        assert!(extracted.content.contains(&long));
        assert!(!extracted.content.contains("ipsum"));
    }

    #[test]
    fn selector_pass_rejects_containers_below_threshold() {
        // An <article> with little text must not shadow the dense <div>
        let dense = long_text(300);
        let document = page(&format!(
            "<article><p>too short</p></article><div><p>{}</p></div>",
            dense
        ));

        let extracted = extract(&document, "https://example.com").unwrap();
        assert!(extracted.content.contains(&dense));
    }

    #[test]
    fn density_heuristic_picks_the_densest_block() {
        let dense = long_text(300);
        let document = page(&format!(
            "<div><p>a sidebar paragraph with a bit of text</p></div>\
             <div><p>{}</p></div>",
            dense
        ));

        let extracted = extract(&document, "https://example.com").unwrap();
        assert!(extracted.content.starts_with(&dense[..20]));
    }

    #[test]
    fn paragraph_fallback_collects_substantial_paragraphs() {
        // No block containers at all, so only the paragraph pass applies
        let document = Html::parse_document(
            "<html><body>\
             <p>short</p>\
             <p>This paragraph is comfortably longer than fifty characters in total.</p>\
             <p>And this second paragraph also exceeds the fifty character minimum.</p>\
             </body></html>",
        );

        let extracted = extract(&document, "https://example.com").unwrap();
        let blocks: Vec<&str> = extracted.content.split("\n\n").collect();
        assert_eq!(blocks.len(), 2);
        assert!(!extracted.content.contains("short"));
    }

    #[test]
    fn empty_page_yields_no_content_error() {
        let document = Html::parse_document("<html><body><span>hi</span></body></html>");
        let result = extract(&document, "https://example.com");
        assert!(matches!(result, Err(ExtractError::NoContent)));
    }

    #[test]
    fn cleaning_skips_non_content_subtrees() {
        let body_text = long_text(300);
        let document = page(&format!(
            "<article>\
             <nav><p>site navigation links</p></nav>\
             <p>{}</p>\
             <div class=\"ad\"><p>buy things now</p></div>\
             <script>var x = 1;</script>\
             </article>",
            body_text
        ));

        let extracted = extract(&document, "https://example.com").unwrap();
        assert!(!extracted.content.contains("navigation"));
        assert!(!extracted.content.contains("buy things"));
        assert!(!extracted.content.contains("var x"));
        assert!(extracted.content.contains(&body_text));
    }

    #[test]
    fn list_items_render_as_dashed_lines() {
        let filler = long_text(300);
        let document = page(&format!(
            "<article><p>{}</p><ul><li>first point</li><li>second point</li></ul></article>",
            filler
        ));

        let extracted = extract(&document, "https://example.com").unwrap();
        assert!(extracted.content.contains("- first point"));
        assert!(extracted.content.contains("- second point"));
    }

    #[test]
    fn headings_and_paragraphs_keep_document_order() {
        let filler = long_text(300);
        let document = page(&format!(
            "<article><h2>Background</h2><p>{}</p><h2>Conclusion</h2><p>{}</p></article>",
            filler, filler
        ));

        let extracted = extract(&document, "https://example.com").unwrap();
        let background = extracted.content.find("Background").unwrap();
        let conclusion = extracted.content.find("Conclusion").unwrap();
        assert!(background < conclusion);
    }

    #[test]
    fn title_comes_from_title_tag_then_h1() {
        let filler = long_text(300);
        let document = page(&format!("<article><p>{}</p></article>", filler));
        let extracted = extract(&document, "https://example.com").unwrap();
        assert_eq!(extracted.title, "Test Page");

        let document = Html::parse_document(&format!(
            "<html><body><article><h1>Headline</h1><p>{}</p></article></body></html>",
            filler
        ));
        let extracted = extract(&document, "https://example.com").unwrap();
        assert_eq!(extracted.title, "Headline");
    }

    #[test]
    fn reading_time_scales_at_200_wpm() {
        assert_eq!(reading_time(&long_text(1)), 1);
        assert_eq!(reading_time(&long_text(200)), 1);
        assert_eq!(reading_time(&long_text(201)), 2);
        assert_eq!(reading_time(&long_text(400)), 2);
        assert_eq!(reading_time(&long_text(1000)), 5);
    }

    #[test]
    fn reading_time_is_recorded_on_extraction() {
        let document = page(&format!("<article><p>{}</p></article>", long_text(400)));
        let extracted = extract(&document, "https://example.com").unwrap();
        assert_eq!(extracted.reading_time, 2);
    }
}
