//! HTML parser for extracting the parts of a page the crawl needs
//!
//! This module handles parsing HTML content to extract:
//! - Page title
//! - Visible body text (script and style contents excluded)
//! - Outgoing hyperlinks, resolved against the page URL

use crate::crawler::Page;
use crate::url::resolve_link;
use scraper::{ElementRef, Html, Node, Selector};
use url::Url;

/// Elements whose text never counts as visible body text
const NON_TEXT_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Parses HTML content into a [`Page`]
///
/// # Link Extraction Rules
///
/// Every `<a href="...">` is resolved against `base_url` and kept as an
/// absolute URL, fragment included. Hrefs that cannot be resolved at all are
/// dropped. Scheme filtering and fragment stripping are left to address
/// normalization so that every link goes through the same rules.
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `base_url` - The URL the page was served from
///
/// # Example
///
/// ```
/// use lexcrawl::crawler::parse_html;
/// use url::Url;
///
/// let html = r#"<html><head><title>Test</title></head><body><p>Hi</p><a href="/page">Link</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let page = parse_html(html, &base_url);
/// assert_eq!(page.title.as_deref(), Some("Test"));
/// assert_eq!(page.links, vec!["https://example.com/page".to_string()]);
/// ```
pub fn parse_html(html: &str, base_url: &Url) -> Page {
    let document = Html::parse_document(html);

    Page {
        title: extract_title(&document),
        body_text: extract_body_text(&document),
        links: extract_links(&document, base_url),
    }
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Collects the visible text under `<body>` as single-space separated words
fn extract_body_text(document: &Html) -> String {
    let Ok(body_selector) = Selector::parse("body") else {
        return String::new();
    };

    let mut words = Vec::new();
    for body in document.select(&body_selector) {
        collect_text(body, &mut words);
    }
    words.join(" ")
}

fn collect_text<'a>(element: ElementRef<'a>, words: &mut Vec<&'a str>) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => words.extend(text.split_whitespace()),
            Node::Element(el) if !NON_TEXT_ELEMENTS.contains(&el.name()) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    collect_text(child_element, words);
                }
            }
            _ => {}
        }
    }
}

/// Extracts all resolvable hyperlink targets from the HTML document
fn extract_links(document: &Html, base_url: &Url) -> Vec<String> {
    let Ok(a_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&a_selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(href, base_url))
        .map(|url| url.to_string())
        .collect()
}
