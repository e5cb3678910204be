//! HTML content extraction
//!
//! This module turns an HTML document into an [`HtmlPage`]:
//! - Metadata: `<title>` text and `<meta name="description">` content
//! - Headings: text of every h1..h6, per level, in document order
//! - Paragraphs: text of every `<p>`, joined and length-capped
//! - Images: `src` of every `<img>` that has one
//! - Links: every `<a href>`, resolved against the page URL
//!
//! It also finds traversal candidates for the engine, independent of whether
//! links are part of the extracted output.

use crate::config::CrawlConfig;
use crate::crawler::record::{Headings, HtmlPage, Metadata};
use crate::url::{is_crawlable, resolve_href, same_authority};
use scraper::{Html, Selector};
use url::Url;

/// Marker appended to paragraph text that was cut at the length cap
pub const ELLIPSIS: &str = "...";

/// Which links the engine may follow from a page
#[derive(Debug, Clone, Copy)]
pub struct LinkScope<'a> {
    /// The crawl's seed URL
    pub seed: &'a Url,

    /// Restrict candidates to the seed's host
    pub same_domain_only: bool,
}

impl LinkScope<'_> {
    /// Returns true if the link may be enqueued
    pub fn allows(&self, link: &Url) -> bool {
        is_crawlable(link) && (!self.same_domain_only || same_authority(link, self.seed))
    }
}

/// Extracts a page record from HTML according to the enabled features
///
/// Pure: identical HTML and URL always produce an identical record.
///
/// # Example
///
/// ```
/// use sitetrawl::config::CrawlConfig;
/// use sitetrawl::crawler::extract;
/// use url::Url;
///
/// let html = "<html><head><title>Test</title></head><body><h1>Hello</h1></body></html>";
/// let url = Url::parse("https://example.com/").unwrap();
/// let page = extract(html, &url, &CrawlConfig::default());
/// assert_eq!(page.metadata.unwrap().title, "Test");
/// assert_eq!(page.headings.unwrap().h1, vec!["Hello"]);
/// ```
pub fn extract(html: &str, source_url: &Url, config: &CrawlConfig) -> HtmlPage {
    let document = Html::parse_document(html);
    extract_document(&document, source_url, config)
}

/// Returns every followable link on the page, in document order
pub fn discover_links(html: &str, source_url: &Url, scope: LinkScope<'_>) -> Vec<Url> {
    let document = Html::parse_document(html);
    discover_in_document(&document, source_url, scope)
}

/// Parses once, extracting the record and (if a scope is given) the
/// traversal candidates
pub(crate) fn extract_with_links(
    html: &str,
    source_url: &Url,
    config: &CrawlConfig,
    scope: Option<LinkScope<'_>>,
) -> (HtmlPage, Vec<Url>) {
    let document = Html::parse_document(html);
    let page = extract_document(&document, source_url, config);
    let links = scope
        .map(|scope| discover_in_document(&document, source_url, scope))
        .unwrap_or_default();
    (page, links)
}

fn extract_document(document: &Html, source_url: &Url, config: &CrawlConfig) -> HtmlPage {
    HtmlPage {
        url: source_url.to_string(),
        metadata: config
            .include_metadata
            .then(|| extract_metadata(document)),
        headings: config
            .include_headings
            .then(|| extract_headings(document)),
        paragraphs: config
            .include_paragraphs
            .then(|| extract_paragraphs(document, config.max_content_length)),
        images: config.extract_images.then(|| extract_images(document)),
        links: config
            .extract_links
            .then(|| resolved_anchors(document, source_url).map(String::from).collect()),
    }
}

fn discover_in_document(document: &Html, source_url: &Url, scope: LinkScope<'_>) -> Vec<Url> {
    resolved_anchors(document, source_url)
        .filter(|link| scope.allows(link))
        .collect()
}

/// Every `<a href>` resolved to an absolute URL; unresolvable hrefs are dropped
fn resolved_anchors<'a>(
    document: &'a Html,
    source_url: &'a Url,
) -> impl Iterator<Item = Url> + 'a {
    let selector = Selector::parse("a[href]").ok();

    selector
        .into_iter()
        .flat_map(move |selector| {
            document
                .select(&selector)
                .filter_map(|element| element.value().attr("href"))
                .collect::<Vec<_>>()
        })
        .filter_map(move |href| match resolve_href(source_url, href) {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::trace!("Dropping link on {}: {}", source_url, e);
                None
            }
        })
}

fn extract_metadata(document: &Html) -> Metadata {
    let title = Selector::parse("title")
        .ok()
        .and_then(|selector| {
            document
                .select(&selector)
                .next()
                .map(|element| element.text().collect::<String>().trim().to_string())
        })
        .unwrap_or_default();

    let description = Selector::parse(r#"meta[name="description"]"#)
        .ok()
        .and_then(|selector| {
            document
                .select(&selector)
                .next()
                .and_then(|element| element.value().attr("content"))
                .map(str::to_string)
        })
        .unwrap_or_default();

    Metadata { title, description }
}

fn extract_headings(document: &Html) -> Headings {
    let mut headings = Headings::default();

    for level in 1..=6u8 {
        let Ok(selector) = Selector::parse(&format!("h{}", level)) else {
            continue;
        };
        if let Some(texts) = headings.level_mut(level) {
            texts.extend(
                document
                    .select(&selector)
                    .map(|element| clean_text(&element.text().collect::<String>())),
            );
        }
    }

    headings
}

fn extract_paragraphs(document: &Html, max_length: usize) -> String {
    let paragraphs: Vec<String> = match Selector::parse("p") {
        Ok(selector) => document
            .select(&selector)
            .map(|element| clean_text(&element.text().collect::<String>()))
            .collect(),
        Err(_) => Vec::new(),
    };

    truncate_text(&paragraphs.join(" "), max_length)
}

fn extract_images(document: &Html) -> Vec<String> {
    match Selector::parse("img[src]") {
        Ok(selector) => document
            .select(&selector)
            .filter_map(|element| element.value().attr("src"))
            .filter(|src| !src.is_empty())
            .map(str::to_string)
            .collect(),
        Err(_) => Vec::new(),
    }
}

/// Removes newline characters, then trims surrounding whitespace
fn clean_text(text: &str) -> String {
    text.replace('\n', "").trim().to_string()
}

/// Caps text at `max_length` characters, appending [`ELLIPSIS`] when cut
///
/// The result is at most `max_length + 3` characters long, and ends with the
/// ellipsis exactly when the input was longer than `max_length`.
pub fn truncate_text(text: &str, max_length: usize) -> String {
    match text.char_indices().nth(max_length) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_string(),
    }
}
