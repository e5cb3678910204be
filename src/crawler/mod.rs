//! Crawler module for page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching, optionally through a browser renderer
//! - JSON/HTML classification of responses
//! - HTML content extraction and link discovery
//! - The breadth-first frontier
//! - Overall crawl orchestration

mod classifier;
mod engine;
mod extractor;
mod fetcher;
mod frontier;
mod record;
mod render;

pub use classifier::{classify, ContentKind};
pub use engine::CrawlEngine;
pub use extractor::{discover_links, extract, truncate_text, LinkScope, ELLIPSIS};
pub use fetcher::{
    build_http_client, FetchStrategy, FetchedPage, Fetcher, RENDER_TIMEOUT, REQUEST_TIMEOUT,
};
pub use frontier::{Frontier, FrontierEntry};
pub use record::{Headings, HtmlPage, JsonPage, Metadata, PageRecord};
#[cfg(feature = "render")]
pub use render::ChromiumRenderer;
pub use render::{RenderError, Renderer};

use crate::config::CrawlConfig;
use crate::CrawlerError;

/// Runs a complete crawl
///
/// This is the main entry point for a crawl. It will:
/// 1. Validate the configuration and build the HTTP client
/// 2. Launch a renderer if JS rendering is enabled and available
/// 3. Seed the frontier with the seed URL and any robots.txt sitemaps
/// 4. Fetch, classify and extract pages breadth-first
/// 5. Return the page records in crawl order
///
/// # Example
///
/// ```no_run
/// use sitetrawl::config::CrawlConfig;
/// use sitetrawl::crawler::crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pages = crawl("https://example.com/", CrawlConfig::default()).await?;
/// println!("Crawled {} pages", pages.len());
/// # Ok(())
/// # }
/// ```
pub async fn crawl(seed: &str, config: CrawlConfig) -> Result<Vec<PageRecord>, CrawlerError> {
    Ok(CrawlEngine::launch(config).await?.run(seed).await)
}
