//! Robots.txt handling module
//!
//! The crawler reads robots.txt for one thing only: `Sitemap:` directives,
//! whose URLs become extra depth-0 seeds. Resolution is best-effort; every
//! failure yields an empty list.

mod parser;

pub use parser::parse_sitemap_directives;

use crate::url::site_root;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Timeout for the robots.txt request
pub const ROBOTS_TIMEOUT: Duration = Duration::from_secs(5);

/// Reasons a robots.txt lookup produced nothing
#[derive(Debug, Error)]
pub enum RobotsError {
    #[error("URL has no host: {0}")]
    NoHost(String),

    #[error("Failed to build robots.txt URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Fetches `<site root>/robots.txt` for the seed and returns its sitemap URLs
///
/// Never fails: request errors, non-2xx responses and unreadable bodies are
/// logged at debug level and produce an empty list.
///
/// # Arguments
///
/// * `client` - The HTTP client (already carrying the crawl's user agent)
/// * `seed` - The crawl's seed URL
pub async fn resolve_sitemaps(client: &Client, seed: &Url) -> Vec<String> {
    match fetch_sitemaps(client, seed).await {
        Ok(sitemaps) => {
            tracing::debug!("Found {} sitemap(s) in robots.txt", sitemaps.len());
            sitemaps
        }
        Err(e) => {
            tracing::debug!("No robots.txt or error parsing it for {}: {}", seed, e);
            Vec::new()
        }
    }
}

/// Returns the robots.txt URL for the site the given URL belongs to
pub fn robots_url(url: &Url) -> Result<Url, RobotsError> {
    let root = site_root(url).ok_or_else(|| RobotsError::NoHost(url.to_string()))?;
    Ok(root.join("/robots.txt")?)
}

async fn fetch_sitemaps(client: &Client, seed: &Url) -> Result<Vec<String>, RobotsError> {
    let robots = robots_url(seed)?;
    tracing::debug!("Fetching {}", robots);

    let body = client
        .get(robots)
        .timeout(ROBOTS_TIMEOUT)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    Ok(parse_sitemap_directives(&body))
}
