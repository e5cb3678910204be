use crate::UrlError;
use url::Url;

/// Parses a seed URL, accepting only http(s) URLs with a host
///
/// # Examples
///
/// ```
/// use sitetrawl::url::parse_seed;
///
/// let seed = parse_seed("https://example.com").unwrap();
/// assert_eq!(seed.as_str(), "https://example.com/");
/// assert!(parse_seed("ftp://example.com/").is_err());
/// ```
pub fn parse_seed(seed: &str) -> Result<Url, UrlError> {
    let url = Url::parse(seed.trim()).map_err(|e| UrlError::Parse(format!("{}: {}", seed, e)))?;

    if !is_crawlable(&url) {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost(seed.to_string()));
    }

    Ok(url)
}

/// Resolves an href against the page it was found on
///
/// Relative references are joined with the base; absolute ones are kept.
/// Non-http schemes (`mailto:`, `javascript:`) resolve fine and are returned
/// as-is: whether they can be crawled is a separate question, see
/// [`is_crawlable`].
pub fn resolve_href(base: &Url, href: &str) -> Result<Url, UrlError> {
    base.join(href.trim()).map_err(|e| UrlError::Malformed {
        href: href.to_string(),
        reason: e.to_string(),
    })
}

/// Returns true if the URL can be fetched over HTTP
pub fn is_crawlable(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}
