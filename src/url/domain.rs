use url::Url;

/// Returns the authority a URL is scoped by: lowercase host plus explicit port
///
/// The scheme is not part of the authority, so `http://example.com/` and
/// `https://example.com/` share one. A port equal to the scheme's default is
/// dropped by URL parsing and never counts.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sitetrawl::url::authority;
///
/// let url = Url::parse("https://Example.COM/path").unwrap();
/// assert_eq!(authority(&url), Some(("example.com".to_string(), None)));
/// ```
pub fn authority(url: &Url) -> Option<(String, Option<u16>)> {
    url.host_str().map(|h| (h.to_lowercase(), url.port()))
}

/// Returns true if both URLs have a host and their authorities are equal
pub fn same_authority(a: &Url, b: &Url) -> bool {
    match (authority(a), authority(b)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Derives `scheme://host[:port]` for a URL
///
/// Returns None for URLs without a host (e.g. `mailto:`).
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sitetrawl::url::site_root;
///
/// let url = Url::parse("https://example.com:8443/a/b?c=d").unwrap();
/// assert_eq!(site_root(&url).unwrap().as_str(), "https://example.com:8443/");
/// ```
pub fn site_root(url: &Url) -> Option<Url> {
    url.host_str()?;

    let mut root = url.clone();
    root.set_path("/");
    root.set_query(None);
    root.set_fragment(None);
    // Credentials are not part of the site
    let _ = root.set_username("");
    let _ = root.set_password(None);
    Some(root)
}
