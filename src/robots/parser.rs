//! Robots.txt sitemap directive parsing

/// Extracts the values of every `Sitemap:` line in a robots.txt body
///
/// A line matches when it starts with `sitemap` in any case. The value is
/// everything after the first colon, trimmed. Lines without a colon, and
/// lines whose value is empty, are ignored. Order is preserved and
/// duplicates are kept.
///
/// # Example
///
/// ```
/// use sitetrawl::robots::parse_sitemap_directives;
///
/// let body = "User-agent: *\nSitemap: https://example.com/sitemap.xml\n";
/// assert_eq!(
///     parse_sitemap_directives(body),
///     vec!["https://example.com/sitemap.xml".to_string()]
/// );
/// ```
pub fn parse_sitemap_directives(body: &str) -> Vec<String> {
    body.lines()
        .filter(|line| starts_with_ignore_case(line, "sitemap"))
        .filter_map(|line| line.split_once(':'))
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect()
}

fn starts_with_ignore_case(line: &str, prefix: &str) -> bool {
    line.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}
