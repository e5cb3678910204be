use serde::Deserialize;

/// Default cap on the paragraph text extracted per page (characters)
pub const DEFAULT_MAX_CONTENT_LENGTH: usize = 10_000;

/// Which parser a fetched body should go through
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentTypePreference {
    /// Decide from the response's Content-Type header
    #[default]
    Auto,
    /// Always parse as JSON
    Json,
    /// Always parse as HTML
    Html,
}

/// Shape of the projected crawl output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// The page records as-is
    #[default]
    Structured,
    /// One text blob of titles, descriptions, headings and paragraphs
    FlatText,
    /// One flat row per page
    Table,
}

/// Crawl configuration
///
/// A read-only snapshot handed to the engine; it is never mutated during a crawl.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CrawlConfig {
    /// User-Agent header sent with every request
    pub user_agent: String,

    /// Maximum number of characters kept from the paragraph text
    pub max_content_length: usize,

    /// JSON/HTML classification policy
    pub content_type_preference: ContentTypePreference,

    /// Extract title and meta description
    pub include_metadata: bool,

    /// Extract h1..h6 headings
    pub include_headings: bool,

    /// Extract paragraph text
    pub include_paragraphs: bool,

    /// Extract image sources
    pub extract_images: bool,

    /// Extract resolved anchor targets
    pub extract_links: bool,

    /// Output projection
    pub output_format: OutputFormat,

    /// Maximum number of link hops from the seed (0 = seed page only)
    pub max_depth: u32,

    /// Only follow links whose host matches the seed's host
    pub same_domain_only: bool,

    /// Render pages in a headless browser when a renderer is available
    pub enable_js_rendering: bool,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("sitetrawl/", env!("CARGO_PKG_VERSION")).to_string(),
            max_content_length: DEFAULT_MAX_CONTENT_LENGTH,
            content_type_preference: ContentTypePreference::Auto,
            include_metadata: true,
            include_headings: true,
            include_paragraphs: true,
            extract_images: false,
            extract_links: false,
            output_format: OutputFormat::Structured,
            max_depth: 0,
            same_domain_only: true,
            enable_js_rendering: false,
        }
    }
}
