//! Sitetrawl: a breadth-first site crawler and content extractor
//!
//! This crate crawls a website starting from a seed URL, following links
//! breadth-first within domain and depth limits, and extracts structured
//! content (metadata, headings, paragraphs, images, links) from HTML pages.
//! JSON responses are passed through as-is.

pub mod config;
pub mod crawler;
pub mod output;
pub mod robots;
pub mod state;
pub mod url;

use thiserror::Error;

/// Setup errors returned to the caller of a crawl
///
/// Nothing that happens inside the crawl loop surfaces here; per-page
/// failures, including an unusable seed, are logged and skipped.
#[derive(Debug, Error)]
pub enum CrawlerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL: {0}")]
    MissingHost(String),

    #[error("Malformed link '{href}': {reason}")]
    Malformed { href: String, reason: String },
}

/// A single fetch that did not produce a usable response
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP error for {url}: {source}")]
    Transport { url: String, source: reqwest::Error },

    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Failed to read body of {url}: {source}")]
    Body { url: String, source: reqwest::Error },

    #[error("Render failed for {url}: {message}")]
    Render { url: String, message: String },
}

impl FetchError {
    /// The URL the failed fetch was aimed at
    pub fn url(&self) -> &str {
        match self {
            Self::Timeout { url }
            | Self::Transport { url, .. }
            | Self::Status { url, .. }
            | Self::Body { url, .. }
            | Self::Render { url, .. } => url,
        }
    }
}

/// Per-page failures; the engine logs these and moves on to the next URL
#[derive(Debug, Error)]
pub enum PageError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Invalid JSON at {url}: {source}")]
    JsonParse {
        url: String,
        source: serde_json::Error,
    },
}

/// Result type alias for crawl setup operations
pub type Result<T> = std::result::Result<T, CrawlerError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::{ContentTypePreference, CrawlConfig, OutputFormat};
pub use crawler::{crawl, CrawlEngine, PageRecord};
pub use output::{project, structured_view, table_view, Output, TableRow};
