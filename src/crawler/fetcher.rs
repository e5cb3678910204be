//! HTTP fetcher implementation
//!
//! This module handles all page requests for the crawler, including:
//! - Building the per-crawl HTTP client with the configured user agent
//! - Choosing, once, between plain fetching and browser rendering
//! - GET requests with a per-request timeout
//! - Error classification into [`FetchError`]

use crate::config::{ContentTypePreference, CrawlConfig};
use crate::crawler::classifier::{classify, ContentKind};
use crate::crawler::render::Renderer;
use crate::FetchError;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Timeout for an ordinary page request
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Upper bound on rendering a page in the browser, settle delay included
pub const RENDER_TIMEOUT: Duration = Duration::from_secs(20);

/// A successfully fetched page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub final_url: String,
    /// HTTP status code
    pub status_code: u16,
    /// Content-Type header value (empty if absent)
    pub content_type: String,
    /// Page body; the rendered document when rendering applied
    pub body: String,
    /// Whether `body` came from the renderer
    pub rendered: bool,
}

/// How pages are fetched for the duration of a crawl
///
/// Selected once when the engine is built; never re-evaluated per fetch.
#[derive(Clone)]
pub enum FetchStrategy {
    /// A single GET; the body is the raw response text
    Plain,
    /// A GET for status and headers, then the renderer's materialized DOM
    /// for HTML responses
    Rendering(Arc<dyn Renderer>),
}

impl FetchStrategy {
    /// Picks the strategy for a crawl
    ///
    /// Rendering requires both the toggle and an available renderer. A
    /// missing renderer silently falls back to plain fetching.
    pub fn select(enable_rendering: bool, renderer: Option<Arc<dyn Renderer>>) -> Self {
        match (enable_rendering, renderer) {
            (true, Some(renderer)) => Self::Rendering(renderer),
            (true, None) => {
                tracing::debug!("JS rendering requested but no renderer available, using plain fetch");
                Self::Plain
            }
            (false, _) => Self::Plain,
        }
    }

    pub fn is_rendering(&self) -> bool {
        matches!(self, Self::Rendering(_))
    }
}

impl fmt::Debug for FetchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain => write!(f, "Plain"),
            Self::Rendering(_) => write!(f, "Rendering"),
        }
    }
}

/// Builds the HTTP client for one crawl
///
/// # Arguments
///
/// * `user_agent` - The User-Agent header value sent with every request
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client (e.g. invalid header value)
///
/// # Example
///
/// ```no_run
/// use sitetrawl::crawler::build_http_client;
///
/// let client = build_http_client("sitetrawl/1.0").unwrap();
/// ```
pub fn build_http_client(user_agent: &str) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .connect_timeout(REQUEST_TIMEOUT)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches pages for a single crawl
///
/// Owns the crawl's HTTP client; its connection pool is released when the
/// fetcher is dropped at the end of the crawl.
#[derive(Debug)]
pub struct Fetcher {
    client: Client,
    strategy: FetchStrategy,
    preference: ContentTypePreference,
    request_timeout: Duration,
    render_timeout: Duration,
}

impl Fetcher {
    /// Creates a fetcher from the crawl configuration and an optional renderer
    pub fn new(
        config: &CrawlConfig,
        renderer: Option<Arc<dyn Renderer>>,
    ) -> Result<Self, reqwest::Error> {
        let client = build_http_client(&config.user_agent)?;
        let strategy = FetchStrategy::select(config.enable_js_rendering, renderer);
        tracing::debug!("Using {:?} fetch strategy", strategy);

        Ok(Self {
            client,
            strategy,
            preference: config.content_type_preference,
            request_timeout: REQUEST_TIMEOUT,
            render_timeout: RENDER_TIMEOUT,
        })
    }

    /// Overrides the per-request and per-render timeouts
    pub fn with_timeouts(mut self, request: Duration, render: Duration) -> Self {
        self.request_timeout = request;
        self.render_timeout = render;
        self
    }

    /// The HTTP client shared with the robots.txt lookup
    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn strategy(&self) -> &FetchStrategy {
        &self.strategy
    }

    /// Fetches a URL
    ///
    /// # Error Mapping
    ///
    /// | Condition                 | Result                   |
    /// |---------------------------|--------------------------|
    /// | Request exceeded timeout  | `FetchError::Timeout`    |
    /// | Connect/transport failure | `FetchError::Transport`  |
    /// | Non-2xx status            | `FetchError::Status`     |
    /// | Body could not be read    | `FetchError::Body`       |
    /// | Renderer failed/timed out | `FetchError::Render`     |
    ///
    /// There are no retries; every failure is final for this URL.
    pub async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        let mut page = self.get(url).await?;

        if let FetchStrategy::Rendering(renderer) = &self.strategy {
            if classify(&page.content_type, self.preference) == ContentKind::Html {
                page.body =
                    render_with_timeout(renderer.as_ref(), url, self.render_timeout).await?;
                page.rendered = true;
            }
        }

        Ok(page)
    }

    async fn get(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(|e| classify_request_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                }
            } else {
                FetchError::Body {
                    url: url.to_string(),
                    source: e,
                }
            }
        })?;

        Ok(FetchedPage {
            final_url,
            status_code: status.as_u16(),
            content_type,
            body,
            rendered: false,
        })
    }
}

async fn render_with_timeout(
    renderer: &dyn Renderer,
    url: &Url,
    limit: Duration,
) -> Result<String, FetchError> {
    match tokio::time::timeout(limit, renderer.render(url)).await {
        Ok(Ok(html)) => Ok(html),
        Ok(Err(e)) => Err(FetchError::Render {
            url: url.to_string(),
            message: e.to_string(),
        }),
        Err(_) => Err(FetchError::Render {
            url: url.to_string(),
            message: format!("timed out after {:?}", limit),
        }),
    }
}

fn classify_request_error(url: &Url, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Transport {
            url: url.to_string(),
            source: error,
        }
    }
}
