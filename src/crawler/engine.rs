//! Crawl engine - breadth-first crawl orchestration
//!
//! The engine runs a small state machine over a [`CrawlState`]:
//!
//! ```text
//! Idle -> Dequeuing -> Fetching -> Classifying -> Extracting -> EnqueuingLinks
//!            ^  |          |            |              |              |
//!            |  v          +------------+--------------+--------------+
//!            | Done                     (back to Dequeuing)
//! ```
//!
//! Every step is awaited in sequence; there is never more than one request
//! in flight.

use crate::config::{validate, CrawlConfig};
use crate::crawler::classifier::{classify, ContentKind};
use crate::crawler::extractor::{extract_with_links, LinkScope};
use crate::crawler::fetcher::{FetchedPage, Fetcher};
use crate::crawler::frontier::FrontierEntry;
use crate::crawler::record::{JsonPage, PageRecord};
use crate::crawler::render::Renderer;
use crate::robots::resolve_sitemaps;
use crate::state::{CrawlPhase, CrawlState};
use crate::url::{is_crawlable, parse_seed, resolve_href};
use crate::{CrawlerError, PageError};
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

/// One state of the engine, carrying the data the next transition needs
#[derive(Debug)]
enum Step {
    Idle,
    Dequeuing,
    Fetching(FrontierEntry),
    Classifying(FrontierEntry, FetchedPage),
    Extracting(FrontierEntry, FetchedPage),
    EnqueuingLinks(FrontierEntry, Vec<Url>),
    Done,
}

impl Step {
    fn phase(&self) -> CrawlPhase {
        match self {
            Self::Idle => CrawlPhase::Idle,
            Self::Dequeuing => CrawlPhase::Dequeuing,
            Self::Fetching(_) => CrawlPhase::Fetching,
            Self::Classifying(..) => CrawlPhase::Classifying,
            Self::Extracting(..) => CrawlPhase::Extracting,
            Self::EnqueuingLinks(..) => CrawlPhase::EnqueuingLinks,
            Self::Done => CrawlPhase::Done,
        }
    }
}

/// Breadth-first crawler for a single crawl invocation
///
/// Owns the configuration snapshot and the fetcher (and through it the HTTP
/// client and any renderer). [`CrawlEngine::run`] consumes the engine, so
/// those resources are released when the crawl returns.
pub struct CrawlEngine {
    config: CrawlConfig,
    fetcher: Fetcher,
}

impl CrawlEngine {
    /// Creates an engine that fetches pages without rendering
    pub fn new(config: CrawlConfig) -> Result<Self, CrawlerError> {
        Self::with_renderer(config, None)
    }

    /// Creates an engine with an optional renderer
    ///
    /// The renderer is used only if `enable_js_rendering` is set.
    pub fn with_renderer(
        config: CrawlConfig,
        renderer: Option<Arc<dyn Renderer>>,
    ) -> Result<Self, CrawlerError> {
        validate(&config)?;
        let fetcher = Fetcher::new(&config, renderer)?;
        Ok(Self { config, fetcher })
    }

    /// Creates an engine, launching a headless browser if rendering is
    /// enabled and the `render` feature is compiled in
    ///
    /// A browser that fails to launch is logged and the crawl proceeds with
    /// plain fetching.
    pub async fn launch(config: CrawlConfig) -> Result<Self, CrawlerError> {
        let renderer = if config.enable_js_rendering {
            launch_renderer(&config).await
        } else {
            None
        };
        Self::with_renderer(config, renderer)
    }

    /// Overrides the per-request and per-render timeouts
    pub fn with_timeouts(mut self, request: Duration, render: Duration) -> Self {
        self.fetcher = self.fetcher.with_timeouts(request, render);
        self
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    /// Crawls from `seed` and returns the page records in crawl order
    ///
    /// Possibly empty: failed pages are skipped, and a seed that is not an
    /// http(s) URL is logged and yields no records.
    pub async fn run(self, seed: &str) -> Vec<PageRecord> {
        let seed = match parse_seed(seed) {
            Ok(seed) => seed,
            Err(e) => {
                tracing::warn!("Skipping seed {:?}: {}", seed, e);
                return Vec::new();
            }
        };
        let start_time = Instant::now();
        tracing::info!(
            "Starting crawl of {} (max depth {}, same domain only: {})",
            seed,
            self.config.max_depth,
            self.config.same_domain_only
        );

        let mut state = CrawlState::new(seed.clone());
        let mut step = Step::Idle;

        loop {
            let from = step.phase();
            let next = self.advance(step, &seed, &mut state).await;
            let to = next.phase();

            debug_assert!(
                from.can_transition_to(to),
                "illegal transition {} -> {}",
                from,
                to
            );
            tracing::trace!("{} -> {}", from, to);

            if to.is_terminal() {
                break;
            }
            step = next;
        }

        let stats = state.stats();
        tracing::info!(
            "Crawl completed: {} pages recorded, {} skipped, {} discarded in {:?}",
            stats.recorded,
            stats.failed,
            stats.discarded,
            start_time.elapsed()
        );

        state.into_results()
    }

    /// Performs one transition
    async fn advance(&self, step: Step, seed: &Url, state: &mut CrawlState) -> Step {
        match step {
            Step::Idle => {
                self.seed_from_sitemaps(seed, state).await;
                Step::Dequeuing
            }
            Step::Dequeuing => self.dequeue(state),
            Step::Fetching(entry) => match self.fetcher.fetch(&entry.url).await {
                Ok(page) => {
                    tracing::debug!(
                        "Fetched {} (status {}, {} bytes{})",
                        page.final_url,
                        page.status_code,
                        page.body.len(),
                        if page.rendered { ", rendered" } else { "" }
                    );
                    Step::Classifying(entry, page)
                }
                Err(e) => {
                    skip(state, &PageError::from(e));
                    Step::Dequeuing
                }
            },
            Step::Classifying(entry, page) => {
                match classify(&page.content_type, self.config.content_type_preference) {
                    ContentKind::Json => {
                        self.record_json(entry, page, state);
                        Step::Dequeuing
                    }
                    ContentKind::Html => Step::Extracting(entry, page),
                }
            }
            Step::Extracting(entry, page) => self.extract(entry, page, seed, state),
            Step::EnqueuingLinks(entry, links) => {
                let depth = entry.depth + 1;
                let queued = links
                    .into_iter()
                    .filter(|link| state.enqueue(link.clone(), depth))
                    .count();
                tracing::debug!(
                    "Queued {} link(s) from {} at depth {}",
                    queued,
                    entry.url,
                    depth
                );
                Step::Dequeuing
            }
            Step::Done => Step::Done,
        }
    }

    /// Adds robots.txt sitemap URLs as extra depth-0 seeds
    ///
    /// Sitemap URLs are crawled as ordinary pages; their XML is not parsed
    /// for `<url>` entries.
    async fn seed_from_sitemaps(&self, seed: &Url, state: &mut CrawlState) {
        for sitemap in resolve_sitemaps(self.fetcher.client(), seed).await {
            match resolve_href(seed, &sitemap) {
                Ok(url) if is_crawlable(&url) => {
                    tracing::debug!("Seeding sitemap {}", url);
                    state.add_seed(url);
                }
                Ok(url) => tracing::debug!("Ignoring non-HTTP sitemap {}", url),
                Err(e) => tracing::debug!("Ignoring sitemap: {}", e),
            }
        }
    }

    fn dequeue(&self, state: &mut CrawlState) -> Step {
        let Some(entry) = state.next_entry() else {
            return Step::Done;
        };

        if state.is_visited(&entry.url) || entry.depth > self.config.max_depth {
            state.record_discard();
            return Step::Dequeuing;
        }

        state.mark_visited(&entry.url);
        tracing::info!("Crawling {} at depth {}", entry.url, entry.depth);
        Step::Fetching(entry)
    }

    fn record_json(&self, entry: FrontierEntry, page: FetchedPage, state: &mut CrawlState) {
        match serde_json::from_str(&page.body) {
            Ok(json) => state.push_result(PageRecord::Json(JsonPage {
                url: entry.url.to_string(),
                json,
            })),
            Err(source) => skip(
                state,
                &PageError::JsonParse {
                    url: entry.url.to_string(),
                    source,
                },
            ),
        }
    }

    fn extract(
        &self,
        entry: FrontierEntry,
        page: FetchedPage,
        seed: &Url,
        state: &mut CrawlState,
    ) -> Step {
        let expand = entry.depth < self.config.max_depth;
        let scope = expand.then_some(LinkScope {
            seed,
            same_domain_only: self.config.same_domain_only,
        });

        let (record, links) = extract_with_links(&page.body, &entry.url, &self.config, scope);
        state.push_result(PageRecord::Html(record));

        if expand {
            Step::EnqueuingLinks(entry, links)
        } else {
            Step::Dequeuing
        }
    }
}

fn skip(state: &mut CrawlState, error: &PageError) {
    tracing::warn!("Skipping page: {}", error);
    state.record_failure();
}

#[cfg(feature = "render")]
async fn launch_renderer(config: &CrawlConfig) -> Option<Arc<dyn Renderer>> {
    use crate::crawler::render::ChromiumRenderer;

    match ChromiumRenderer::launch(&config.user_agent).await {
        Ok(renderer) => Some(Arc::new(renderer)),
        Err(e) => {
            tracing::warn!("JS rendering unavailable, falling back to plain fetch: {}", e);
            None
        }
    }
}

#[cfg(not(feature = "render"))]
async fn launch_renderer(_config: &CrawlConfig) -> Option<Arc<dyn Renderer>> {
    None
}
