//! Client-side rendering support
//!
//! A [`Renderer`] loads a page in a real browser engine, lets scripts run,
//! and returns the resulting DOM as HTML. The crawler works without one; the
//! `render` cargo feature provides [`ChromiumRenderer`] backed by a headless
//! Chromium.

use futures::future::BoxFuture;
use thiserror::Error;
use url::Url;

#[cfg(feature = "render")]
pub use chromium::ChromiumRenderer;

/// Errors raised while rendering a page
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Browser launch failed: {0}")]
    Launch(String),

    #[error("Browser error: {0}")]
    Browser(String),
}

/// Produces the script-materialized HTML of a page
pub trait Renderer: Send + Sync {
    /// Loads `url`, waits for scripts to settle, and returns the document HTML
    fn render<'a>(&'a self, url: &'a Url) -> BoxFuture<'a, Result<String, RenderError>>;
}

#[cfg(feature = "render")]
mod chromium {
    use super::{RenderError, Renderer};
    use chromiumoxide::browser::{Browser, BrowserConfig};
    use futures::future::BoxFuture;
    use futures::StreamExt;
    use std::time::Duration;
    use tokio::task::JoinHandle;
    use url::Url;

    /// Time given to client-side scripts after navigation completes
    const SETTLE_DELAY: Duration = Duration::from_secs(2);

    /// Headless Chromium renderer
    ///
    /// The browser process and its event handler live exactly as long as
    /// this value; dropping it aborts the handler and kills the browser.
    pub struct ChromiumRenderer {
        browser: Browser,
        handler: JoinHandle<()>,
    }

    impl ChromiumRenderer {
        /// Launches a headless browser that identifies with `user_agent`
        pub async fn launch(user_agent: &str) -> Result<Self, RenderError> {
            let config = BrowserConfig::builder()
                .arg(format!("--user-agent={}", user_agent))
                .build()
                .map_err(RenderError::Launch)?;

            let (browser, mut handler) = Browser::launch(config)
                .await
                .map_err(|e| RenderError::Launch(e.to_string()))?;

            let handler = tokio::spawn(async move {
                while let Some(event) = handler.next().await {
                    if let Err(e) = event {
                        tracing::debug!("Browser handler error: {:?}", e);
                    }
                }
            });

            Ok(Self { browser, handler })
        }
    }

    impl Renderer for ChromiumRenderer {
        fn render<'a>(&'a self, url: &'a Url) -> BoxFuture<'a, Result<String, RenderError>> {
            Box::pin(async move {
                let page = self
                    .browser
                    .new_page(url.as_str())
                    .await
                    .map_err(|e| RenderError::Browser(e.to_string()))?;

                let content = async {
                    page.wait_for_navigation()
                        .await
                        .map_err(|e| RenderError::Browser(e.to_string()))?;
                    tokio::time::sleep(SETTLE_DELAY).await;
                    page.content()
                        .await
                        .map_err(|e| RenderError::Browser(e.to_string()))
                }
                .await;

                if let Err(e) = page.close().await {
                    tracing::debug!("Failed to close page {}: {}", url, e);
                }
                content
            })
        }
    }

    impl Drop for ChromiumRenderer {
        fn drop(&mut self) {
            self.handler.abort();
        }
    }
}
