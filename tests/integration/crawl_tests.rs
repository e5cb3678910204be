//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use futures::future::BoxFuture;
use sitetrawl::config::{ContentTypePreference, CrawlConfig};
use sitetrawl::crawler::{crawl, CrawlEngine, PageRecord, RenderError, Renderer};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use url::Url;
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with the given depth
fn create_test_config(max_depth: u32) -> CrawlConfig {
    CrawlConfig {
        user_agent: "TestBot/1.0".to_string(),
        max_depth,
        ..CrawlConfig::default()
    }
}

fn html(body: impl Into<String>) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.into(), "text/html")
}

async fn mount_page(server: &MockServer, page_path: &str, body: impl Into<String>) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(html(body))
        .mount(server)
        .await;
}

fn urls(records: &[PageRecord]) -> Vec<&str> {
    records.iter().map(PageRecord::url).collect()
}

#[tokio::test]
async fn test_seed_headings_at_depth_zero() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        r#"<html><body><h1>Hello</h1><h2>World</h2><a href="/other">Other</a></body></html>"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/other"))
        .respond_with(html("<p>never</p>"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let results = crawl(&mock_server.uri(), create_test_config(0)).await.unwrap();

    assert_eq!(results.len(), 1);
    let headings = results[0].headings().expect("headings extracted");
    assert_eq!(headings.h1, vec!["Hello"]);
    assert_eq!(headings.h2, vec!["World"]);
    assert!(headings.h3.is_empty());
}

#[tokio::test]
async fn test_same_domain_only_skips_external_links() {
    let mock_server = MockServer::start().await;
    let external_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        format!(
            r#"<html><body>
            <a href="{}/page1">Page 1</a>
            <a href="/page2">Page 2</a>
            <a href="{}/elsewhere">External</a>
            </body></html>"#,
            base_url,
            external_server.uri()
        ),
    )
    .await;
    mount_page(&mock_server, "/page1", "<h1>Page 1</h1>").await;
    mount_page(&mock_server, "/page2", "<h1>Page 2</h1>").await;

    Mock::given(any())
        .respond_with(html("<h1>External</h1>"))
        .expect(0)
        .mount(&external_server)
        .await;

    let results = crawl(&base_url, create_test_config(1)).await.unwrap();

    assert_eq!(
        urls(&results),
        vec![
            format!("{}/", base_url),
            format!("{}/page1", base_url),
            format!("{}/page2", base_url),
        ]
    );
}

#[tokio::test]
async fn test_all_domains_follows_external_links() {
    let mock_server = MockServer::start().await;
    let external_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        format!(r#"<a href="{}/elsewhere">External</a>"#, external_server.uri()),
    )
    .await;
    mount_page(&external_server, "/elsewhere", "<h1>External</h1>").await;

    let config = CrawlConfig {
        same_domain_only: false,
        ..create_test_config(1)
    };
    let results = crawl(&mock_server.uri(), config).await.unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[1].url(), format!("{}/elsewhere", external_server.uri()));
}

#[tokio::test]
async fn test_json_response_passed_through() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(r#"{"a":1}"#, "application/json"))
        .mount(&mock_server)
        .await;

    let seed = format!("{}/data", mock_server.uri());
    let results = crawl(&seed, create_test_config(0)).await.unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(
        serde_json::to_value(&results[0]).unwrap(),
        serde_json::json!({"url": seed, "json": {"a": 1}})
    );
}

#[tokio::test]
async fn test_invalid_json_is_skipped_without_html_fallback() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", "<h1>Not JSON</h1>").await;

    let config = CrawlConfig {
        content_type_preference: ContentTypePreference::Json,
        ..create_test_config(0)
    };
    let results = crawl(&mock_server.uri(), config).await.unwrap();

    assert!(results.is_empty());
}

#[tokio::test]
async fn test_unreachable_server_yields_no_results() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let results = crawl(&format!("http://127.0.0.1:{}/", port), create_test_config(1))
        .await
        .unwrap();

    assert!(results.is_empty());
}

#[tokio::test]
async fn test_missing_robots_crawls_seed_only() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/", "<h1>Home</h1>").await;

    let results = crawl(&mock_server.uri(), create_test_config(0)).await.unwrap();

    assert_eq!(urls(&results), vec![format!("{}/", mock_server.uri())]);
}

#[tokio::test]
async fn test_depth_limit() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", r#"<a href="/level1">1</a>"#).await;
    mount_page(&mock_server, "/level1", r#"<a href="/level2">2</a>"#).await;
    mount_page(&mock_server, "/level2", r#"<a href="/level3">3</a>"#).await;
    Mock::given(method("GET"))
        .and(path("/level3"))
        .respond_with(html("<h1>Too deep</h1>"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let results = crawl(&mock_server.uri(), create_test_config(2)).await.unwrap();

    let base_url = mock_server.uri();
    assert_eq!(
        urls(&results),
        vec![
            format!("{}/", base_url),
            format!("{}/level1", base_url),
            format!("{}/level2", base_url),
        ]
    );
}

#[tokio::test]
async fn test_breadth_first_order() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", r#"<a href="/a">A</a><a href="/b">B</a>"#).await;
    mount_page(&mock_server, "/a", r#"<a href="/a/deep">Deep</a>"#).await;
    mount_page(&mock_server, "/b", "<h1>B</h1>").await;
    mount_page(&mock_server, "/a/deep", "<h1>Deep</h1>").await;

    let results = crawl(&mock_server.uri(), create_test_config(2)).await.unwrap();

    let base_url = mock_server.uri();
    assert_eq!(
        urls(&results),
        vec![
            format!("{}/", base_url),
            format!("{}/a", base_url),
            format!("{}/b", base_url),
            format!("{}/a/deep", base_url),
        ]
    );
}

#[tokio::test]
async fn test_failed_page_is_skipped() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", r#"<a href="/missing">x</a><a href="/ok">y</a>"#).await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/ok", "<h1>Ok</h1>").await;

    let results = crawl(&mock_server.uri(), create_test_config(1)).await.unwrap();

    let base_url = mock_server.uri();
    assert_eq!(
        urls(&results),
        vec![format!("{}/", base_url), format!("{}/ok", base_url)]
    );
}

#[tokio::test]
async fn test_no_duplicate_urls_in_cycles() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/">self</a><a href="/a">a</a><a href="/a">a again</a>"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(html(r#"<a href="/">home</a><a href="/a">self</a>"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let results = crawl(&mock_server.uri(), create_test_config(3)).await.unwrap();

    let seen: HashSet<&str> = results.iter().map(PageRecord::url).collect();
    assert_eq!(seen.len(), results.len());
    assert_eq!(results.len(), 2);
}

#[tokio::test]
async fn test_sitemap_urls_seeded_from_robots() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            "User-agent: *\nSitemap: {}/sitemap.xml\nsitemap:/extra\n",
            base_url
        )))
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/", "<h1>Home</h1>").await;
    mount_page(&mock_server, "/sitemap.xml", "<urlset></urlset>").await;
    mount_page(&mock_server, "/extra", "<h1>Extra</h1>").await;

    let results = crawl(&base_url, create_test_config(0)).await.unwrap();

    assert_eq!(
        urls(&results),
        vec![
            format!("{}/", base_url),
            format!("{}/sitemap.xml", base_url),
            format!("{}/extra", base_url),
        ]
    );
}

#[tokio::test]
async fn test_feature_toggles_shape_record() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        r#"<html><head><title> Home </title><meta name="description" content="About us"></head>
        <body><p>First</p><p>Second</p><img src="/logo.png"><img alt="none">
        <a href="/about">About</a></body></html>"#,
    )
    .await;

    let config = CrawlConfig {
        include_headings: false,
        extract_images: true,
        extract_links: true,
        ..create_test_config(0)
    };
    let results = crawl(&mock_server.uri(), config).await.unwrap();

    let base_url = mock_server.uri();
    let page = results[0].as_html().expect("html page");
    let metadata = page.metadata.as_ref().expect("metadata extracted");
    assert_eq!(metadata.title, "Home");
    assert_eq!(metadata.description, "About us");
    assert!(page.headings.is_none());
    assert_eq!(page.paragraphs.as_deref(), Some("First Second"));
    assert_eq!(page.images, Some(vec!["/logo.png".to_string()]));
    assert_eq!(page.links, Some(vec![format!("{}/about", base_url)]));
}

/// Renderer that serves fixed HTML and counts calls
struct FakeRenderer {
    calls: AtomicUsize,
}

impl Renderer for FakeRenderer {
    fn render<'a>(&'a self, _url: &'a Url) -> BoxFuture<'a, Result<String, RenderError>> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok("<html><body><h1>Rendered</h1></body></html>".to_string())
        })
    }
}

#[tokio::test]
async fn test_rendering_strategy_replaces_html_body() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", "<h1>Static</h1>").await;

    let renderer = Arc::new(FakeRenderer {
        calls: AtomicUsize::new(0),
    });
    let config = CrawlConfig {
        enable_js_rendering: true,
        ..create_test_config(0)
    };
    let shared: Arc<dyn Renderer> = renderer.clone();
    let engine = CrawlEngine::with_renderer(config, Some(shared)).unwrap();
    let results = engine.run(&mock_server.uri()).await;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].headings().unwrap().h1, vec!["Rendered"]);
    assert_eq!(renderer.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_renderer_ignored_when_rendering_disabled() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", "<h1>Static</h1>").await;

    let renderer = Arc::new(FakeRenderer {
        calls: AtomicUsize::new(0),
    });
    let shared: Arc<dyn Renderer> = renderer.clone();
    let engine = CrawlEngine::with_renderer(create_test_config(0), Some(shared)).unwrap();
    let results = engine.run(&mock_server.uri()).await;

    assert_eq!(results[0].headings().unwrap().h1, vec!["Static"]);
    assert_eq!(renderer.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_rendering_enabled_without_renderer_falls_back() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", "<h1>Static</h1>").await;

    let config = CrawlConfig {
        enable_js_rendering: true,
        ..create_test_config(0)
    };
    let results = CrawlEngine::new(config)
        .unwrap()
        .run(&mock_server.uri())
        .await;

    assert_eq!(results[0].headings().unwrap().h1, vec!["Static"]);
}

/// Renderer that fails for `/broken` and stalls for `/stuck`
struct FlakyRenderer;

impl Renderer for FlakyRenderer {
    fn render<'a>(&'a self, url: &'a Url) -> BoxFuture<'a, Result<String, RenderError>> {
        Box::pin(async move {
            match url.path() {
                "/broken" => Err(RenderError::Browser("page crashed".to_string())),
                "/stuck" => {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    Ok("<h1>Too late</h1>".to_string())
                }
                other => Ok(format!(
                    r#"<h1>Rendered {}</h1>
                    <a href="/broken">b</a><a href="/stuck">s</a><a href="/fine">f</a>"#,
                    other
                )),
            }
        })
    }
}

#[tokio::test]
async fn test_render_failures_skip_page_and_continue() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", "<h1>Static</h1>").await;
    mount_page(&mock_server, "/broken", "<h1>Static</h1>").await;
    mount_page(&mock_server, "/stuck", "<h1>Static</h1>").await;
    mount_page(&mock_server, "/fine", "<h1>Static</h1>").await;

    let config = CrawlConfig {
        enable_js_rendering: true,
        ..create_test_config(1)
    };
    let renderer: Arc<dyn Renderer> = Arc::new(FlakyRenderer);
    let engine = CrawlEngine::with_renderer(config, Some(renderer))
        .unwrap()
        .with_timeouts(Duration::from_secs(5), Duration::from_millis(200));
    let results = engine.run(&mock_server.uri()).await;

    let base_url = mock_server.uri();
    assert_eq!(
        urls(&results),
        vec![format!("{}/", base_url), format!("{}/fine", base_url)]
    );
    assert_eq!(results[1].headings().unwrap().h1, vec!["Rendered /fine"]);
}

#[tokio::test]
async fn test_request_timeout_skips_page_and_continues() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", r#"<a href="/slow">slow</a><a href="/ok">ok</a>"#).await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(html("<h1>Slow</h1>").set_delay(Duration::from_secs(3)))
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/ok", "<h1>Ok</h1>").await;

    let engine = CrawlEngine::new(create_test_config(1))
        .unwrap()
        .with_timeouts(Duration::from_millis(300), Duration::from_secs(20));
    let results = engine.run(&mock_server.uri()).await;

    let base_url = mock_server.uri();
    assert_eq!(
        urls(&results),
        vec![format!("{}/", base_url), format!("{}/ok", base_url)]
    );
}

#[tokio::test]
async fn test_invalid_seed_yields_no_results() {
    let results = crawl("ftp://example.com/", create_test_config(0)).await.unwrap();
    assert!(results.is_empty());

    let results = crawl("not a url", create_test_config(0)).await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_zero_content_length_crawls() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", "<p>Some text</p>").await;

    let config = CrawlConfig {
        max_content_length: 0,
        ..create_test_config(0)
    };
    let results = crawl(&mock_server.uri(), config).await.unwrap();

    assert_eq!(results[0].paragraphs(), Some("..."));
}
