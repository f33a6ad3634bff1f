//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! fetching and the full crawl cycle end-to-end.

use async_trait::async_trait;
use lexcrawl::config::{Config, CrawlerConfig, FetcherConfig, OutputConfig};
use lexcrawl::crawler::{crawl, HttpFetcher, Page, PageFetcher, Scheduler, SchedulerSettings, TextSink};
use lexcrawl::output::table_file_name;
use lexcrawl::{Address, FetchError, StopReason};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "text/html")
}

fn fetcher() -> HttpFetcher {
    HttpFetcher::new(&FetcherConfig::default()).expect("Failed to build HTTP client")
}

fn address(url: &str) -> Address {
    Address::parse(url).expect("Failed to parse address")
}

/// Creates a test configuration crawling from `seed` into `output_dir`
fn create_test_config(seed: &str, max_depth: u32, output_dir: &Path) -> Config {
    Config {
        crawler: CrawlerConfig {
            seed: seed.to_string(),
            max_depth,
            max_run_time_ms: 30_000,
            max_workers: 8,
        },
        fetcher: FetcherConfig {
            user_agent: "TestBot/1.0".to_string(),
            timeout_ms: 5_000,
            connect_timeout_ms: 1_000,
        },
        output: OutputConfig {
            directory: output_dir.display().to_string(),
            stopwords_path: None,
        },
    }
}

fn read_table(output_dir: &Path, url: &str) -> Option<String> {
    std::fs::read_to_string(output_dir.join(table_file_name(&address(url)))).ok()
}

#[derive(Default)]
struct RecordingSink {
    processed: Mutex<Vec<String>>,
}

#[async_trait]
impl TextSink for RecordingSink {
    async fn process(&self, _page: &Page, source: &Address) {
        self.processed.lock().unwrap().push(source.to_string());
    }
}

#[tokio::test]
async fn test_fetch_parses_html_page() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/article"))
        .respond_with(html(
            r#"<html><head><title>Article</title></head><body>
            <h1>Crawling</h1><p>Word counts</p>
            <script>ignored()</script>
            <a href="/other">Other</a>
            <a href="https://external.test/page#frag">External</a>
            </body></html>"#
                .to_string(),
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let page = fetcher()
        .fetch(&address(&format!("{}/article", base_url)))
        .await
        .expect("Fetch should succeed");

    assert_eq!(page.title.as_deref(), Some("Article"));
    assert_eq!(page.body_text, "Crawling Word counts Other External");
    assert_eq!(
        page.links,
        vec![
            format!("{}/other", base_url),
            "https://external.test/page#frag".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_fetch_resolves_links_against_page() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/docs/guide/"))
        .respond_with(html(
            r#"<html><body><a href="intro">Intro</a><a href="../api">API</a></body></html>"#
                .to_string(),
        ))
        .mount(&mock_server)
        .await;

    let page = fetcher()
        .fetch(&address(&format!("{}/docs/guide/", base_url)))
        .await
        .expect("Fetch should succeed");

    assert_eq!(
        page.links,
        vec![
            format!("{}/docs/guide/intro", base_url),
            format!("{}/docs/api", base_url),
        ]
    );
}

#[tokio::test]
async fn test_fetch_404_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let result = fetcher()
        .fetch(&address(&format!("{}/missing", mock_server.uri())))
        .await;

    assert!(matches!(result, Err(FetchError::NotFound { .. })));
}

#[tokio::test]
async fn test_fetch_server_error_is_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let result = fetcher()
        .fetch(&address(&format!("{}/broken", mock_server.uri())))
        .await;

    assert!(matches!(result, Err(FetchError::Status { status: 503, .. })));
}

#[tokio::test]
async fn test_fetch_non_html_is_content_mismatch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/report.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("%PDF-1.4", "application/pdf"))
        .mount(&mock_server)
        .await;

    let result = fetcher()
        .fetch(&address(&format!("{}/report.pdf", mock_server.uri())))
        .await;

    match result {
        Err(FetchError::ContentMismatch { content_type, .. }) => {
            assert_eq!(content_type, "application/pdf")
        }
        other => panic!("Expected ContentMismatch, got {:?}", other.map(|p| p.title)),
    }
}

#[tokio::test]
async fn test_full_crawl_writes_frequency_tables() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let output = TempDir::new().expect("Failed to create temp dir");

    // Root links to both pages; the pages link to each other and back
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(format!(
            r#"<html><head><title>Home</title></head><body>
            <p>Welcome to the crawler home</p>
            <a href="{0}/page1">Page 1</a>
            <a href="{0}/page2#top">Page 2</a>
            </body></html>"#,
            base_url
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page1"))
        .respond_with(html(format!(
            r#"<html><head><title>Page 1</title></head><body>
            <p>Spiders crawl pages and spiders count words</p>
            <a href="{0}/page2">Page 2</a>
            <a href="{0}/">Home</a>
            </body></html>"#,
            base_url
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page2"))
        .respond_with(html(format!(
            r#"<html><head><title>Page 2</title></head><body>
            <p>Deep page</p>
            <a href="{0}/page3">Page 3</a>
            </body></html>"#,
            base_url
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    // Beyond max depth
    Mock::given(method("GET"))
        .and(path("/page3"))
        .respond_with(html("<html><body>Too deep</body></html>".to_string()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&format!("{}/", base_url), 1, output.path());
    let summary = tokio::time::timeout(Duration::from_secs(20), crawl(&config))
        .await
        .expect("Crawl timed out")
        .expect("Crawl should succeed");

    assert_eq!(summary.stop_reason, Some(StopReason::Completed));
    assert_eq!(summary.admitted, 3);
    assert_eq!(summary.fetched, 3);
    assert_eq!(summary.in_flight, 0);

    let page1 = read_table(output.path(), &format!("{}/page1", base_url))
        .expect("Table for page1 should exist");
    assert!(page1.starts_with("Word,Frequency\n"));
    assert!(page1.contains("spider,2\n"));
    assert!(page1.contains("crawl,1\n"));
    assert!(!page1.contains("\nand,"));

    assert!(read_table(output.path(), &format!("{}/", base_url)).is_some());
    assert!(read_table(output.path(), &format!("{}/page2", base_url)).is_some());
    assert!(read_table(output.path(), &format!("{}/page3", base_url)).is_none());
}

#[tokio::test]
async fn test_crawl_stops_on_time_budget() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let output = TempDir::new().expect("Failed to create temp dir");

    let links: String = (1..=5)
        .map(|i| format!(r#"<a href="{}/slow{}">Slow</a>"#, base_url, i))
        .collect();
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(format!("<html><body>{}</body></html>", links)))
        .mount(&mock_server)
        .await;

    for i in 1..=5 {
        Mock::given(method("GET"))
            .and(path(format!("/slow{}", i)))
            .respond_with(
                html("<html><body>slow</body></html>".to_string())
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&mock_server)
            .await;
    }

    let mut config = create_test_config(&format!("{}/", base_url), 2, output.path());
    config.crawler.max_run_time_ms = 250;
    config.crawler.max_workers = 1;

    let summary = tokio::time::timeout(Duration::from_secs(20), crawl(&config))
        .await
        .expect("Crawl timed out")
        .expect("Crawl should succeed");

    assert_eq!(summary.stop_reason, Some(StopReason::TimeBudget));
    assert!(summary.fetched <= 2);
    assert!(summary.expired >= 1);
}

#[tokio::test]
async fn test_scheduler_with_http_fetcher_skips_failures() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(format!(
            r#"<html><body>
            <a href="{0}/ok">OK</a>
            <a href="{0}/gone">Gone</a>
            <a href="mailto:someone@example.com">Mail</a>
            </body></html>"#,
            base_url
        )))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/ok"))
        .respond_with(html("<html><body>fine</body></html>".to_string()))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let sink = Arc::new(RecordingSink::default());
    let scheduler = Scheduler::new(
        SchedulerSettings::new(3, Duration::from_secs(30)),
        Arc::new(fetcher()),
        sink.clone(),
    );

    assert!(scheduler.start(address(&format!("{}/", base_url))));
    tokio::time::timeout(Duration::from_secs(20), scheduler.wait())
        .await
        .expect("Crawl timed out");

    let summary = scheduler.summary().expect("Run should be recorded");
    assert_eq!(summary.stop_reason, Some(StopReason::Completed));
    assert_eq!(summary.fetched, 2);
    assert_eq!(summary.fetch_failures, 1);

    let mut processed = sink.processed.lock().unwrap().clone();
    processed.sort();
    assert_eq!(
        processed,
        vec![format!("{}/", base_url), format!("{}/ok", base_url)]
    );
}
