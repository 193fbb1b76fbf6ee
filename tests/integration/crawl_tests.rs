//! Integration tests for the crawler and article parser
//!
//! These tests use wiremock to create mock HTTP servers and run discovery and
//! article extraction end-to-end.

use article_sieve::article::{parse_articles, ArticleParser, ArticleSelectors, ParseOutcome};
use article_sieve::config::{CrawlPlan, SiteConfig};
use article_sieve::crawler::{build_http_client, discover, Crawler};
use chrono::NaiveDate;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// Creates a site profile targeting the mock server, with no request delay
fn create_test_site(base_url: &str) -> SiteConfig {
    SiteConfig {
        user_agent: "TestBot/1.0".to_string(),
        link_pattern: format!(r#""({}/articles/[^"]+/)""#, regex::escape(base_url)),
        delay_min_ms: 0,
        delay_max_ms: 0,
        ..SiteConfig::default()
    }
}

fn create_test_plan(seeds: Vec<String>, total: usize, per_seed: usize) -> CrawlPlan {
    CrawlPlan {
        seed_urls: seeds,
        total_articles: total,
        max_articles_per_seed: per_seed,
    }
}

/// Builds a listing page whose grid links to the given article slugs
fn listing_page(base_url: &str, slugs: &[&str]) -> String {
    let items: String = slugs
        .iter()
        .map(|slug| {
            format!(
                r#"<li><a href="{}/articles/{}/">{}</a></li>"#,
                base_url, slug, slug
            )
        })
        .collect();
    format!(
        r#"<html><body>
        <a href="{}/articles/sidebar/">Outside the grid</a>
        <ul class="penci-grid">{}</ul>
        </body></html>"#,
        base_url, items
    )
}

fn article_page(title: &str, paragraphs: &[&str], date: &str) -> String {
    let body: String = paragraphs
        .iter()
        .map(|p| format!("<p>{}</p>", p))
        .collect();
    format!(
        r#"<html><body>
        <h1>{}</h1>
        <div class="post-box-meta-single">{}</div>
        <div class="inner-post-entry">{}</div>
        </body></html>"#,
        title, date, body
    )
}

async fn mount_page(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

fn article_url(base_url: &str, slug: &str) -> String {
    format!("{}/articles/{}/", base_url, slug)
}

#[tokio::test]
async fn test_discovery_deduplicates_across_seeds() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/seed-a", listing_page(&base_url, &["x", "y"])).await;
    mount_page(&mock_server, "/seed-b", listing_page(&base_url, &["y", "z"])).await;

    let plan = create_test_plan(
        vec![
            format!("{}/seed-a", base_url),
            format!("{}/seed-b", base_url),
        ],
        10,
        10,
    );
    let mut crawler = Crawler::new(plan, &create_test_site(&base_url)).unwrap();
    let urls = crawler.find_articles().await.to_vec();

    assert_eq!(
        urls,
        vec![
            article_url(&base_url, "x"),
            article_url(&base_url, "y"),
            article_url(&base_url, "z"),
        ]
    );
}

#[tokio::test]
async fn test_discover_matches_crawler() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/seed", listing_page(&base_url, &["d1", "d2"])).await;

    let seeds = vec![format!("{}/seed", base_url)];
    let site = create_test_site(&base_url);

    let crawler = Crawler::new(create_test_plan(seeds.clone(), 5, 5), &site).unwrap();
    assert_eq!(crawler.seed_urls(), seeds.as_slice());
    assert!(crawler.urls().is_empty());

    let urls = discover(create_test_plan(seeds, 5, 5), &site).await.unwrap();
    assert_eq!(
        urls,
        vec![article_url(&base_url, "d1"), article_url(&base_url, "d2")]
    );
}

#[tokio::test]
async fn test_discovery_enforces_per_seed_cap() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/seed-a",
        listing_page(&base_url, &["a1", "a2", "a3", "a4"]),
    )
    .await;
    mount_page(
        &mock_server,
        "/seed-b",
        listing_page(&base_url, &["a1", "b1", "b2", "b3"]),
    )
    .await;

    let plan = create_test_plan(
        vec![
            format!("{}/seed-a", base_url),
            format!("{}/seed-b", base_url),
        ],
        10,
        2,
    );
    let mut crawler = Crawler::new(plan, &create_test_site(&base_url)).unwrap();
    let urls = crawler.find_articles().await.to_vec();

    // A duplicate does not count against the seed that rediscovers it
    assert_eq!(
        urls,
        vec![
            article_url(&base_url, "a1"),
            article_url(&base_url, "a2"),
            article_url(&base_url, "b1"),
            article_url(&base_url, "b2"),
        ]
    );
}

#[tokio::test]
async fn test_discovery_stops_at_total_cap() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/seed-a", listing_page(&base_url, &["a1", "a2"])).await;
    mount_page(&mock_server, "/seed-b", listing_page(&base_url, &["b1", "b2"])).await;

    // Once the cap is reached the third seed is never requested
    Mock::given(method("GET"))
        .and(path("/seed-c"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let plan = create_test_plan(
        vec![
            format!("{}/seed-a", base_url),
            format!("{}/seed-b", base_url),
            format!("{}/seed-c", base_url),
        ],
        3,
        2,
    );
    let mut crawler = Crawler::new(plan, &create_test_site(&base_url)).unwrap();
    let urls = crawler.find_articles().await.to_vec();

    assert_eq!(
        urls,
        vec![
            article_url(&base_url, "a1"),
            article_url(&base_url, "a2"),
            article_url(&base_url, "b1"),
        ]
    );
}

#[tokio::test]
async fn test_failed_seed_is_skipped() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/seed-b", listing_page(&base_url, &["b1"])).await;

    let plan = create_test_plan(
        vec![
            format!("{}/broken", base_url),
            format!("{}/seed-b", base_url),
        ],
        10,
        5,
    );
    let mut crawler = Crawler::new(plan, &create_test_site(&base_url)).unwrap();
    let urls = crawler.find_articles().await.to_vec();

    assert_eq!(urls, vec![article_url(&base_url, "b1")]);
}

#[tokio::test]
async fn test_seed_without_grid_yields_nothing() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/plain",
        format!(
            r#"<html><body><a href="{}/articles/lonely/">Lonely</a></body></html>"#,
            base_url
        ),
    )
    .await;

    let plan = create_test_plan(vec![format!("{}/plain", base_url)], 10, 5);
    let mut crawler = Crawler::new(plan, &create_test_site(&base_url)).unwrap();
    assert!(crawler.find_articles().await.is_empty());
}

#[tokio::test]
async fn test_requests_carry_configured_user_agent() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/seed"))
        .and(header("user-agent", "TestBot/1.0"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(listing_page(&base_url, &["ua"])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let plan = create_test_plan(vec![format!("{}/seed", base_url)], 10, 5);
    let mut crawler = Crawler::new(plan, &create_test_site(&base_url)).unwrap();
    assert_eq!(crawler.find_articles().await.len(), 1);
}

#[tokio::test]
async fn test_seed_request_waits_for_delay() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let listing = listing_page(&base_url, &["late"]);
    let arrived_at: Arc<Mutex<Option<Instant>>> = Arc::new(Mutex::new(None));

    let recorder = Arc::clone(&arrived_at);
    Mock::given(method("GET"))
        .and(path("/seed"))
        .respond_with(move |_: &Request| {
            *recorder.lock().unwrap() = Some(Instant::now());
            ResponseTemplate::new(200).set_body_string(listing.clone())
        })
        .expect(1)
        .mount(&mock_server)
        .await;

    let site = SiteConfig {
        delay_min_ms: 300,
        delay_max_ms: 300,
        ..create_test_site(&base_url)
    };
    let plan = create_test_plan(vec![format!("{}/seed", base_url)], 10, 5);
    let mut crawler = Crawler::new(plan, &site).unwrap();

    let start = Instant::now();
    assert_eq!(crawler.find_articles().await.len(), 1);

    let arrived = arrived_at.lock().unwrap().expect("seed was requested");
    assert!(arrived.duration_since(start) >= Duration::from_millis(300));
}

#[tokio::test]
async fn test_zero_per_seed_cap_fetches_no_seed() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let plan = create_test_plan(vec![format!("{}/seed", base_url)], 10, 0);
    let mut crawler = Crawler::new(plan, &create_test_site(&base_url)).unwrap();
    assert!(crawler.find_articles().await.is_empty());
}

#[tokio::test]
async fn test_seed_snapshots_are_saved() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let listing = listing_page(&base_url, &["s1"]);

    mount_page(&mock_server, "/seed", listing.clone()).await;

    let pages_dir = tempfile::tempdir().unwrap();
    let plan = create_test_plan(vec![format!("{}/seed", base_url)], 10, 5);
    let mut crawler = Crawler::new(plan, &create_test_site(&base_url))
        .unwrap()
        .with_snapshot_dir(pages_dir.path());
    crawler.find_articles().await;

    let snapshot = std::fs::read_to_string(pages_dir.path().join("1.html")).unwrap();
    assert_eq!(snapshot, listing);
}

#[tokio::test]
async fn test_article_parse_end_to_end() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/articles/story/",
        article_page(
            "Harvest festival opens",
            &[" The festival opened on Friday. ", "Crowds&nbsp;gathered early.", " Anna Smirnova "],
            " 05.03.2021 ",
        ),
    )
    .await;

    let site = create_test_site(&base_url);
    let client = build_http_client(&site).unwrap();
    let mut parser = ArticleParser::new(
        client,
        ArticleSelectors::from_site(&site).unwrap(),
        article_url(&base_url, "story"),
        1,
    );

    let outcome = parser.parse().await.unwrap();
    assert_eq!(outcome, ParseOutcome::Parsed);

    let article = parser.article();
    assert_eq!(article.id, 1);
    assert_eq!(article.title.as_deref(), Some("Harvest festival opens"));
    assert_eq!(article.author.as_deref(), Some("Anna Smirnova"));
    assert_eq!(article.date, NaiveDate::from_ymd_opt(2021, 3, 5));
    assert_eq!(
        article.text.as_deref(),
        Some("The festival opened on Friday.\nCrowds gathered early.\nAnna Smirnova")
    );
}

#[tokio::test]
async fn test_article_fetch_failure_leaves_record_empty() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/articles/gone/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let site = create_test_site(&base_url);
    let client = build_http_client(&site).unwrap();
    let mut parser = ArticleParser::new(
        client,
        ArticleSelectors::from_site(&site).unwrap(),
        article_url(&base_url, "gone"),
        2,
    );

    let outcome = parser.parse().await.unwrap();
    assert!(matches!(outcome, ParseOutcome::FetchFailed { .. }));

    let article = parser.into_article();
    assert_eq!(article.id, 2);
    assert!(article.title.is_none());
    assert!(article.author.is_none());
    assert!(article.date.is_none());
    assert!(article.text.is_none());
}

#[tokio::test]
async fn test_article_empty_body_counts_as_fetch_failure() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/articles/blank/", String::new()).await;

    let site = create_test_site(&base_url);
    let client = build_http_client(&site).unwrap();
    let mut parser = ArticleParser::new(
        client,
        ArticleSelectors::from_site(&site).unwrap(),
        article_url(&base_url, "blank"),
        1,
    );

    assert!(!parser.parse().await.unwrap().is_parsed());
    assert!(!parser.article().is_complete());
}

#[tokio::test]
async fn test_parse_articles_assigns_ids_and_saves_text() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/articles/first/",
        article_page("First", &["Body one.", "Author One"], "01.02.2021"),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/articles/missing/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;
    mount_page(
        &mock_server,
        "/articles/bad-date/",
        article_page("Bad", &["Body.", "Author"], "2021-02-01"),
    )
    .await;
    mount_page(
        &mock_server,
        "/articles/third/",
        article_page("Third", &["Body three.", "Author Three"], "03.02.2021"),
    )
    .await;

    let site = create_test_site(&base_url);
    let client = build_http_client(&site).unwrap();
    let urls: Vec<String> = ["first", "missing", "bad-date", "third"]
        .iter()
        .map(|slug| article_url(&base_url, slug))
        .collect();
    let out_dir = tempfile::tempdir().unwrap();

    let (articles, stats) = parse_articles(&client, &site, &urls, Some(out_dir.path()))
        .await
        .unwrap();

    let ids: Vec<u32> = articles.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
    assert_eq!(stats.parsed, 2);
    assert_eq!(stats.fetch_failed, 1);
    assert_eq!(stats.malformed, 1);
    assert_eq!(stats.saved, 2);

    assert_eq!(
        std::fs::read_to_string(out_dir.path().join("1_raw.txt")).unwrap(),
        "Body one.\nAuthor One"
    );
    assert_eq!(
        std::fs::read_to_string(out_dir.path().join("4_raw.txt")).unwrap(),
        "Body three.\nAuthor Three"
    );
    assert!(!out_dir.path().join("2_raw.txt").exists());
    assert!(!out_dir.path().join("3_raw.txt").exists());
}
