//! Crawler coordinator - seed page discovery loop
//!
//! The crawler walks the seed list in order, one request at a time:
//!
//! ```text
//! IDLE -> FETCHING(seed_i) -> EXTRACTING(seed_i) -> (next seed | DONE)
//! ```
//!
//! Discovered URLs are de-duplicated across all seeds and bounded by two caps:
//! no seed contributes more than `max_articles_per_seed` new URLs, and the whole
//! list never exceeds `total_articles`.

use crate::config::{CrawlPlan, SiteConfig};
use crate::crawler::delay::PoliteDelay;
use crate::crawler::links::LinkExtractor;
use crate::crawler::{build_http_client, fetch_url, FetchResult};
use crate::output::save_page_snapshot;
use reqwest::Client;
use scraper::Html;
use std::collections::HashSet;
use std::path::PathBuf;

/// Discovers article URLs from a fixed list of seed pages
pub struct Crawler {
    seed_urls: Vec<String>,
    total_max_articles: usize,
    max_articles_per_seed: usize,
    urls: Vec<String>,
    seen: HashSet<String>,
    client: Client,
    extractor: LinkExtractor,
    delay: PoliteDelay,
    snapshot_dir: Option<PathBuf>,
}

impl Crawler {
    /// Creates a crawler for the given plan and site profile
    ///
    /// # Errors
    ///
    /// Fails if the site's link rule does not compile, its delay bounds are
    /// reversed, or the HTTP client cannot be built.
    pub fn new(plan: CrawlPlan, site: &SiteConfig) -> crate::Result<Self> {
        let client = build_http_client(site)?;
        let extractor = LinkExtractor::from_site(site)?;
        let delay = PoliteDelay::from_site(site)?;
        Ok(Self::with_parts(plan, client, extractor, delay))
    }

    /// Creates a crawler from already-built collaborators
    pub fn with_parts(
        plan: CrawlPlan,
        client: Client,
        extractor: LinkExtractor,
        delay: PoliteDelay,
    ) -> Self {
        let (seed_urls, total_max_articles, max_articles_per_seed) = plan.into_parts();
        Self {
            seed_urls,
            total_max_articles,
            max_articles_per_seed,
            urls: Vec::new(),
            seen: HashSet::new(),
            client,
            extractor,
            delay,
            snapshot_dir: None,
        }
    }

    /// Saves every fetched seed page as `<index>.html` into `dir`
    pub fn with_snapshot_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.snapshot_dir = Some(dir.into());
        self
    }

    /// The seed URLs this crawler visits, in order
    pub fn seed_urls(&self) -> &[String] {
        &self.seed_urls
    }

    /// URLs discovered so far, in discovery order
    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    /// The HTTP client shared with article parsers
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Runs the discovery loop over all seeds and returns the discovered URLs
    ///
    /// A seed whose fetch fails is logged and skipped. The loop stops without
    /// further requests once the total cap is reached, and makes none at all
    /// when no seed may contribute.
    pub async fn find_articles(&mut self) -> &[String] {
        if self.max_articles_per_seed == 0 {
            tracing::info!("Per-seed cap is 0, no seed pages will be fetched");
            return &self.urls;
        }

        for (index, seed) in self.seed_urls.clone().iter().enumerate() {
            if self.total_reached() {
                tracing::info!(
                    "Total cap of {} articles reached, skipping remaining seeds",
                    self.total_max_articles
                );
                break;
            }

            self.delay.wait().await;

            tracing::info!("Fetching seed page {}", seed);
            let body = match fetch_url(&self.client, seed).await {
                FetchResult::Success { body, .. } => body,
                failure => {
                    tracing::warn!(
                        "Skipping seed {}: {}",
                        seed,
                        failure.failure_reason().unwrap_or_default()
                    );
                    continue;
                }
            };

            if let Some(dir) = &self.snapshot_dir {
                if let Err(e) = save_page_snapshot(dir, index + 1, &body) {
                    tracing::warn!("Failed to save snapshot of {}: {}", seed, e);
                }
            }

            let document = Html::parse_document(&body);
            let links = self.extractor.extract(&document);
            let added = self.accumulate(links);

            tracing::info!(
                "Seed {} contributed {} new article URLs ({} total)",
                seed,
                added,
                self.urls.len()
            );
        }

        &self.urls
    }

    /// Appends unseen links until either cap is hit; returns how many were added
    fn accumulate(&mut self, links: Vec<String>) -> usize {
        let mut added = 0;

        for link in links {
            if added >= self.max_articles_per_seed || self.total_reached() {
                break;
            }
            if self.seen.insert(link.clone()) {
                tracing::debug!("Discovered article URL: {}", link);
                self.urls.push(link);
                added += 1;
            }
        }

        added
    }

    fn total_reached(&self) -> bool {
        self.urls.len() >= self.total_max_articles
    }
}
