//! Crawler module for seed page fetching and link discovery
//!
//! This module contains the discovery half of the pipeline:
//! - HTTP fetching with a configured client identity
//! - A randomized pause before every request
//! - Site-specific article link extraction
//! - The sequential seed loop with cap enforcement

mod coordinator;
mod delay;
mod fetcher;
mod links;

pub use coordinator::Crawler;
pub use delay::PoliteDelay;
pub use fetcher::{build_http_client, fetch_url, FetchResult};
pub use links::LinkExtractor;

use crate::config::{CrawlPlan, SiteConfig};

/// Runs discovery for a validated plan and returns the article URLs
///
/// This is the main entry point for the discovery phase. It will:
/// 1. Build the HTTP client and link extractor from the site profile
/// 2. Visit each seed in order, pausing before every request
/// 3. Collect unique article URLs within the configured caps
///
/// # Example
///
/// ```no_run
/// use article_sieve::config::{load_site_config, validate_config};
/// use article_sieve::crawler::discover;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let path = Path::new("crawler_config.toml");
/// let urls = discover(validate_config(path)?, &load_site_config(path)?).await?;
/// println!("{}", urls.join("\n"));
/// # Ok(())
/// # }
/// ```
pub async fn discover(plan: CrawlPlan, site: &SiteConfig) -> crate::Result<Vec<String>> {
    let mut crawler = Crawler::new(plan, site)?;
    Ok(crawler.find_articles().await.to_vec())
}
