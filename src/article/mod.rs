//! Article extraction: the normalized record, the page parser and the date contract

mod date;
mod parser;
mod record;

pub use date::unify_date_format;
pub use parser::{ArticleParser, ArticleSelectors, ParseOutcome};
pub use record::Article;

use crate::config::SiteConfig;
use crate::output::ParseStatistics;
use crate::ConfigError;
use reqwest::Client;
use std::path::Path;

/// Parses every discovered article in order, one request at a time
///
/// Ids are handed out by a counter starting at 1, in the order of `urls`.
/// When `save_dir` is given, each fully parsed article's text is written
/// there. Per-article failures are logged and counted, never returned.
///
/// # Errors
///
/// Only a broken site profile (selectors that do not compile, reversed
/// delay bounds) fails the call.
pub async fn parse_articles(
    client: &Client,
    site: &SiteConfig,
    urls: &[String],
    save_dir: Option<&Path>,
) -> Result<(Vec<Article>, ParseStatistics), ConfigError> {
    let selectors = ArticleSelectors::from_site(site)?;
    let delay = crate::crawler::PoliteDelay::from_site(site)?;

    let mut stats = ParseStatistics::default();
    let mut articles = Vec::with_capacity(urls.len());
    let mut next_id: u32 = 1;

    for url in urls {
        let id = next_id;
        next_id += 1;

        delay.wait().await;

        let mut parser = ArticleParser::new(client.clone(), selectors.clone(), url.as_str(), id);
        let outcome = parser.parse().await;
        stats.record(&outcome);

        match &outcome {
            Ok(ParseOutcome::Parsed) => {
                if let Some(dir) = save_dir {
                    match parser.save_raw(dir) {
                        Ok(path) => {
                            stats.saved += 1;
                            tracing::debug!("Article {} saved to {}", id, path.display());
                        }
                        Err(e) => tracing::warn!("Failed to save article {}: {}", id, e),
                    }
                }
            }
            Ok(ParseOutcome::FetchFailed { .. }) => {}
            Err(e) => tracing::warn!("Failed to parse article {} ({}): {}", id, url, e),
        }

        articles.push(parser.into_article());
    }

    Ok((articles, stats))
}
