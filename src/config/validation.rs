use crate::config::types::{CrawlPlan, SiteConfig};
use crate::crawler::PoliteDelay;
use crate::ConfigError;
use serde_json::{Map, Value};
use url::Url;

pub(crate) const SEED_URLS_KEY: &str = "base_urls";
pub(crate) const TOTAL_KEY: &str = "total_articles_to_find_and_parse";
pub(crate) const PER_SEED_KEY: &str = "max_number_articles_to_get_from_one_seed";

/// Validates a parsed configuration document and extracts the crawl plan
///
/// Checks run in a fixed order and stop at the first violation:
///
/// 1. The document is a mapping with all three required keys
/// 2. The seed list is an array of URL strings
/// 3. Both caps are integers
/// 4. The total cap is not negative
/// 5. The per-seed cap lies within `[0, total]`
///
/// Keys other than the three required ones are ignored.
pub fn validate(document: &Value) -> Result<CrawlPlan, ConfigError> {
    let map = required_keys(document)?;

    let seed_urls = validate_seed_urls(&map[SEED_URLS_KEY])?;

    let total = integer_field(map, TOTAL_KEY)?;
    let per_seed = integer_field(map, PER_SEED_KEY)?;

    if total < 0 {
        return Err(ConfigError::IncorrectNumberOfArticles(total));
    }

    if per_seed < 0 || per_seed > total {
        return Err(ConfigError::NumberOfArticlesOutOfRange { per_seed, total });
    }

    Ok(CrawlPlan {
        seed_urls,
        total_articles: total as usize,
        max_articles_per_seed: per_seed as usize,
    })
}

/// Validates the site profile
///
/// Selectors and the link pattern are compiled later by their consumers; here
/// we only reject values that can never work.
pub fn validate_site(site: &SiteConfig) -> Result<(), ConfigError> {
    if site.user_agent.trim().is_empty() {
        return Err(ConfigError::InvalidSite(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if site.link_pattern.is_empty() {
        return Err(ConfigError::InvalidPattern(
            "link-pattern cannot be empty".to_string(),
        ));
    }

    PoliteDelay::from_site(site)?;

    Ok(())
}

fn required_keys(document: &Value) -> Result<&Map<String, Value>, ConfigError> {
    let map = document.as_object().ok_or(ConfigError::UnknownConfig)?;

    if [SEED_URLS_KEY, TOTAL_KEY, PER_SEED_KEY]
        .iter()
        .all(|key| map.contains_key(*key))
    {
        Ok(map)
    } else {
        Err(ConfigError::UnknownConfig)
    }
}

fn validate_seed_urls(value: &Value) -> Result<Vec<String>, ConfigError> {
    let entries = value.as_array().ok_or_else(|| {
        ConfigError::IncorrectUrl(format!("{} must be a list of strings", SEED_URLS_KEY))
    })?;

    entries
        .iter()
        .map(|entry| {
            let seed = entry.as_str().ok_or_else(|| {
                ConfigError::IncorrectUrl(format!("seed URL must be a string, got {}", entry))
            })?;
            validate_seed_url(seed)?;
            Ok(seed.to_string())
        })
        .collect()
}

/// A seed must carry both a scheme and a host
fn validate_seed_url(seed: &str) -> Result<(), ConfigError> {
    let url = Url::parse(seed)
        .map_err(|e| ConfigError::IncorrectUrl(format!("'{}': {}", seed, e)))?;

    if url.host_str().map_or(true, str::is_empty) {
        return Err(ConfigError::IncorrectUrl(format!(
            "'{}' has no host",
            seed
        )));
    }

    Ok(())
}

fn integer_field(map: &Map<String, Value>, key: &str) -> Result<i64, ConfigError> {
    map[key].as_i64().ok_or_else(|| ConfigError::TypeMismatch {
        field: key.to_string(),
    })
}
