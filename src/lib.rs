//! Article-Sieve: a seed-driven news article harvester
//!
//! This crate crawls a fixed set of seed pages on a single news site, discovers
//! article links that match a site-specific rule, and extracts each article into
//! a normalized record (title, author, publication date, body text).

pub mod article;
pub mod config;
pub mod crawler;
pub mod output;

use thiserror::Error;

/// Main error type for Article-Sieve operations
#[derive(Debug, Error)]
pub enum SieveError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Article error: {0}")]
    Article(#[from] ArticleError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
///
/// The first five variants form the validation contract of the crawler
/// configuration and are reported in the order the checks run.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown config: expected a mapping with base_urls, total_articles_to_find_and_parse and max_number_articles_to_get_from_one_seed")]
    UnknownConfig,

    #[error("Incorrect seed URL: {0}")]
    IncorrectUrl(String),

    #[error("Field '{field}' must be an integer")]
    TypeMismatch { field: String },

    #[error("Total number of articles must be >= 0, got {0}")]
    IncorrectNumberOfArticles(i64),

    #[error("Articles per seed must be within [0, {total}], got {per_seed}")]
    NumberOfArticlesOutOfRange { per_seed: i64, total: i64 },

    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("Invalid site profile: {0}")]
    InvalidSite(String),

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Article extraction and persistence errors
#[derive(Debug, Error)]
pub enum ArticleError {
    #[error("Date '{0}' does not match the DD.MM.YYYY format")]
    DateFormat(String),

    #[error("Element '{selector}' not found in article markup")]
    MissingElement { selector: String },

    #[error("Article {id} has no text to save")]
    Incomplete { id: u32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Article-Sieve operations
pub type Result<T> = std::result::Result<T, SieveError>;

// Re-export commonly used types
pub use article::{unify_date_format, Article, ArticleParser, ParseOutcome};
pub use config::{CrawlPlan, SiteConfig};
pub use crawler::{Crawler, LinkExtractor};
