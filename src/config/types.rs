use serde::Deserialize;
use std::path::PathBuf;

/// Browser-like identity sent with every request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/88.0.4324.190 Safari/537.36";

/// Matches quoted absolute article URLs on the default target site
pub const DEFAULT_LINK_PATTERN: &str = r#""(https://кан-чарас\.рф/[^"\s]+/)""#;

/// The validated crawl parameters: which seeds to visit and how many URLs to keep
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlPlan {
    /// Seed page URLs, visited in order
    pub seed_urls: Vec<String>,

    /// Upper bound on the number of discovered article URLs
    pub total_articles: usize,

    /// Upper bound on the number of URLs any single seed may contribute
    pub max_articles_per_seed: usize,
}

impl CrawlPlan {
    /// Returns the plan as the `(seed_urls, total_cap, per_seed_cap)` triple
    pub fn into_parts(self) -> (Vec<String>, usize, usize) {
        (
            self.seed_urls,
            self.total_articles,
            self.max_articles_per_seed,
        )
    }
}

/// Site profile: everything that couples the crawler to one target site
///
/// Read from the optional `[site]` table of the configuration file. Every
/// field has a default matching the site the crawler was written for.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct SiteConfig {
    /// User-Agent header value for every request
    pub user_agent: String,

    /// CSS selector for the listing nodes that hold article links
    pub grid_selector: String,

    /// Regular expression matching article URLs inside the listing markup
    pub link_pattern: String,

    /// CSS selector for the article body container
    pub content_selector: String,

    /// CSS selector for the article headline
    pub title_selector: String,

    /// CSS selector for the node holding the publication date
    pub date_selector: String,

    /// Lower bound of the randomized pause before each request (milliseconds)
    pub delay_min_ms: u64,

    /// Upper bound of the randomized pause before each request (milliseconds)
    pub delay_max_ms: u64,

    /// Directory for seed page snapshots
    pub pages_dir: PathBuf,

    /// Directory for per-article raw text files
    pub articles_dir: PathBuf,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            grid_selector: ".penci-grid".to_string(),
            link_pattern: DEFAULT_LINK_PATTERN.to_string(),
            content_selector: "div.inner-post-entry".to_string(),
            title_selector: "h1".to_string(),
            date_selector: "div.post-box-meta-single".to_string(),
            delay_min_ms: 3000,
            delay_max_ms: 6000,
            pages_dir: PathBuf::from("tmp/pages"),
            articles_dir: PathBuf::from("tmp/articles"),
        }
    }
}

/// Top-level view of the configuration file used to pull out the site profile
///
/// The crawl parameters are validated separately from the raw document, so
/// only the `[site]` table is deserialized here.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ConfigFile {
    #[serde(default)]
    pub site: SiteConfig,
}
