use crate::config::types::{ConfigFile, CrawlPlan, SiteConfig};
use crate::config::validation::{validate, validate_site};
use crate::ConfigError;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Reads a configuration file into a generic document
///
/// Files ending in `.json` are parsed as JSON, everything else as TOML. TOML
/// documents are converted to the same JSON value model so the validator sees
/// one representation.
pub fn load_document(path: &Path) -> Result<Value, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_document(&content, is_json(path))
}

/// Validates the configuration file at `path` and returns the crawl plan
///
/// # Arguments
///
/// * `path` - Path to the TOML or JSON configuration file
///
/// # Returns
///
/// * `Ok(CrawlPlan)` - Seed URLs, total cap and per-seed cap
/// * `Err(ConfigError)` - The file could not be read or parsed, or a check failed
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use article_sieve::config::validate_config;
///
/// let plan = validate_config(Path::new("crawler_config.toml")).unwrap();
/// println!("{} seeds", plan.seed_urls.len());
/// ```
pub fn validate_config(path: &Path) -> Result<CrawlPlan, ConfigError> {
    let document = load_document(path)?;
    validate(&document)
}

/// Loads the optional `[site]` profile, falling back to defaults
pub fn load_site_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    let document = load_document(path)?;
    let file: ConfigFile = serde_json::from_value(document)?;
    validate_site(&file.site)?;
    Ok(file.site)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Logged at startup so a run can be tied to the exact configuration it used.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(result))
}

/// Loads everything needed for a run: the crawl plan, the site profile and the file hash
pub fn load_config_with_hash(path: &Path) -> Result<(CrawlPlan, SiteConfig, String), ConfigError> {
    let plan = validate_config(path)?;
    let site = load_site_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((plan, site, hash))
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn parse_document(content: &str, json: bool) -> Result<Value, ConfigError> {
    if json {
        Ok(serde_json::from_str(content)?)
    } else {
        let table: toml::Value = toml::from_str(content)?;
        Ok(serde_json::to_value(table)?)
    }
}
