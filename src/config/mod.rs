//! Configuration module for Article-Sieve
//!
//! This module handles loading and validating the crawler configuration. The
//! file carries three required keys (seed URLs and the two caps) and an optional
//! `[site]` table describing the target site. Both TOML and JSON are accepted.
//!
//! # Example
//!
//! ```no_run
//! use article_sieve::config::validate_config;
//! use std::path::Path;
//!
//! let (seeds, total, per_seed) = validate_config(Path::new("crawler_config.toml"))
//!     .unwrap()
//!     .into_parts();
//! println!("{} seeds, up to {} articles ({} per seed)", seeds.len(), total, per_seed);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{CrawlPlan, SiteConfig, DEFAULT_LINK_PATTERN, DEFAULT_USER_AGENT};

// Re-export parser functions
pub use parser::{
    compute_config_hash, load_config_with_hash, load_document, load_site_config, validate_config,
};
pub use validation::{validate, validate_site};
