//! Article link extraction from seed pages
//!
//! Link discovery is tied to the markup of one site, so the rule is data:
//! a CSS selector picking the listing ("grid") nodes, and a regular
//! expression picking article URLs out of their serialized markup. Swapping
//! both retargets the crawler without code changes.
//!
//! Serialized markup escapes attribute values (`&` becomes `&amp;`), so every
//! match is entity-decoded before it is returned.

use crate::config::SiteConfig;
use crate::ConfigError;
use regex::Regex;
use scraper::{Html, Selector};
use std::collections::HashSet;

/// Finds article URLs inside the listing nodes of a seed page
#[derive(Debug, Clone)]
pub struct LinkExtractor {
    grid: Selector,
    pattern: Regex,
}

impl LinkExtractor {
    /// Compiles an extractor from a grid selector and a link pattern
    ///
    /// If the pattern has a capture group, group 1 is taken as the URL;
    /// otherwise the whole match is.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidPattern` if either part does not compile.
    pub fn new(grid_selector: &str, link_pattern: &str) -> Result<Self, ConfigError> {
        let grid = Selector::parse(grid_selector).map_err(|e| {
            ConfigError::InvalidPattern(format!("grid selector '{}': {:?}", grid_selector, e))
        })?;
        let pattern = Regex::new(link_pattern).map_err(|e| {
            ConfigError::InvalidPattern(format!("link pattern '{}': {}", link_pattern, e))
        })?;

        Ok(Self { grid, pattern })
    }

    /// Builds the extractor described by a site profile
    pub fn from_site(site: &SiteConfig) -> Result<Self, ConfigError> {
        Self::new(&site.grid_selector, &site.link_pattern)
    }

    /// Returns unique article URLs in first-seen order
    ///
    /// A page without grid nodes, or with grid nodes but no matching links,
    /// yields an empty vector.
    pub fn extract(&self, document: &Html) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut links = Vec::new();

        for node in document.select(&self.grid) {
            let markup = node.html();
            for captures in self.pattern.captures_iter(&markup) {
                let matched = captures.get(1).or_else(|| captures.get(0));
                if let Some(m) = matched {
                    let link = html_escape::decode_html_entities(m.as_str()).into_owned();
                    if seen.insert(link.clone()) {
                        links.push(link);
                    }
                }
            }
        }

        links
    }

    /// Parses raw HTML and extracts links from it
    ///
    /// HTML parsing is lenient: broken markup yields whatever nodes the
    /// parser recovers, never an error.
    pub fn extract_from_str(&self, html: &str) -> Vec<String> {
        let document = Html::parse_document(html);
        self.extract(&document)
    }
}
