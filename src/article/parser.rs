//! Article page parser
//!
//! Turns one fetched article page into an [`Article`] in two passes over the
//! parsed markup:
//!
//! 1. **Body text**: every paragraph of the content container, trimmed and
//!    joined by `\n`, with non-breaking spaces turned into plain spaces
//! 2. **Metadata**: headline from the first `h1`, author from the last
//!    paragraph of the container, date from the post-meta node
//!
//! Fetch failures are not errors: `parse` reports them as
//! [`ParseOutcome::FetchFailed`] and leaves the record empty.

use crate::article::date::unify_date_format;
use crate::article::record::Article;
use crate::config::SiteConfig;
use crate::crawler::fetch_url;
use crate::output::save_raw_text;
use crate::{ArticleError, ConfigError};
use chrono::NaiveDate;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::path::{Path, PathBuf};

/// What happened to the article page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// The page was fetched and every field extracted
    Parsed,

    /// The page could not be fetched; the record is still empty
    FetchFailed {
        /// Why the fetch failed
        reason: String,
    },
}

impl ParseOutcome {
    pub fn is_parsed(&self) -> bool {
        matches!(self, ParseOutcome::Parsed)
    }
}

/// Compiled selectors describing where each field lives in an article page
#[derive(Debug, Clone)]
pub struct ArticleSelectors {
    content: Selector,
    content_source: String,
    paragraph: Selector,
    title: Selector,
    title_source: String,
    date: Selector,
    date_source: String,
}

impl ArticleSelectors {
    /// Compiles the selectors of a site profile
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidPattern` naming the selector that failed.
    pub fn from_site(site: &SiteConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            content: compile(&site.content_selector)?,
            content_source: site.content_selector.clone(),
            paragraph: compile("p")?,
            title: compile(&site.title_selector)?,
            title_source: site.title_selector.clone(),
            date: compile(&site.date_selector)?,
            date_source: site.date_selector.clone(),
        })
    }
}

fn compile(selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector)
        .map_err(|e| ConfigError::InvalidPattern(format!("selector '{}': {:?}", selector, e)))
}

/// Fetches and parses a single article, owning its record
pub struct ArticleParser {
    client: Client,
    selectors: ArticleSelectors,
    article: Article,
}

impl ArticleParser {
    /// Creates a parser for the article at `url` with sequential number `id`
    pub fn new(
        client: Client,
        selectors: ArticleSelectors,
        url: impl Into<String>,
        id: u32,
    ) -> Self {
        Self {
            client,
            selectors,
            article: Article::new(url, id),
        }
    }

    /// The record owned by this parser
    pub fn article(&self) -> &Article {
        &self.article
    }

    /// Gives up the parser and returns its record
    pub fn into_article(self) -> Article {
        self.article
    }

    /// Fetches the article page and fills the record
    ///
    /// # Returns
    ///
    /// * `Ok(ParseOutcome::Parsed)` - Every field was extracted
    /// * `Ok(ParseOutcome::FetchFailed { .. })` - Network error, non-success
    ///   status or empty body; the record is left untouched
    /// * `Err(ArticleError)` - The page was fetched but does not have the
    ///   expected structure or date format
    pub async fn parse(&mut self) -> Result<ParseOutcome, ArticleError> {
        tracing::debug!("Fetching article {} ({})", self.article.id, self.article.url);

        let fetched = fetch_url(&self.client, &self.article.url).await;
        let reason = fetched.failure_reason();
        let Some(body) = fetched.into_body() else {
            let reason = reason.unwrap_or_default();
            tracing::warn!("Could not fetch article {}: {}", self.article.url, reason);
            return Ok(ParseOutcome::FetchFailed { reason });
        };

        self.fill_from_html(&body)?;
        Ok(ParseOutcome::Parsed)
    }

    /// Fills the record from already-fetched article markup
    ///
    /// Fields are assigned only when both passes succeed.
    pub fn fill_from_html(&mut self, html: &str) -> Result<(), ArticleError> {
        let document = Html::parse_document(html);
        let container = self.content_container(&document)?;

        let text = self.extract_text(container);
        let (title, author, date) = self.extract_meta(&document, container)?;

        self.article.text = Some(text);
        self.article.title = Some(title);
        self.article.author = Some(author);
        self.article.date = Some(date);

        tracing::debug!(
            "Parsed article {}: {} chars of text",
            self.article.id,
            self.article.text.as_deref().map_or(0, str::len)
        );
        Ok(())
    }

    /// Writes the body text to `<dir>/<id>_raw.txt`
    ///
    /// # Errors
    ///
    /// `ArticleError::Incomplete` if the article has no text yet, or an IO error.
    pub fn save_raw(&self, dir: &Path) -> Result<PathBuf, ArticleError> {
        let text = self
            .article
            .text
            .as_deref()
            .ok_or(ArticleError::Incomplete {
                id: self.article.id,
            })?;
        Ok(save_raw_text(dir, &self.article.raw_file_name(), text)?)
    }

    fn content_container<'a>(&self, document: &'a Html) -> Result<ElementRef<'a>, ArticleError> {
        document
            .select(&self.selectors.content)
            .next()
            .ok_or_else(|| ArticleError::MissingElement {
                selector: self.selectors.content_source.clone(),
            })
    }

    fn extract_text(&self, container: ElementRef<'_>) -> String {
        let mut text = String::new();
        for paragraph in container.select(&self.selectors.paragraph) {
            let raw: String = paragraph.text().collect();
            if raw.is_empty() {
                continue;
            }
            text.push_str(raw.trim());
            text.push('\n');
        }

        let mut text = text.replace('\u{a0}', " ");
        if text.ends_with('\n') {
            text.pop();
        }
        text
    }

    fn extract_meta(
        &self,
        document: &Html,
        container: ElementRef<'_>,
    ) -> Result<(String, String, NaiveDate), ArticleError> {
        let title = document
            .select(&self.selectors.title)
            .next()
            .map(element_text)
            .ok_or_else(|| ArticleError::MissingElement {
                selector: self.selectors.title_source.clone(),
            })?;

        let author = container
            .select(&self.selectors.paragraph)
            .last()
            .map(element_text)
            .ok_or_else(|| ArticleError::MissingElement {
                selector: format!("{} p", self.selectors.content_source),
            })?;

        let date_text = document
            .select(&self.selectors.date)
            .next()
            .map(|element| element.text().collect::<String>())
            .ok_or_else(|| ArticleError::MissingElement {
                selector: self.selectors.date_source.clone(),
            })?;
        let date = unify_date_format(&date_text)?;

        Ok((title, author, date))
    }
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
