//! Article-Sieve main entry point
//!
//! This is the command-line interface for the Article-Sieve news harvester.

use article_sieve::article::parse_articles;
use article_sieve::config::{load_config_with_hash, CrawlPlan, SiteConfig};
use article_sieve::crawler::Crawler;
use article_sieve::output::{log_statistics, prepare_environment};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Article-Sieve: a seed-driven news article harvester
///
/// Visits every seed page listed in the configuration, collects article
/// links from them and prints each discovered URL on its own line.
#[derive(Parser, Debug)]
#[command(name = "article-sieve")]
#[command(version)]
#[command(about = "A seed-driven news article harvester", long_about = None)]
struct Cli {
    /// Path to the TOML or JSON configuration file
    #[arg(value_name = "CONFIG", default_value = "crawler_config.toml")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Also fetch every discovered article and save its raw text
    #[arg(long)]
    parse: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (plan, site, config_hash) = match load_config_with_hash(&cli.config) {
        Ok(loaded) => loaded,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    prepare_environment(&site.pages_dir, &site.articles_dir)?;

    handle_crawl(plan, site, cli.parse).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr; stdout carries only the discovered URLs.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("article_sieve=info,warn"),
            1 => EnvFilter::new("article_sieve=debug,info"),
            2 => EnvFilter::new("article_sieve=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Runs discovery, prints the URLs and optionally parses the articles
async fn handle_crawl(plan: CrawlPlan, site: SiteConfig, parse: bool) -> anyhow::Result<()> {
    tracing::info!(
        "Seeds: {}, total cap: {}, per-seed cap: {}",
        plan.seed_urls.len(),
        plan.total_articles,
        plan.max_articles_per_seed
    );

    let mut crawler = Crawler::new(plan, &site)?.with_snapshot_dir(&site.pages_dir);
    let urls = crawler.find_articles().await.to_vec();

    for url in &urls {
        println!("{}", url);
    }
    tracing::info!("Discovered {} article URLs", urls.len());

    if parse {
        let (_articles, stats) =
            parse_articles(crawler.client(), &site, &urls, Some(&site.articles_dir)).await?;
        log_statistics(&stats);
    }

    Ok(())
}
