//! Output module for persisting crawl results
//!
//! This module handles:
//! - Creating the run's output directories
//! - Writing seed page snapshots and per-article raw text
//! - Recording article statistics for the run

mod files;
pub mod stats;

pub use files::{prepare_environment, save_page_snapshot, save_raw_text};
pub use stats::{log_statistics, ParseStatistics};
