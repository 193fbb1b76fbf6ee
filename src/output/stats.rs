//! Per-run article statistics

use crate::article::ParseOutcome;
use crate::ArticleError;

/// Tally of what happened to each discovered article
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseStatistics {
    /// Articles fetched and fully extracted
    pub parsed: u64,

    /// Articles whose page could not be fetched
    pub fetch_failed: u64,

    /// Articles fetched but with unexpected markup or date format
    pub malformed: u64,

    /// Raw text files written
    pub saved: u64,
}

impl ParseStatistics {
    /// Counts the outcome of one `parse` call
    pub fn record(&mut self, outcome: &Result<ParseOutcome, ArticleError>) {
        match outcome {
            Ok(ParseOutcome::Parsed) => self.parsed += 1,
            Ok(ParseOutcome::FetchFailed { .. }) => self.fetch_failed += 1,
            Err(_) => self.malformed += 1,
        }
    }

    /// Number of articles attempted
    pub fn total(&self) -> u64 {
        self.parsed + self.fetch_failed + self.malformed
    }

    /// Share of attempted articles that were fully parsed, in percent
    pub fn success_rate(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            (self.parsed as f64 / self.total() as f64) * 100.0
        }
    }
}

/// Emits the statistics through the log
///
/// Stdout is reserved for the URL list, so the summary goes to the log.
pub fn log_statistics(stats: &ParseStatistics) {
    tracing::info!(
        "Articles: {} parsed, {} fetch failures, {} malformed, {} saved ({:.1}% success)",
        stats.parsed,
        stats.fetch_failed,
        stats.malformed,
        stats.saved,
        stats.success_rate()
    );
}
