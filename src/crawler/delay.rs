//! Randomized pause inserted before every request
//!
//! This is not a rate limiter: it only spreads requests out so the target
//! server does not see bursts.

use crate::config::SiteConfig;
use crate::ConfigError;
use rand::Rng;
use std::time::Duration;

/// Sleeps for a random interval in `[min, max]` before each request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoliteDelay {
    min_ms: u64,
    max_ms: u64,
}

impl PoliteDelay {
    /// Creates a delay drawn from `[min_ms, max_ms]`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidSite` if `min_ms > max_ms`.
    pub fn new(min_ms: u64, max_ms: u64) -> Result<Self, ConfigError> {
        if min_ms > max_ms {
            return Err(ConfigError::InvalidSite(format!(
                "delay-min-ms ({}) must not exceed delay-max-ms ({})",
                min_ms, max_ms
            )));
        }
        Ok(Self { min_ms, max_ms })
    }

    /// The delay configured by a site profile
    pub fn from_site(site: &SiteConfig) -> Result<Self, ConfigError> {
        Self::new(site.delay_min_ms, site.delay_max_ms)
    }

    /// A delay that never sleeps
    pub fn none() -> Self {
        Self { min_ms: 0, max_ms: 0 }
    }

    /// Picks the next pause length
    pub fn next_duration(&self) -> Duration {
        if self.min_ms == self.max_ms {
            return Duration::from_millis(self.min_ms);
        }
        let millis = rand::rng().random_range(self.min_ms..=self.max_ms);
        Duration::from_millis(millis)
    }

    /// Sleeps for a freshly drawn interval
    pub async fn wait(&self) {
        let pause = self.next_duration();
        if pause.is_zero() {
            return;
        }
        tracing::debug!("Waiting {:?} before next request", pause);
        tokio::time::sleep(pause).await;
    }
}
