//! Retry policy for product page fetches.
//!
//! Amazon answers scrapers with 503/403 (and sometimes a bogus 404) that
//! frequently clear up on a later attempt, so those statuses are treated as
//! transient alongside 500. Delays grow linearly with the attempt number and
//! carry a random jitter so repeated requests do not line up.
//!
//! # Default schedule
//!
//! | After attempt | Sleep                       |
//! |---------------|-----------------------------|
//! | 1             | 2 s + U(0.5 s, 1.5 s)       |
//! | 2             | 4 s + U(0.5 s, 1.5 s)       |
//! | n             | 2n s + U(0.5 s, 1.5 s)      |
//!
//! With 9 attempts there are 8 sleeps; there is no overall deadline, so the
//! worst case is `attempts × (request timeout + backoff)`.

use std::time::Duration;

use rand::Rng;

use legione_core::AppConfig;

/// Statuses that are retried rather than surfaced immediately.
pub const DEFAULT_RETRYABLE_STATUSES: [u16; 4] = [500, 503, 403, 404];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one. Always at least 1.
    pub max_attempts: u32,
    /// Multiplied by the attempt number to get the base delay.
    pub base_delay: Duration,
    pub jitter_min: Duration,
    pub jitter_max: Duration,
    pub retryable_statuses: Vec<u16>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 9,
            base_delay: Duration::from_secs(2),
            jitter_min: Duration::from_millis(500),
            jitter_max: Duration::from_millis(1500),
            retryable_statuses: DEFAULT_RETRYABLE_STATUSES.to_vec(),
        }
    }
}

impl RetryPolicy {
    /// A policy that never sleeps. Used by tests and local tooling.
    #[must_use]
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay: Duration::ZERO,
            jitter_min: Duration::ZERO,
            jitter_max: Duration::ZERO,
            retryable_statuses: DEFAULT_RETRYABLE_STATUSES.to_vec(),
        }
    }

    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            max_attempts: config.scraper_max_attempts.max(1),
            base_delay: Duration::from_secs(config.scraper_backoff_base_secs),
            jitter_min: Duration::from_millis(config.scraper_jitter_min_ms),
            jitter_max: Duration::from_millis(config.scraper_jitter_max_ms),
            retryable_statuses: DEFAULT_RETRYABLE_STATUSES.to_vec(),
        }
    }

    #[must_use]
    pub fn is_retryable_status(&self, status: u16) -> bool {
        self.retryable_statuses.contains(&status)
    }

    /// Delay to wait after the given 1-based failed attempt.
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let base = self.base_delay.saturating_mul(attempt);
        base.saturating_add(self.jitter())
    }

    fn jitter(&self) -> Duration {
        let (lo, hi) = if self.jitter_min <= self.jitter_max {
            (self.jitter_min, self.jitter_max)
        } else {
            (self.jitter_max, self.jitter_min)
        };
        if lo == hi {
            return lo;
        }
        #[allow(clippy::cast_possible_truncation)]
        let millis = rand::rng().random_range(lo.as_millis() as u64..=hi.as_millis() as u64);
        Duration::from_millis(millis)
    }
}
