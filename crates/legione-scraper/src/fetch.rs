//! Product page fetching with bounded retries.

use crate::error::ScraperError;
use crate::retry::RetryPolicy;
use crate::transport::{HttpTransport, Sleeper, TokioSleeper, Transport};
use crate::user_agent;

/// Retrieves raw product page HTML, retrying transient failures per its
/// [`RetryPolicy`] and rotating the user agent on every attempt.
#[derive(Debug, Clone)]
pub struct PageFetcher<T = HttpTransport, S = TokioSleeper> {
    transport: T,
    sleeper: S,
    policy: RetryPolicy,
    user_agents: Vec<String>,
}

impl<T: Transport, S: Sleeper> PageFetcher<T, S> {
    #[must_use]
    pub fn new(transport: T, sleeper: S, policy: RetryPolicy, user_agents: Vec<String>) -> Self {
        Self {
            transport,
            sleeper,
            policy,
            user_agents,
        }
    }

    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    #[must_use]
    pub fn user_agents(&self) -> &[String] {
        &self.user_agents
    }

    /// Fetches `url` and returns the body of the first 2xx response.
    ///
    /// Statuses in the policy's retryable set and transient transport errors
    /// (timeouts, connection failures) are retried up to `max_attempts`
    /// total. Anything else stops immediately. No partial content is ever
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::FetchFailed`] when retries are exhausted or a
    /// non-transient status/transport error occurs.
    pub async fn fetch(&self, url: &str) -> Result<String, ScraperError> {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut last_failure = String::new();

        for attempt in 1..=max_attempts {
            let user_agent = user_agent::pick(&self.user_agents);

            match self.transport.get(url, user_agent).await {
                Ok(response) if response.is_success() => {
                    tracing::info!(url, attempt, status = response.status, "fetched product page");
                    return Ok(response.body);
                }
                Ok(response) if self.policy.is_retryable_status(response.status) => {
                    last_failure = format!("HTTP {}", response.status);
                }
                Ok(response) => {
                    tracing::error!(
                        url,
                        attempt,
                        status = response.status,
                        "non-transient HTTP status, not retrying"
                    );
                    return Err(ScraperError::FetchFailed {
                        url: url.to_owned(),
                        attempts: attempt,
                        reason: format!("HTTP {}", response.status),
                    });
                }
                Err(err) if err.is_transient() => {
                    last_failure = err.to_string();
                }
                Err(err) => {
                    tracing::error!(url, attempt, error = %err, "request failed, not retrying");
                    return Err(ScraperError::FetchFailed {
                        url: url.to_owned(),
                        attempts: attempt,
                        reason: err.to_string(),
                    });
                }
            }

            if attempt < max_attempts {
                let delay = self.policy.delay_for(attempt);
                #[allow(clippy::cast_possible_truncation)]
                let delay_ms = delay.as_millis() as u64;
                tracing::warn!(
                    url,
                    attempt,
                    max_attempts,
                    delay_ms,
                    reason = %last_failure,
                    "transient fetch failure, retrying after backoff"
                );
                self.sleeper.sleep(delay).await;
            }
        }

        tracing::error!(url, max_attempts, reason = %last_failure, "retry budget exhausted");
        Err(ScraperError::FetchFailed {
            url: url.to_owned(),
            attempts: max_attempts,
            reason: last_failure,
        })
    }
}
