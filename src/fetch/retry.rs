//! Fetch with bounded exponential backoff
//!
//! Transient failures are retried until the attempt ceiling is reached;
//! anything classified fatal fails fast without another attempt.

use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

use super::fetcher::{FetchError, PageFetcher};
use super::outcome::{FetchOutcome, fetch_once};
use crate::config::ScrapeConfig;

/// Attempt ceiling and backoff envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub backoff_min: Duration,
    pub backoff_max: Duration,
}

impl RetryPolicy {
    #[must_use]
    pub fn from_config(config: &ScrapeConfig) -> Self {
        Self {
            attempts: config.retry_attempts(),
            backoff_min: config.backoff_min(),
            backoff_max: config.backoff_max(),
        }
    }

    /// Wait after the `attempt`-th failure (1-based)
    ///
    /// One second doubled per previous failure, clamped into
    /// `backoff_min..=backoff_max`. Non-decreasing in `attempt`.
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(31);
        let raw = Duration::from_secs(1u64 << exponent);
        raw.max(self.backoff_min).min(self.backoff_max.max(self.backoff_min))
    }
}

/// Usable result of a page fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageContent {
    Document(String),
    /// Empty-result marker seen; the parser is skipped
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchReport {
    pub content: PageContent,
    pub attempts: u32,
    /// Waits taken between attempts, in order
    pub backoff: Vec<Duration>,
}

/// Page fetch that ended in a fatal failure, either directly or by
/// exhausting the retry budget
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("fetch failed after {attempts} attempt(s): {source}")]
pub struct FetchFailure {
    pub attempts: u32,
    pub backoff: Vec<Duration>,
    #[source]
    pub source: FetchError,
}

/// Fetch `url`, retrying transient failures according to `policy`
pub async fn fetch_page_with_retry<F: PageFetcher>(
    fetcher: &F,
    url: &str,
    render_wait: Duration,
    policy: RetryPolicy,
) -> Result<FetchReport, FetchFailure> {
    let max_attempts = policy.attempts.max(1);
    let mut backoff = Vec::new();
    let mut attempt = 1;

    loop {
        match fetch_once(fetcher, url, render_wait).await {
            FetchOutcome::Content(html) => {
                info!(attempt, bytes = html.len(), "page fetched");
                return Ok(FetchReport {
                    content: PageContent::Document(html),
                    attempts: attempt,
                    backoff,
                });
            }
            FetchOutcome::EmptyResult => {
                info!(attempt, "site reported no results for this page");
                return Ok(FetchReport {
                    content: PageContent::Empty,
                    attempts: attempt,
                    backoff,
                });
            }
            FetchOutcome::FatalFailure(source) => {
                warn!(attempt, error = %source, "non-retryable fetch error, failing fast");
                return Err(FetchFailure {
                    attempts: attempt,
                    backoff,
                    source,
                });
            }
            FetchOutcome::TransientFailure(source) => {
                if attempt >= max_attempts {
                    warn!(attempt, error = %source, "retry budget exhausted");
                    return Err(FetchFailure {
                        attempts: attempt,
                        backoff,
                        source,
                    });
                }

                let delay = policy.delay_for_attempt(attempt);
                warn!(
                    attempt,
                    max_attempts,
                    ?delay,
                    error = %source,
                    "transient fetch error, retrying"
                );
                tokio::time::sleep(delay).await;
                backoff.push(delay);
                attempt += 1;
            }
        }
    }
}
