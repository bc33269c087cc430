//! Core configuration types for a scrape run
//!
//! `ScrapeConfig` holds the validated configuration surface for one keyword:
//! pagination limits, the retry/backoff envelope, politeness delays and the
//! render wait handed to the fetch controller.

use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// What the pagination driver does with cards that failed to parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailedCardPolicy {
    /// Substitute a placeholder record so records line up 1:1 with cards
    #[default]
    KeepPlaceholder,
    /// Skip failed cards entirely
    Drop,
}

/// Main configuration struct for scraping one search keyword
#[derive(Debug, Clone, Serialize)]
pub struct ScrapeConfig {
    pub(crate) keyword: String,
    pub(crate) max_pages: u32,
    pub(crate) retry_attempts: u32,
    pub(crate) backoff_min: Duration,
    pub(crate) backoff_max: Duration,
    pub(crate) inter_page_delay_min: Duration,
    pub(crate) inter_page_delay_max: Duration,

    /// Time given to the page's scripts to render results after navigation.
    ///
    /// **INVARIANT:** sampled once when the config is built and never
    /// re-sampled, so every fetch of a run waits the same amount.
    pub(crate) render_wait: Duration,

    /// Timeout for a single `navigate` call inside the page fetcher
    pub(crate) navigation_timeout: Duration,

    /// Origin prepended to root-relative listing links and used for search URLs
    pub(crate) site_origin: String,

    pub(crate) failed_card_policy: FailedCardPolicy,

    pub(crate) headless: bool,

    /// Fixed user agent; when `None` the browser session picks one at random
    pub(crate) user_agent: Option<String>,
}

/// Errors raised by `ScrapeConfigBuilder::build`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("search keyword must not be empty")]
    EmptyKeyword,

    #[error("{0} must be a positive integer")]
    NotPositive(&'static str),

    #[error("{0} must be a positive duration")]
    ZeroDuration(&'static str),

    #[error("{name}: minimum {min:?} exceeds maximum {max:?}")]
    InvertedRange {
        name: &'static str,
        min: Duration,
        max: Duration,
    },

    #[error("site origin '{0}' is not an absolute http(s) URL")]
    InvalidOrigin(String),
}
