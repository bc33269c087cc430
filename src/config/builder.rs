//! Type-safe builder for `ScrapeConfig` using the typestate pattern
//!
//! `build()` is only reachable once a keyword has been supplied; every other
//! setting has a default taken from `utils::constants`.

use std::marker::PhantomData;
use std::time::Duration;

use super::types::{ConfigError, FailedCardPolicy, ScrapeConfig};
use crate::utils::{
    DEFAULT_BACKOFF_MAX, DEFAULT_BACKOFF_MIN, DEFAULT_INTER_PAGE_DELAY_MAX,
    DEFAULT_INTER_PAGE_DELAY_MIN, DEFAULT_MAX_PAGES, DEFAULT_NAVIGATION_TIMEOUT,
    DEFAULT_RENDER_WAIT_MAX, DEFAULT_RENDER_WAIT_MIN, DEFAULT_RETRY_ATTEMPTS, SITE_ORIGIN,
    sample_between,
};

// Type states for the builder
pub struct WithKeyword;

pub struct ScrapeConfigBuilder<State = ()> {
    pub(crate) keyword: Option<String>,
    pub(crate) max_pages: u32,
    pub(crate) retry_attempts: u32,
    pub(crate) backoff_min: Duration,
    pub(crate) backoff_max: Duration,
    pub(crate) inter_page_delay_min: Duration,
    pub(crate) inter_page_delay_max: Duration,
    pub(crate) render_wait_min: Duration,
    pub(crate) render_wait_max: Duration,
    pub(crate) render_wait: Option<Duration>,
    pub(crate) navigation_timeout: Duration,
    pub(crate) site_origin: String,
    pub(crate) failed_card_policy: FailedCardPolicy,
    pub(crate) headless: bool,
    pub(crate) user_agent: Option<String>,
    pub(crate) _phantom: PhantomData<State>,
}

impl Default for ScrapeConfigBuilder<()> {
    fn default() -> Self {
        Self {
            keyword: None,
            max_pages: DEFAULT_MAX_PAGES,
            retry_attempts: DEFAULT_RETRY_ATTEMPTS,
            backoff_min: DEFAULT_BACKOFF_MIN,
            backoff_max: DEFAULT_BACKOFF_MAX,
            inter_page_delay_min: DEFAULT_INTER_PAGE_DELAY_MIN,
            inter_page_delay_max: DEFAULT_INTER_PAGE_DELAY_MAX,
            render_wait_min: DEFAULT_RENDER_WAIT_MIN,
            render_wait_max: DEFAULT_RENDER_WAIT_MAX,
            render_wait: None,
            navigation_timeout: DEFAULT_NAVIGATION_TIMEOUT,
            site_origin: SITE_ORIGIN.to_string(),
            failed_card_policy: FailedCardPolicy::default(),
            headless: true,
            user_agent: None,
            _phantom: PhantomData,
        }
    }
}

impl ScrapeConfig {
    /// Create a builder for configuring a `ScrapeConfig` with a fluent interface
    #[must_use]
    pub fn builder() -> ScrapeConfigBuilder<()> {
        ScrapeConfigBuilder::default()
    }
}

impl ScrapeConfigBuilder<()> {
    pub fn keyword(self, keyword: impl Into<String>) -> ScrapeConfigBuilder<WithKeyword> {
        ScrapeConfigBuilder {
            keyword: Some(keyword.into().trim().to_string()),
            max_pages: self.max_pages,
            retry_attempts: self.retry_attempts,
            backoff_min: self.backoff_min,
            backoff_max: self.backoff_max,
            inter_page_delay_min: self.inter_page_delay_min,
            inter_page_delay_max: self.inter_page_delay_max,
            render_wait_min: self.render_wait_min,
            render_wait_max: self.render_wait_max,
            render_wait: self.render_wait,
            navigation_timeout: self.navigation_timeout,
            site_origin: self.site_origin,
            failed_card_policy: self.failed_card_policy,
            headless: self.headless,
            user_agent: self.user_agent,
            _phantom: PhantomData,
        }
    }
}

fn check_positive(value: u32, name: &'static str) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::NotPositive(name));
    }
    Ok(())
}

fn check_range(name: &'static str, min: Duration, max: Duration) -> Result<(), ConfigError> {
    if min.is_zero() || max.is_zero() {
        return Err(ConfigError::ZeroDuration(name));
    }
    if min > max {
        return Err(ConfigError::InvertedRange { name, min, max });
    }
    Ok(())
}

// Build method only available once the keyword is set
impl ScrapeConfigBuilder<WithKeyword> {
    pub fn build(self) -> Result<ScrapeConfig, ConfigError> {
        let keyword = self.keyword.unwrap_or_default();
        if keyword.is_empty() {
            return Err(ConfigError::EmptyKeyword);
        }

        check_positive(self.max_pages, "max_pages")?;
        check_positive(self.retry_attempts, "retry_attempts")?;
        check_range("backoff", self.backoff_min, self.backoff_max)?;
        check_range(
            "inter_page_delay",
            self.inter_page_delay_min,
            self.inter_page_delay_max,
        )?;
        if self.navigation_timeout.is_zero() {
            return Err(ConfigError::ZeroDuration("navigation_timeout"));
        }

        let render_wait = match self.render_wait {
            Some(wait) => wait,
            None => {
                check_range("render_wait", self.render_wait_min, self.render_wait_max)?;
                sample_between(self.render_wait_min, self.render_wait_max)
            }
        };

        let origin_ok = url::Url::parse(&self.site_origin)
            .map(|u| matches!(u.scheme(), "http" | "https") && u.has_host())
            .unwrap_or(false);
        if !origin_ok {
            return Err(ConfigError::InvalidOrigin(self.site_origin));
        }

        Ok(ScrapeConfig {
            keyword,
            max_pages: self.max_pages,
            retry_attempts: self.retry_attempts,
            backoff_min: self.backoff_min,
            backoff_max: self.backoff_max,
            inter_page_delay_min: self.inter_page_delay_min,
            inter_page_delay_max: self.inter_page_delay_max,
            render_wait,
            navigation_timeout: self.navigation_timeout,
            site_origin: self.site_origin.trim_end_matches('/').to_string(),
            failed_card_policy: self.failed_card_policy,
            headless: self.headless,
            user_agent: self.user_agent,
        })
    }
}

// Setters available in any state
impl<State> ScrapeConfigBuilder<State> {
    /// Maximum number of search pages to visit (default: 2)
    #[must_use]
    pub fn max_pages(mut self, pages: u32) -> Self {
        self.max_pages = pages;
        self
    }

    /// Total fetch attempts per page, including the first (default: 3)
    #[must_use]
    pub fn retry_attempts(mut self, attempts: u32) -> Self {
        self.retry_attempts = attempts;
        self
    }

    /// Bounds for the exponential backoff between attempts (default: 2s..6s)
    #[must_use]
    pub fn backoff(mut self, min: Duration, max: Duration) -> Self {
        self.backoff_min = min;
        self.backoff_max = max;
        self
    }

    /// Range the delay between two pages is sampled from (default: 5s..10s)
    #[must_use]
    pub fn inter_page_delay(mut self, min: Duration, max: Duration) -> Self {
        self.inter_page_delay_min = min;
        self.inter_page_delay_max = max;
        self
    }

    /// Range the render wait is sampled from at build time (default: 8s..12s)
    #[must_use]
    pub fn render_wait_range(mut self, min: Duration, max: Duration) -> Self {
        self.render_wait_min = min;
        self.render_wait_max = max;
        self
    }

    /// Pin the render wait instead of sampling it
    ///
    /// # Example
    /// ```rust
    /// # use gigscrape::config::ScrapeConfig;
    /// # use std::time::Duration;
    /// let config = ScrapeConfig::builder()
    ///     .keyword("logo design")
    ///     .render_wait(Duration::from_secs(9))
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(config.render_wait(), Duration::from_secs(9));
    /// ```
    #[must_use]
    pub fn render_wait(mut self, wait: Duration) -> Self {
        self.render_wait = Some(wait);
        self
    }

    #[must_use]
    pub fn navigation_timeout(mut self, timeout: Duration) -> Self {
        self.navigation_timeout = timeout;
        self
    }

    #[must_use]
    pub fn site_origin(mut self, origin: impl Into<String>) -> Self {
        self.site_origin = origin.into();
        self
    }

    #[must_use]
    pub fn failed_card_policy(mut self, policy: FailedCardPolicy) -> Self {
        self.failed_card_policy = policy;
        self
    }

    #[must_use]
    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    #[must_use]
    pub fn user_agent(mut self, user_agent: Option<String>) -> Self {
        self.user_agent = user_agent;
        self
    }
}
