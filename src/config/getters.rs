//! Getter methods for `ScrapeConfig`

use std::time::Duration;

use super::types::{ConfigError, FailedCardPolicy, ScrapeConfig};

impl ScrapeConfig {
    #[must_use]
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    #[must_use]
    pub fn max_pages(&self) -> u32 {
        self.max_pages
    }

    #[must_use]
    pub fn retry_attempts(&self) -> u32 {
        self.retry_attempts
    }

    #[must_use]
    pub fn backoff_min(&self) -> Duration {
        self.backoff_min
    }

    #[must_use]
    pub fn backoff_max(&self) -> Duration {
        self.backoff_max
    }

    #[must_use]
    pub fn inter_page_delay_min(&self) -> Duration {
        self.inter_page_delay_min
    }

    #[must_use]
    pub fn inter_page_delay_max(&self) -> Duration {
        self.inter_page_delay_max
    }

    #[must_use]
    pub fn render_wait(&self) -> Duration {
        self.render_wait
    }

    #[must_use]
    pub fn navigation_timeout(&self) -> Duration {
        self.navigation_timeout
    }

    #[must_use]
    pub fn site_origin(&self) -> &str {
        &self.site_origin
    }

    #[must_use]
    pub fn failed_card_policy(&self) -> FailedCardPolicy {
        self.failed_card_policy
    }

    #[must_use]
    pub fn headless(&self) -> bool {
        self.headless
    }

    #[must_use]
    pub fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }

    /// Same configuration, different keyword; the render wait is kept
    pub fn with_keyword(&self, keyword: impl Into<String>) -> Result<Self, ConfigError> {
        let keyword = keyword.into().trim().to_string();
        if keyword.is_empty() {
            return Err(ConfigError::EmptyKeyword);
        }
        Ok(Self {
            keyword,
            ..self.clone()
        })
    }
}
