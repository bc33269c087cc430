//! `PageFetcher` backed by a chromiumoxide tab

use chromiumoxide::error::CdpError;
use chromiumoxide::page::Page;
use std::time::Duration;
use tracing::debug;

use crate::fetch::{FetchError, PageFetcher};

#[derive(Clone)]
pub struct ChromiumPageFetcher {
    page: Page,
    navigation_timeout: Duration,
}

impl ChromiumPageFetcher {
    #[must_use]
    pub fn new(page: Page, navigation_timeout: Duration) -> Self {
        Self {
            page,
            navigation_timeout,
        }
    }
}

fn driver_error(e: CdpError) -> FetchError {
    FetchError::Driver(e.to_string())
}

impl PageFetcher for ChromiumPageFetcher {
    async fn navigate(&self, url: &str) -> Result<(), FetchError> {
        debug!(url, "navigating");
        match tokio::time::timeout(self.navigation_timeout, self.page.goto(url)).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(CdpError::Timeout)) | Err(_) => Err(FetchError::Timeout {
                url: url.to_string(),
                timeout: self.navigation_timeout,
            }),
            Ok(Err(e)) => Err(driver_error(e)),
        }
    }

    async fn current_document(&self) -> Result<String, FetchError> {
        self.page.content().await.map_err(driver_error)
    }
}
