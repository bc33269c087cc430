//! Browser session owning the Chromium process for one scrape

use anyhow::{Context, Result};
use chromiumoxide::browser::Browser;
use chromiumoxide::page::Page;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::launch::{LaunchOptions, launch_browser};
use super::page_fetcher::ChromiumPageFetcher;

/// Browser, its handler task, its temporary profile and the tab used for
/// fetching
///
/// Call `shutdown` when done. Dropping without it still aborts the handler
/// and removes the profile directory, but cannot wait for the process.
pub struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
    user_data_dir: Option<PathBuf>,
    page: Page,
    user_agent: String,
    navigation_timeout: Duration,
}

impl BrowserSession {
    /// Launch a browser and open a blank tab
    pub async fn launch(options: LaunchOptions, navigation_timeout: Duration) -> Result<Self> {
        let (browser, handler, user_data_dir) = launch_browser(&options).await?;
        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                handler.abort();
                remove_profile(&user_data_dir);
                return Err(e).context("Failed to open browser tab");
            }
        };
        info!(user_agent = %options.user_agent, "browser session ready");

        Ok(Self {
            browser,
            handler,
            user_data_dir: Some(user_data_dir),
            page,
            user_agent: options.user_agent,
            navigation_timeout,
        })
    }

    /// Page fetcher driving this session's tab
    #[must_use]
    pub fn fetcher(&self) -> ChromiumPageFetcher {
        ChromiumPageFetcher::new(self.page.clone(), self.navigation_timeout)
    }

    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Close the browser, wait for it to exit, stop the handler and remove
    /// the temporary profile
    pub async fn shutdown(mut self) -> Result<()> {
        info!("Shutting down browser session");
        if let Err(e) = self.browser.close().await {
            warn!("Failed to close browser cleanly: {}", e);
        }
        if let Err(e) = self.browser.wait().await {
            warn!("Failed to wait for browser exit: {}", e);
        }
        self.handler.abort();
        if let Some(dir) = self.user_data_dir.take() {
            remove_profile(&dir);
        }
        Ok(())
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        self.handler.abort();
        if let Some(dir) = self.user_data_dir.take() {
            warn!("BrowserSession dropped without shutdown - removing profile in Drop");
            remove_profile(&dir);
        }
    }
}

/// Must run after the browser exited; Chrome holds the profile open
fn remove_profile(dir: &Path) {
    info!("Cleaning up temp directory: {}", dir.display());
    if let Err(e) = std::fs::remove_dir_all(dir) {
        warn!(
            "Failed to clean up temp directory {}: {}. Manual cleanup may be required.",
            dir.display(),
            e
        );
    }
}
