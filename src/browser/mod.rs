//! Headless Chromium behind the `PageFetcher` capability

pub mod launch;
pub mod page_fetcher;
pub mod session;

pub use launch::{LaunchOptions, download_managed_browser, find_browser_executable, launch_browser, random_user_agent};
pub use page_fetcher::ChromiumPageFetcher;
pub use session::BrowserSession;
