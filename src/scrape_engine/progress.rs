//! Progress reporting abstraction for scrape runs
//!
//! Defines the `ProgressReporter` trait for page-level lifecycle events
//! and provides a no-op implementation for simple use cases.

use std::time::Duration;

use super::scrape_types::StopReason;

/// Trait for reporting scrape progress at key lifecycle events
///
/// Implementations can send updates to channels, log to console, update UI, etc.
pub trait ProgressReporter: Send + Sync {
    /// Report that fetching of a results page has started
    fn report_page_started(&self, page: u32, url: &str);

    /// Report that a page was fetched and parsed
    fn report_page_parsed(&self, page: u32, records: usize);

    /// Report the polite pause before the next page
    fn report_delay(&self, page: u32, delay: Duration);

    /// Report why pagination ended
    fn report_stopped(&self, reason: &StopReason);

    /// Report an error that ended pagination or saving
    fn report_error(&self, error: &str);
}

/// Progress reporter that does nothing
#[derive(Debug, Clone, Copy)]
pub struct NoOpProgress;

impl ProgressReporter for NoOpProgress {
    #[inline(always)]
    fn report_page_started(&self, _page: u32, _url: &str) {}

    #[inline(always)]
    fn report_page_parsed(&self, _page: u32, _records: usize) {}

    #[inline(always)]
    fn report_delay(&self, _page: u32, _delay: Duration) {}

    #[inline(always)]
    fn report_stopped(&self, _reason: &StopReason) {}

    #[inline(always)]
    fn report_error(&self, _error: &str) {}
}
