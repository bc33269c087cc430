//! Fetch-with-retry controller
//!
//! `fetch_once` performs and classifies a single attempt; `fetch_page_with_retry`
//! drives attempts under a `RetryPolicy`.

pub mod fetcher;
pub mod outcome;
pub mod retry;

pub use fetcher::{FetchError, PageFetcher};
pub use outcome::{FetchOutcome, fetch_once};
pub use retry::{FetchFailure, FetchReport, PageContent, RetryPolicy, fetch_page_with_retry};
