//! Resilient listing extraction from JavaScript-rendered marketplace search pages
//!
//! The pipeline, leaves first: field cleaners and tiered locator chains
//! (`listing_extractor`), a fetch controller that retries transient failures
//! (`fetch`), and the pagination driver that binds them (`scrape_engine`).
//! `browser` provides the Chromium-backed page fetcher and `output` the
//! CSV/JSON sink.

pub mod browser;
pub mod config;
pub mod fetch;
pub mod listing_extractor;
pub mod output;
pub mod scrape_engine;
pub mod utils;

pub use config::{ConfigError, FailedCardPolicy, ScrapeConfig};
pub use fetch::{FetchError, FetchOutcome, PageFetcher, RetryPolicy, fetch_page_with_retry};
pub use listing_extractor::{
    ListingExtractor, ListingRecord, PageResult, ParseOutcome, clean_price, clean_rating,
    clean_reviews, parse_page,
};
pub use output::{FileOutputSink, OutputFormat, OutputSink, RunId};
pub use scrape_engine::{
    NoOpProgress, ProgressReporter, ScrapeError, ScrapeRun, StopReason, scrape_and_save,
    scrape_keyword,
};
