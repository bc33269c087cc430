//! Pagination driver and run bookkeeping

pub mod pagination;
pub mod progress;
pub mod scrape_types;

pub use pagination::{scrape_and_save, scrape_keyword};
pub use progress::{NoOpProgress, ProgressReporter};
pub use scrape_types::{ScrapeError, ScrapeRun, StopReason};
