//! Run summary and error types for the pagination driver

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::fetch::FetchError;
use crate::listing_extractor::ListingRecord;
use crate::output::RunId;

/// Why pagination for a keyword ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// Every configured page was processed
    PageLimitReached,
    /// A page after the first yielded no records
    EndOfResults { page: u32 },
    /// A page could not be fetched, either fatally or after all retries
    FetchFailed {
        page: u32,
        attempts: u32,
        error: FetchError,
    },
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PageLimitReached => write!(f, "page limit reached"),
            Self::EndOfResults { page } => write!(f, "no results on page {page}"),
            Self::FetchFailed {
                page,
                attempts,
                error,
            } => write!(f, "page {page} failed after {attempts} attempt(s): {error}"),
        }
    }
}

/// Everything collected for one keyword
#[derive(Debug, Clone)]
pub struct ScrapeRun {
    pub run_id: RunId,
    /// Records in page order, then document order within each page
    pub records: Vec<ListingRecord>,
    /// Pages fetched successfully, including pages that had no results
    pub pages_scraped: u32,
    pub stop_reason: StopReason,
    /// Files written by the output sink; empty when nothing was saved
    pub saved: Vec<PathBuf>,
}

impl ScrapeRun {
    /// The fatal fetch failure that ended this run, if any
    #[must_use]
    pub fn fetch_failure(&self) -> Option<ScrapeError> {
        match &self.stop_reason {
            StopReason::FetchFailed {
                page,
                attempts,
                error,
            } => Some(ScrapeError::FatalFetch {
                keyword: self.run_id.keyword.clone(),
                page: *page,
                attempts: *attempts,
                source: error.clone(),
            }),
            _ => None,
        }
    }
}

/// Errors surfaced by the pagination driver
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// A page could not be fetched; pagination for the keyword stopped
    #[error("page {page} of '{keyword}' could not be fetched after {attempts} attempt(s)")]
    FatalFetch {
        keyword: String,
        page: u32,
        attempts: u32,
        #[source]
        source: FetchError,
    },

    /// The output sink rejected the collected records
    #[error("failed to save {records} records for '{keyword}'")]
    Sink {
        keyword: String,
        records: usize,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
