//! Data structures produced by the listing extractor

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::config::FailedCardPolicy;
use crate::utils::{ERROR_MARKER, NOT_AVAILABLE, ZERO_REVIEWS};

/// One listing as shown on a search results page
///
/// `seller_country` and `num_reviews` always carry a value (`"N/A"` and `"0"`
/// when the card does not expose them); every other field may be absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub title: Option<String>,
    pub seller_name: Option<String>,
    pub seller_level: Option<String>,
    pub seller_country: String,
    pub price: Option<String>,
    pub rating: Option<String>,
    pub num_reviews: String,
    pub listing_url: Option<String>,
}

impl Default for ListingRecord {
    fn default() -> Self {
        Self {
            title: None,
            seller_name: None,
            seller_level: None,
            seller_country: NOT_AVAILABLE.to_string(),
            price: None,
            rating: None,
            num_reviews: ZERO_REVIEWS.to_string(),
            listing_url: None,
        }
    }
}

impl ListingRecord {
    /// Placeholder standing in for a card that could not be parsed
    ///
    /// Every field carries the literal `"Error"` marker.
    #[must_use]
    pub fn error_placeholder() -> Self {
        let marker = || Some(ERROR_MARKER.to_string());
        Self {
            title: marker(),
            seller_name: marker(),
            seller_level: marker(),
            seller_country: ERROR_MARKER.to_string(),
            price: marker(),
            rating: marker(),
            num_reviews: ERROR_MARKER.to_string(),
            listing_url: marker(),
        }
    }

    #[must_use]
    pub fn is_error_placeholder(&self) -> bool {
        *self == Self::error_placeholder()
    }
}

/// Failure affecting a whole card rather than a single field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardError {
    #[error("card fragment has no text and no child elements")]
    EmptyFragment,

    #[error("card fragment is {bytes} bytes, above the {limit} byte limit")]
    Oversized { bytes: usize, limit: usize },
}

/// Result of running the card extractor over one fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    Parsed(ListingRecord),
    Failed { index: usize, reason: CardError },
}

impl ParseOutcome {
    #[must_use]
    pub fn record(&self) -> Option<&ListingRecord> {
        match self {
            Self::Parsed(record) => Some(record),
            Self::Failed { .. } => None,
        }
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Resolve into a record according to `policy`
    #[must_use]
    pub fn into_record(self, policy: FailedCardPolicy) -> Option<ListingRecord> {
        match (self, policy) {
            (Self::Parsed(record), _) => Some(record),
            (Self::Failed { .. }, FailedCardPolicy::KeepPlaceholder) => {
                Some(ListingRecord::error_placeholder())
            }
            (Self::Failed { .. }, FailedCardPolicy::Drop) => None,
        }
    }
}

/// Position of a card within its page, for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardPosition {
    /// 0-based index in document order
    pub index: usize,
    pub total: usize,
}

impl fmt::Display for CardPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "card {}/{}", self.index + 1, self.total)
    }
}

/// Everything the page parser learned from one document
///
/// `fragments_located == 0` is the "no fragments located" signal; a page with
/// fragments whose outcomes are all `Failed` is "fragments found, zero parsed".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageResult {
    pub fragments_located: usize,
    pub outcomes: Vec<ParseOutcome>,
}

impl PageResult {
    #[must_use]
    pub fn new(fragments_located: usize, outcomes: Vec<ParseOutcome>) -> Self {
        Self {
            fragments_located,
            outcomes,
        }
    }

    /// Result for a page where no card could be located
    #[must_use]
    pub fn no_fragments() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_no_fragments(&self) -> bool {
        self.fragments_located == 0
    }

    #[must_use]
    pub fn parsed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_failed()).count()
    }

    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failed()).count()
    }

    /// Fragments were found but none produced a record
    #[must_use]
    pub fn is_all_failed(&self) -> bool {
        self.fragments_located > 0 && self.parsed_count() == 0
    }

    /// Records in document order, failed cards resolved by `policy`
    #[must_use]
    pub fn into_records(self, policy: FailedCardPolicy) -> Vec<ListingRecord> {
        self.outcomes
            .into_iter()
            .filter_map(|outcome| outcome.into_record(policy))
            .collect()
    }
}
