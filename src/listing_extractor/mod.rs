//! Listing extraction from rendered search result pages
//!
//! Field cleaners, tiered locator chains, the per-card extractor and the page
//! parser that ties them together.

pub mod card;
pub mod cleaners;
pub mod locators;
pub mod page;
pub mod schema;

pub use card::ListingExtractor;
pub use cleaners::{clean_price, clean_rating, clean_reviews};
pub use locators::{CardLocators, LocatorChain, LocatorError, LocatorMatch, PageLocators, element_text};
pub use page::parse_page;
pub use schema::{CardError, CardPosition, ListingRecord, PageResult, ParseOutcome};
