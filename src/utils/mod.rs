pub mod constants;
pub mod timing;
pub mod url_utils;

pub use constants::*;
pub use timing::sample_between;
pub use url_utils::{ListingUrl, normalize_listing_url, search_page_url};
