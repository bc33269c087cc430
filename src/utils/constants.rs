//! Shared constants for gigscrape
//!
//! Default values for the configuration surface and the fixed facts about the
//! target marketplace (origin, search path, "no results" marker phrases).

use std::time::Duration;

/// Canonical origin prepended to root-relative listing links
pub const SITE_ORIGIN: &str = "https://www.fiverr.com";

/// Path of the search results page, relative to the site origin
pub const SEARCH_PATH: &str = "/search/gigs";

/// Phrases whose presence in a rendered page means "nothing to parse here".
///
/// The first is the site's generic error page, the second its empty-search page.
pub const EMPTY_RESULT_MARKERS: [&str; 2] = [
    "Hmm, something seems to have gone wrong",
    "No services found for your search",
];

/// Literal carried by every field of a placeholder record for a failed card
pub const ERROR_MARKER: &str = "Error";

/// Sentinel for values the page did not expose (seller country, seller level)
pub const NOT_AVAILABLE: &str = "N/A";

/// Canonical zero for review counts
pub const ZERO_REVIEWS: &str = "0";

pub const DEFAULT_MAX_PAGES: u32 = 2;

pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;

pub const DEFAULT_BACKOFF_MIN: Duration = Duration::from_secs(2);

pub const DEFAULT_BACKOFF_MAX: Duration = Duration::from_secs(6);

/// Politeness delay between two consecutive search pages
pub const DEFAULT_INTER_PAGE_DELAY_MIN: Duration = Duration::from_secs(5);

pub const DEFAULT_INTER_PAGE_DELAY_MAX: Duration = Duration::from_secs(10);

/// Range the post-navigation render wait is sampled from (once per config)
pub const DEFAULT_RENDER_WAIT_MIN: Duration = Duration::from_secs(8);

pub const DEFAULT_RENDER_WAIT_MAX: Duration = Duration::from_secs(12);

/// Upper bound for a single `navigate` call, enforced by the page fetcher
pub const DEFAULT_NAVIGATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Cards larger than this are treated as broken markup rather than parsed
///
/// A real listing card is a few KB; anything this large means a selector
/// matched a page-level wrapper.
pub const MAX_FRAGMENT_BYTES: usize = 512 * 1024;

/// Default keyword used by the binary when none is given
pub const DEFAULT_KEYWORD: &str = "python developer";

pub const DEFAULT_OUTPUT_DIR: &str = "output";

pub const DEFAULT_BASE_FILENAME: &str = "fiverr_gigs";

/// Desktop user agents; one is picked at random per browser session
pub const USER_AGENTS: [&str; 7] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.6834.160 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.6834.160 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.6778.205 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.6778.205 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.6778.205 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/18.2 Safari/605.1.15",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:134.0) Gecko/20100101 Firefox/134.0",
];
