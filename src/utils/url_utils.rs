//! URL helpers for search pages and listing links

use url::Url;

use super::constants::SEARCH_PATH;

/// How a raw listing href was turned into a stored URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingUrl {
    /// Root-relative path, origin prepended, query stripped
    Relative(String),
    /// Absolute http(s) URL, query stripped
    Absolute(String),
    /// Neither form; stored verbatim
    Unrecognized(String),
}

impl ListingUrl {
    #[must_use]
    pub fn into_string(self) -> String {
        match self {
            Self::Relative(url) | Self::Absolute(url) | Self::Unrecognized(url) => url,
        }
    }

    #[must_use]
    pub fn is_unrecognized(&self) -> bool {
        matches!(self, Self::Unrecognized(_))
    }
}

/// Build the search results URL for `keyword` and 1-based `page`
///
/// Page 1 carries only the query; later pages add `page=<n>`.
pub fn search_page_url(origin: &str, keyword: &str, page: u32) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(origin)?.join(SEARCH_PATH)?;
    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("query", keyword);
        if page > 1 {
            pairs.append_pair("page", &page.to_string());
        }
    }
    Ok(url)
}

/// Normalize a listing href against the site origin
///
/// Query strings (tracking parameters such as `?source=...`) are dropped from
/// both recognized forms.
#[must_use]
pub fn normalize_listing_url(raw: &str, origin: &str) -> ListingUrl {
    let raw = raw.trim();
    if raw.starts_with('/') {
        ListingUrl::Relative(format!(
            "{}{}",
            origin.trim_end_matches('/'),
            strip_query(raw)
        ))
    } else if raw.starts_with("http") {
        ListingUrl::Absolute(strip_query(raw).to_string())
    } else {
        ListingUrl::Unrecognized(raw.to_string())
    }
}

fn strip_query(url: &str) -> &str {
    url.split_once('?').map_or(url, |(head, _)| head)
}
