//! Single fetch attempt and its classification

use std::time::Duration;
use tracing::{debug, trace};

use super::fetcher::{FetchError, PageFetcher};
use crate::utils::EMPTY_RESULT_MARKERS;

/// What one fetch attempt produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Rendered markup ready for the page parser
    Content(String),
    /// The site reported no results or an error page
    EmptyResult,
    TransientFailure(FetchError),
    FatalFailure(FetchError),
}

impl FetchOutcome {
    /// Sort a fetcher error into the transient or fatal bucket
    #[must_use]
    pub fn from_error(error: FetchError) -> Self {
        if error.is_transient() {
            Self::TransientFailure(error)
        } else {
            Self::FatalFailure(error)
        }
    }

    /// Classify successfully retrieved markup
    #[must_use]
    pub fn from_document(html: String) -> Self {
        match EMPTY_RESULT_MARKERS.iter().find(|marker| html.contains(*marker)) {
            Some(marker) => {
                debug!(marker, "page carries an empty-result marker");
                Self::EmptyResult
            }
            None => Self::Content(html),
        }
    }
}

/// Navigate, give the page `render_wait` to run its scripts, then read it
pub async fn fetch_once<F: PageFetcher>(fetcher: &F, url: &str, render_wait: Duration) -> FetchOutcome {
    if let Err(e) = fetcher.navigate(url).await {
        return FetchOutcome::from_error(e);
    }

    trace!(?render_wait, "waiting for page to render");
    tokio::time::sleep(render_wait).await;

    match fetcher.current_document().await {
        Ok(html) => FetchOutcome::from_document(html),
        Err(e) => FetchOutcome::from_error(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_phrases_short_circuit_to_empty() {
        let html = "<html><body><h2>No services found for your search</h2></body></html>";
        assert_eq!(FetchOutcome::from_document(html.into()), FetchOutcome::EmptyResult);

        let html = "<p>Hmm, something seems to have gone wrong</p>";
        assert_eq!(FetchOutcome::from_document(html.into()), FetchOutcome::EmptyResult);
    }

    #[test]
    fn ordinary_markup_is_content() {
        let html = "<div class=\"gig-card\">x</div>".to_string();
        assert_eq!(FetchOutcome::from_document(html.clone()), FetchOutcome::Content(html));
    }
}
