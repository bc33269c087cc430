//! Test utilities and helper functions for the gigscrape test suite

use gigscrape::fetch::{FetchError, PageFetcher};
use gigscrape::listing_extractor::{CardPosition, ListingExtractor, ParseOutcome};
use gigscrape::output::{OutputSink, RunId};
use gigscrape::scrape_engine::{ProgressReporter, StopReason};
use gigscrape::ListingRecord;
use scraper::Html;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

#[allow(dead_code)]
pub const ORIGIN: &str = "https://www.fiverr.com";

/// Parts of a listing card; absent parts are left out of the markup
#[allow(dead_code)]
#[derive(Debug, Clone, Default)]
pub struct CardFixture<'a> {
    pub title: Option<&'a str>,
    pub href: Option<&'a str>,
    pub seller: Option<&'a str>,
    pub level: Option<&'a str>,
    pub country: Option<&'a str>,
    pub price: Option<&'a str>,
    pub rating: Option<&'a str>,
    pub reviews: Option<&'a str>,
}

#[allow(dead_code)]
impl<'a> CardFixture<'a> {
    /// A card with every field present, in the current markup
    pub fn complete() -> Self {
        Self {
            title: Some("I will build your python API"),
            href: Some("/alice/build-python-api?context_referrer=search&pos=1"),
            seller: Some("alice"),
            level: Some("Level 2"),
            country: Some("From United States"),
            price: Some("From $10.50"),
            rating: Some("4.9"),
            reviews: Some("(1.2k)"),
        }
    }

    pub fn titled(title: &'a str) -> Self {
        Self {
            title: Some(title),
            href: Some("/gigs/listing"),
            ..Self::default()
        }
    }

    /// Markup using `data-testid` attributes
    pub fn to_html(&self) -> String {
        let mut html = String::from(r#"<div data-testid="gig-card-layout">"#);

        if self.seller.is_some() || self.level.is_some() || self.country.is_some() {
            html.push_str(r#"<div class="seller-info">"#);
            if let Some(seller) = self.seller {
                html.push_str(&format!(
                    r#"<a data-testid="seller-name" href="/users/{0}">{0}</a>"#,
                    text(seller)
                ));
            }
            if let Some(level) = self.level {
                html.push_str(&format!(r#"<span data-testid="seller-level">{}</span>"#, text(level)));
            }
            if let Some(country) = self.country {
                html.push_str(&format!(r#"<span class="seller-country">{}</span>"#, text(country)));
            }
            html.push_str("</div>");
        }

        if let Some(title) = self.title {
            let href = self.href.unwrap_or("/gigs/listing");
            html.push_str(&format!(
                r#"<h3><a data-testid="gig-title" href="{}">{}</a></h3>"#,
                attr(href),
                text(title)
            ));
        }

        if self.rating.is_some() || self.reviews.is_some() {
            html.push_str(r#"<div data-testid="gig-rating">"#);
            if let Some(rating) = self.rating {
                html.push_str(&format!(
                    r#"<span data-testid="star-rating-score">{}</span>"#,
                    text(rating)
                ));
            }
            if let Some(reviews) = self.reviews {
                html.push_str(&format!(r#"<span data-testid="review-count">{}</span>"#, text(reviews)));
            }
            html.push_str("</div>");
        }

        if let Some(price) = self.price {
            html.push_str(&format!(r#"<span data-testid="price">{}</span>"#, text(price)));
        }

        html.push_str("</div>");
        html
    }
}

#[allow(dead_code)]
fn text(s: &str) -> String {
    html_escape::encode_text(s).into_owned()
}

#[allow(dead_code)]
fn attr(s: &str) -> String {
    html_escape::encode_double_quoted_attribute(s).into_owned()
}

/// Full search results document wrapping `cards`
#[allow(dead_code)]
pub fn results_page(cards: &[String]) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><title>Results</title></head>
<body>
  <header><a href="/gigs/not-a-card">Promoted</a></header>
  <div class="listings">{}</div>
</body>
</html>"#,
        cards.concat()
    )
}

/// Results page with one card per title
#[allow(dead_code)]
pub fn page_with_titles(titles: &[&str]) -> String {
    let cards: Vec<String> = titles
        .iter()
        .map(|t| CardFixture::titled(t).to_html())
        .collect();
    results_page(&cards)
}

/// Run the extractor over the first card located in `html`
#[allow(dead_code)]
pub fn extract_first(html: &str) -> ParseOutcome {
    let extractor = ListingExtractor::new(ORIGIN);
    let document = Html::parse_document(html);
    let cards = extractor.locate_cards(&document);
    assert!(!cards.is_empty(), "fixture contains no card");
    extractor.extract_card(cards[0], CardPosition { index: 0, total: cards.len() })
}

/// Record from the first card, panicking if it failed
#[allow(dead_code)]
pub fn record_of(card_html: &str) -> ListingRecord {
    match extract_first(&results_page(&[card_html.to_string()])) {
        ParseOutcome::Parsed(record) => record,
        other => panic!("expected a parsed record, got {other:?}"),
    }
}

/// One scripted reaction of the mock fetcher to a `navigate` call
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub enum Scripted {
    Html(String),
    NavigateError(FetchError),
    ReadError(FetchError),
}

#[allow(dead_code)]
pub fn timeout_error() -> FetchError {
    FetchError::Timeout {
        url: "https://www.fiverr.com/search/gigs".into(),
        timeout: Duration::from_secs(30),
    }
}

/// In-memory page fetcher replaying a script, one entry per navigation
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct MockFetcher {
    script: Mutex<VecDeque<Scripted>>,
    current: Mutex<Option<Scripted>>,
    navigations: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl MockFetcher {
    pub fn new(script: impl IntoIterator<Item = Scripted>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            ..Self::default()
        }
    }

    pub fn navigations(&self) -> Vec<String> {
        self.navigations.lock().unwrap().clone()
    }

    pub fn navigation_count(&self) -> usize {
        self.navigations.lock().unwrap().len()
    }
}

impl PageFetcher for MockFetcher {
    async fn navigate(&self, url: &str) -> Result<(), FetchError> {
        self.navigations.lock().unwrap().push(url.to_string());
        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Scripted::NavigateError(e)) => Err(e),
            Some(step) => {
                *self.current.lock().unwrap() = Some(step);
                Ok(())
            }
            None => Err(FetchError::Unexpected("mock script exhausted".into())),
        }
    }

    async fn current_document(&self) -> Result<String, FetchError> {
        match self.current.lock().unwrap().clone() {
            Some(Scripted::Html(html)) => Ok(html),
            Some(Scripted::ReadError(e)) => Err(e),
            _ => Ok(String::new()),
        }
    }
}

/// Output sink remembering every call
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub calls: Mutex<Vec<(RunId, Vec<ListingRecord>)>>,
    pub fail: bool,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn saved_records(&self) -> Vec<ListingRecord> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .flat_map(|(_, records)| records.clone())
            .collect()
    }
}

impl OutputSink for RecordingSink {
    async fn save(&self, run_id: &RunId, records: &[ListingRecord]) -> anyhow::Result<Vec<PathBuf>> {
        self.calls
            .lock()
            .unwrap()
            .push((run_id.clone(), records.to_vec()));
        if self.fail {
            anyhow::bail!("disk full");
        }
        Ok(vec![PathBuf::from(format!("{}.csv", run_id.file_stem("test")))])
    }
}

/// Progress reporter collecting events as strings
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct RecordingProgress {
    pub events: Mutex<Vec<String>>,
    pub delays: Mutex<Vec<Duration>>,
}

#[allow(dead_code)]
impl RecordingProgress {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    pub fn delays(&self) -> Vec<Duration> {
        self.delays.lock().unwrap().clone()
    }
}

impl ProgressReporter for RecordingProgress {
    fn report_page_started(&self, page: u32, _url: &str) {
        self.events.lock().unwrap().push(format!("started {page}"));
    }

    fn report_page_parsed(&self, page: u32, records: usize) {
        self.events
            .lock()
            .unwrap()
            .push(format!("parsed {page}: {records}"));
    }

    fn report_delay(&self, _page: u32, delay: Duration) {
        self.delays.lock().unwrap().push(delay);
    }

    fn report_stopped(&self, reason: &StopReason) {
        self.events.lock().unwrap().push(format!("stopped: {reason}"));
    }

    fn report_error(&self, error: &str) {
        self.events.lock().unwrap().push(format!("error: {error}"));
    }
}
