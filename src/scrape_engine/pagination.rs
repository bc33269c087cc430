//! Pagination driver
//!
//! Walks the search result pages of one keyword strictly one after the
//! other: fetch with retry, parse, append, pause, repeat. Pagination stops at
//! the page limit, on the first empty page after page 1, or on a fetch that
//! failed for good. Whatever was collected up to that point is kept.

use tracing::{Instrument, error, info, info_span};

use super::progress::ProgressReporter;
use super::scrape_types::{ScrapeError, ScrapeRun, StopReason};
use crate::config::ScrapeConfig;
use crate::fetch::{FetchError, FetchFailure, PageContent, PageFetcher, RetryPolicy, fetch_page_with_retry};
use crate::listing_extractor::{ListingExtractor, ListingRecord};
use crate::output::{OutputSink, RunId};
use crate::utils::{sample_between, search_page_url};

/// Scrape every page for `config.keyword()` and return what was collected
pub async fn scrape_keyword<F, P>(fetcher: &F, config: &ScrapeConfig, progress: &P) -> ScrapeRun
where
    F: PageFetcher,
    P: ProgressReporter,
{
    let span = info_span!("scrape", keyword = %config.keyword());
    drive_pages(fetcher, config, progress).instrument(span).await
}

/// Scrape one keyword and hand a non-empty result to `sink` exactly once
///
/// A fatal fetch failure does not make this fail: the pages collected before
/// it are still saved and the failure is recorded in `ScrapeRun::stop_reason`.
pub async fn scrape_and_save<F, S, P>(
    fetcher: &F,
    config: &ScrapeConfig,
    sink: &S,
    progress: &P,
) -> Result<ScrapeRun, ScrapeError>
where
    F: PageFetcher,
    S: OutputSink,
    P: ProgressReporter,
{
    let mut run = scrape_keyword(fetcher, config, progress).await;

    if run.records.is_empty() {
        info!(keyword = %run.run_id.keyword, "no listings collected, nothing to save");
        return Ok(run);
    }

    match sink.save(&run.run_id, &run.records).await {
        Ok(paths) => {
            info!(
                keyword = %run.run_id.keyword,
                records = run.records.len(),
                files = paths.len(),
                "listings saved"
            );
            run.saved = paths;
            Ok(run)
        }
        Err(e) => {
            progress.report_error(&format!("{e:#}"));
            Err(ScrapeError::Sink {
                keyword: run.run_id.keyword.clone(),
                records: run.records.len(),
                source: e.into(),
            })
        }
    }
}

async fn drive_pages<F, P>(fetcher: &F, config: &ScrapeConfig, progress: &P) -> ScrapeRun
where
    F: PageFetcher,
    P: ProgressReporter,
{
    let run_id = RunId::now(config.keyword());
    let extractor = ListingExtractor::new(config.site_origin());
    let policy = RetryPolicy::from_config(config);
    let max_pages = config.max_pages();

    let mut records: Vec<ListingRecord> = Vec::new();
    let mut pages_scraped = 0;
    let mut stop_reason = StopReason::PageLimitReached;

    info!(max_pages, render_wait = ?config.render_wait(), "starting scrape");

    for page in 1..=max_pages {
        let page_span = info_span!("page", page);

        let fetched = match search_page_url(config.site_origin(), config.keyword(), page) {
            Ok(url) => {
                let url = url.to_string();
                progress.report_page_started(page, &url);
                fetch_page_with_retry(fetcher, &url, config.render_wait(), policy)
                    .instrument(page_span.clone())
                    .await
            }
            Err(e) => Err(FetchFailure {
                attempts: 0,
                backoff: Vec::new(),
                source: FetchError::Unexpected(format!("cannot build search URL: {e}")),
            }),
        };

        let report = match fetched {
            Ok(report) => report,
            Err(failure) => {
                page_span.in_scope(|| {
                    error!(
                        attempts = failure.attempts,
                        error = %failure.source,
                        "page could not be fetched, stopping pagination"
                    );
                });
                progress.report_error(&failure.to_string());
                stop_reason = StopReason::FetchFailed {
                    page,
                    attempts: failure.attempts,
                    error: failure.source,
                };
                break;
            }
        };
        pages_scraped += 1;

        let page_records = page_span.in_scope(|| match report.content {
            PageContent::Document(html) => extractor
                .parse_page(&html)
                .into_records(config.failed_card_policy()),
            PageContent::Empty => Vec::new(),
        });
        let found = page_records.len();
        progress.report_page_parsed(page, found);
        records.extend(page_records);

        if found == 0 && page > 1 {
            page_span.in_scope(|| info!("no listings beyond page 1, assuming end of results"));
            stop_reason = StopReason::EndOfResults { page };
            break;
        }

        page_span.in_scope(|| info!(found, total = records.len(), "page done"));

        if page < max_pages {
            let delay = sample_between(config.inter_page_delay_min(), config.inter_page_delay_max());
            info!(next_page = page + 1, ?delay, "pausing before next page");
            progress.report_delay(page, delay);
            tokio::time::sleep(delay).await;
        }
    }

    info!(
        pages = pages_scraped,
        records = records.len(),
        reason = %stop_reason,
        "scrape finished"
    );
    progress.report_stopped(&stop_reason);

    ScrapeRun {
        run_id,
        records,
        pages_scraped,
        stop_reason,
        saved: Vec::new(),
    }
}
