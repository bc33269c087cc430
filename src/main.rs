//! `gigscrape` command line entry point
//!
//! Scrapes each keyword in turn with its own browser session and writes the
//! collected listings through a `FileOutputSink`.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gigscrape::browser::{BrowserSession, LaunchOptions};
use gigscrape::config::{FailedCardPolicy, ScrapeConfig};
use gigscrape::output::{FileOutputSink, OutputFormat};
use gigscrape::scrape_engine::{NoOpProgress, scrape_and_save};
use gigscrape::utils::{
    DEFAULT_BACKOFF_MAX, DEFAULT_BACKOFF_MIN, DEFAULT_BASE_FILENAME, DEFAULT_INTER_PAGE_DELAY_MAX,
    DEFAULT_INTER_PAGE_DELAY_MIN, DEFAULT_KEYWORD, DEFAULT_MAX_PAGES, DEFAULT_OUTPUT_DIR,
    DEFAULT_RETRY_ATTEMPTS,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Csv,
    Json,
    Both,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => OutputFormat::Csv,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Both => OutputFormat::Both,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "gigscrape",
    version,
    about = "Scrape marketplace search result listings into CSV and JSON"
)]
struct Cli {
    /// Search keywords, scraped one after the other
    #[arg(value_name = "KEYWORD", default_values_t = [DEFAULT_KEYWORD.to_string()])]
    keywords: Vec<String>,

    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_PAGES)]
    max_pages: u32,

    #[arg(long, value_name = "N", default_value_t = DEFAULT_RETRY_ATTEMPTS)]
    retry_attempts: u32,

    /// Minimum wait between retries, in seconds
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_BACKOFF_MIN.as_secs_f64())]
    backoff_min: f64,

    /// Maximum wait between retries, in seconds
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_BACKOFF_MAX.as_secs_f64())]
    backoff_max: f64,

    /// Minimum pause between pages, in seconds
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_INTER_PAGE_DELAY_MIN.as_secs_f64())]
    delay_min: f64,

    /// Maximum pause between pages, in seconds
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_INTER_PAGE_DELAY_MAX.as_secs_f64())]
    delay_max: f64,

    /// Fixed render wait after navigation, in seconds (random 8-12 s when omitted)
    #[arg(long, value_name = "SECS")]
    render_wait: Option<f64>,

    #[arg(short, long, value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// File name prefix for saved results
    #[arg(long, value_name = "NAME", default_value = DEFAULT_BASE_FILENAME)]
    base_name: String,

    #[arg(long, value_enum, default_value_t = FormatArg::Both)]
    format: FormatArg,

    /// Leave unparseable cards out instead of writing placeholder rows
    #[arg(long, action = ArgAction::SetTrue)]
    drop_failed_cards: bool,

    /// Show the browser window
    #[arg(long, action = ArgAction::SetTrue)]
    headed: bool,

    /// Fixed user agent (random per session when omitted)
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,
}

/// Seconds given on the command line as a `Duration`
fn seconds(flag: &str, secs: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(secs).with_context(|| format!("--{flag} {secs} is not a valid duration"))
}

impl Cli {
    fn base_config(&self, keyword: &str) -> Result<ScrapeConfig> {
        let mut builder = ScrapeConfig::builder()
            .keyword(keyword)
            .max_pages(self.max_pages)
            .retry_attempts(self.retry_attempts)
            .backoff(
                seconds("backoff-min", self.backoff_min)?,
                seconds("backoff-max", self.backoff_max)?,
            )
            .inter_page_delay(
                seconds("delay-min", self.delay_min)?,
                seconds("delay-max", self.delay_max)?,
            )
            .headless(!self.headed)
            .user_agent(self.user_agent.clone())
            .failed_card_policy(if self.drop_failed_cards {
                FailedCardPolicy::Drop
            } else {
                FailedCardPolicy::KeepPlaceholder
            });
        if let Some(wait) = self.render_wait {
            builder = builder.render_wait(seconds("render-wait", wait)?);
        }
        builder.build().context("invalid configuration")
    }
}

/// Per-keyword config derived from `base`, or `None` (logged) when the keyword is invalid
fn keyword_config(base: &ScrapeConfig, keyword: &str) -> Option<ScrapeConfig> {
    match base.with_keyword(keyword) {
        Ok(config) => Some(config),
        Err(e) => {
            error!(keyword = %keyword, "skipping keyword: {e}");
            None
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
                .add_directive("chromiumoxide::handler=off".parse()?)
                .add_directive("chromiumoxide::conn=off".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    let first = cli
        .keywords
        .first()
        .map_or(DEFAULT_KEYWORD, String::as_str);
    let base = cli.base_config(first)?;

    let sink = FileOutputSink::new(&cli.output_dir)
        .with_base_name(&cli.base_name)
        .with_format(cli.format.into());
    sink.ensure_dir().await?;

    info!(
        keywords = cli.keywords.len(),
        max_pages = base.max_pages(),
        render_wait = ?base.render_wait(),
        "starting"
    );

    let mut failures = 0usize;
    for keyword in &cli.keywords {
        let Some(config) = keyword_config(&base, keyword) else {
            failures += 1;
            continue;
        };

        let session = BrowserSession::launch(
            LaunchOptions::from_config(&config),
            config.navigation_timeout(),
        )
        .await
        .context("Failed to start browser session")?;

        let fetcher = session.fetcher();
        let outcome = scrape_and_save(&fetcher, &config, &sink, &NoOpProgress).await;

        if let Err(e) = session.shutdown().await {
            warn!("browser shutdown failed: {e:#}");
        }

        match outcome {
            Ok(run) => {
                if let Some(failure) = run.fetch_failure() {
                    warn!(error = %failure, "pagination stopped early");
                }
                info!(
                    keyword = %keyword,
                    records = run.records.len(),
                    pages = run.pages_scraped,
                    stop = %run.stop_reason,
                    files = ?run.saved,
                    "keyword done"
                );
            }
            Err(e) => {
                error!(keyword = %keyword, "{:#}", anyhow::Error::new(e));
                failures += 1;
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} keyword(s) were skipped or could not be saved");
    }
    Ok(())
}
