//! Output sink abstraction and run identifiers

use chrono::{DateTime, Local};
use std::future::Future;
use std::path::{Path, PathBuf};
use tracing::info;

use super::csv_saver::save_csv;
use super::json_saver::save_json;
use crate::listing_extractor::ListingRecord;
use crate::utils::{DEFAULT_BASE_FILENAME, DEFAULT_OUTPUT_DIR};

/// Identifies one scrape run: the keyword and when the run started
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunId {
    pub keyword: String,
    pub started_at: DateTime<Local>,
}

impl RunId {
    #[must_use]
    pub fn new(keyword: impl Into<String>, started_at: DateTime<Local>) -> Self {
        Self {
            keyword: keyword.into(),
            started_at,
        }
    }

    /// Run starting now
    #[must_use]
    pub fn now(keyword: impl Into<String>) -> Self {
        Self::new(keyword, Local::now())
    }

    /// `<base>_<keyword>_<YYYYmmdd_HHMMSS>`, keyword lower-cased with spaces
    /// replaced by underscores
    #[must_use]
    pub fn file_stem(&self, base: &str) -> String {
        format!(
            "{}_{}_{}",
            base,
            self.keyword.to_lowercase().replace(' ', "_"),
            self.started_at.format("%Y%m%d_%H%M%S")
        )
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}' @ {}", self.keyword, self.started_at.format("%Y-%m-%d %H:%M:%S"))
    }
}

/// Destination for the records of a finished run
///
/// Called at most once per run, with every record collected, and never with
/// an empty slice.
pub trait OutputSink: Send + Sync {
    /// Persist `records`, returning the files written
    fn save(
        &self,
        run_id: &RunId,
        records: &[ListingRecord],
    ) -> impl Future<Output = anyhow::Result<Vec<PathBuf>>> + Send;
}

/// Which files a `FileOutputSink` writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    Csv,
    Json,
    #[default]
    Both,
}

impl OutputFormat {
    fn writes_csv(self) -> bool {
        matches!(self, Self::Csv | Self::Both)
    }

    fn writes_json(self) -> bool {
        matches!(self, Self::Json | Self::Both)
    }
}

/// Writes CSV and/or JSON files named after the run into a directory
#[derive(Debug, Clone)]
pub struct FileOutputSink {
    dir: PathBuf,
    base_name: String,
    format: OutputFormat,
}

impl Default for FileOutputSink {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_DIR)
    }
}

impl FileOutputSink {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            base_name: DEFAULT_BASE_FILENAME.to_string(),
            format: OutputFormat::default(),
        }
    }

    #[must_use]
    pub fn with_base_name(mut self, base_name: impl Into<String>) -> Self {
        self.base_name = base_name.into();
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the output directory if it does not exist yet
    pub async fn ensure_dir(&self) -> anyhow::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            anyhow::anyhow!("cannot create output directory {}: {}", self.dir.display(), e)
        })
    }
}

impl OutputSink for FileOutputSink {
    async fn save(&self, run_id: &RunId, records: &[ListingRecord]) -> anyhow::Result<Vec<PathBuf>> {
        self.ensure_dir().await?;
        let stem = run_id.file_stem(&self.base_name);
        let mut written = Vec::new();

        if self.format.writes_csv() {
            let path = self.dir.join(format!("{stem}.csv"));
            save_csv(path.clone(), records.to_vec()).await?;
            info!(path = %path.display(), records = records.len(), "saved CSV");
            written.push(path);
        }

        if self.format.writes_json() {
            let path = self.dir.join(format!("{stem}.json"));
            save_json(path.clone(), records.to_vec()).await?;
            info!(path = %path.display(), records = records.len(), "saved JSON");
            written.push(path);
        }

        Ok(written)
    }
}
