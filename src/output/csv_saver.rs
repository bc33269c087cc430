use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::time::timeout;

use super::BLOCKING_WRITE_TIMEOUT;
use crate::listing_extractor::ListingRecord;

/// Column order of the CSV output
pub const CSV_HEADER: [&str; 8] = [
    "title",
    "seller_name",
    "seller_level",
    "seller_country",
    "price",
    "rating",
    "num_reviews",
    "listing_url",
];

/// Write `records` to `path` as CSV; absent values become empty cells
pub fn write_csv(path: &Path, records: &[ListingRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("cannot create {}", path.display()))?;
    writer.write_record(CSV_HEADER)?;
    for record in records {
        let cell = |value: &Option<String>| value.clone().unwrap_or_default();
        writer.write_record([
            cell(&record.title),
            cell(&record.seller_name),
            cell(&record.seller_level),
            record.seller_country.clone(),
            cell(&record.price),
            cell(&record.rating),
            record.num_reviews.clone(),
            cell(&record.listing_url),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Save records as CSV without blocking the runtime
pub async fn save_csv(path: PathBuf, records: Vec<ListingRecord>) -> Result<()> {
    let blocking_task = tokio::task::spawn_blocking(move || write_csv(&path, &records));

    match timeout(BLOCKING_WRITE_TIMEOUT, blocking_task).await {
        Ok(Ok(result)) => result,
        Ok(Err(e)) => Err(anyhow::anyhow!("CSV write task panicked: {}", e)),
        Err(_) => {
            tracing::warn!("CSV write timeout (timeout: {:?})", BLOCKING_WRITE_TIMEOUT);
            Err(anyhow::anyhow!(
                "CSV write timed out after {:?}",
                BLOCKING_WRITE_TIMEOUT
            ))
        }
    }
}
