use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::path::PathBuf;
use tokio::time::timeout;

use super::BLOCKING_WRITE_TIMEOUT;
use crate::listing_extractor::ListingRecord;

/// Pretty-print records with a 4-space indent, non-ASCII kept as-is
pub fn to_json_string(records: &[ListingRecord]) -> Result<String> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    records.serialize(&mut serializer)?;
    Ok(String::from_utf8(buf)?)
}

/// Save records as JSON
pub async fn save_json(path: PathBuf, records: Vec<ListingRecord>) -> Result<()> {
    // JSON serialization (keep spawn_blocking - CPU intensive)
    let blocking_task = tokio::task::spawn_blocking(move || to_json_string(&records));

    let json_str = match timeout(BLOCKING_WRITE_TIMEOUT, blocking_task).await {
        Ok(Ok(result)) => result?,
        Ok(Err(e)) => return Err(anyhow::anyhow!("JSON serialization task panicked: {}", e)),
        Err(_) => {
            tracing::warn!("JSON serialization timeout (timeout: {:?})", BLOCKING_WRITE_TIMEOUT);
            return Err(anyhow::anyhow!(
                "JSON serialization timed out after {:?}",
                BLOCKING_WRITE_TIMEOUT
            ));
        }
    };

    tokio::fs::write(&path, json_str)
        .await
        .with_context(|| format!("cannot write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uses_four_space_indent_and_keeps_unicode() {
        let record = ListingRecord {
            title: Some("Je vais créer votre site".into()),
            ..ListingRecord::default()
        };
        let json = to_json_string(&[record]).unwrap();
        assert!(json.contains("\n    {\n        \"title\": \"Je vais créer votre site\""));
        assert!(json.contains("\"seller_country\": \"N/A\""));
    }
}
