//! Persisting scraped records

use std::time::Duration;

pub mod csv_saver;
pub mod json_saver;
pub mod sink;

pub use csv_saver::{CSV_HEADER, save_csv, write_csv};
pub use json_saver::{save_json, to_json_string};
pub use sink::{FileOutputSink, OutputFormat, OutputSink, RunId};

/// Upper bound on blocking serialization and file writes
const BLOCKING_WRITE_TIMEOUT: Duration = Duration::from_secs(10);
