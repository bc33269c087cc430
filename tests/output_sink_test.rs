//! File output sink: naming, CSV layout and JSON formatting

use chrono::{Local, TimeZone};
use gigscrape::listing_extractor::ListingRecord;
use gigscrape::output::{CSV_HEADER, FileOutputSink, OutputFormat, OutputSink, RunId};
use tempfile::TempDir;

fn run_id() -> RunId {
    RunId::new("Python Developer", Local.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap())
}

fn records() -> Vec<ListingRecord> {
    vec![
        ListingRecord {
            title: Some("I will write a \"fast\", safe parser".into()),
            seller_name: Some("zoë".into()),
            seller_level: Some("Level 1".into()),
            seller_country: "Österreich".into(),
            price: Some("25".into()),
            rating: Some("5.0".into()),
            num_reviews: "12".into(),
            listing_url: Some("https://www.fiverr.com/zoe/parser".into()),
        },
        ListingRecord::default(),
        ListingRecord::error_placeholder(),
    ]
}

#[tokio::test]
async fn test_writes_csv_and_json_named_after_run() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("nested").join("output");
    let sink = FileOutputSink::new(&out);

    let written = sink.save(&run_id(), &records()).await.unwrap();

    let csv_path = out.join("fiverr_gigs_python_developer_20240501_093000.csv");
    let json_path = out.join("fiverr_gigs_python_developer_20240501_093000.json");
    assert_eq!(written, vec![csv_path.clone(), json_path.clone()]);
    assert!(csv_path.exists());
    assert!(json_path.exists());
}

#[tokio::test]
async fn test_csv_layout() {
    let dir = TempDir::new().unwrap();
    let sink = FileOutputSink::new(dir.path()).with_format(OutputFormat::Csv);

    let written = sink.save(&run_id(), &records()).await.unwrap();
    assert_eq!(written.len(), 1);

    let mut reader = csv::Reader::from_path(&written[0]).unwrap();
    let header: Vec<String> = reader.headers().unwrap().iter().map(str::to_string).collect();
    assert_eq!(header, CSV_HEADER.to_vec());

    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(&rows[0][0], "I will write a \"fast\", safe parser");
    assert_eq!(&rows[0][3], "Österreich");
    assert_eq!(&rows[1][0], "");
    assert_eq!(&rows[1][3], "N/A");
    assert_eq!(&rows[1][6], "0");
    assert!(rows[2].iter().all(|cell| cell == "Error"));
}

#[tokio::test]
async fn test_json_round_trips_and_uses_four_spaces() {
    let dir = TempDir::new().unwrap();
    let sink = FileOutputSink::new(dir.path())
        .with_base_name("gigs")
        .with_format(OutputFormat::Json);

    let written = sink.save(&run_id(), &records()).await.unwrap();
    assert_eq!(
        written[0].file_name().and_then(|n| n.to_str()),
        Some("gigs_python_developer_20240501_093000.json")
    );

    let text = std::fs::read_to_string(&written[0]).unwrap();
    assert!(text.starts_with("[\n    {\n        \"title\""));
    assert!(text.contains("Österreich"));

    let parsed: Vec<ListingRecord> = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, records());
}
