//! Ingestion from CSV on disk: success, and the all-or-nothing failure path.

mod common;

use std::io::Write;

use commitscope_core::load::dataset_from_reader;
use commitscope_core::{load_log, LoadError, ParseError};
use common::CSV_HEADER;

fn write_log(body: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "{CSV_HEADER}").unwrap();
    file.write_all(body.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

const GOOD_ROWS: &str = "\
index.html,1,html,a1,emily,2025-02-10,09:30:00-08:00,-08:00,2025-02-10T09:30:00-08:00,0,40
index.html,2,html,a1,emily,2025-02-10,09:30:00-08:00,-08:00,2025-02-10T09:30:00-08:00,1,40
style.css,1,css,b2,emily,2025-02-12,22:15:00-08:00,-08:00,2025-02-12T22:15:00-08:00,0,12
";

#[tokio::test]
async fn loads_and_aggregates_a_csv_log() {
    let file = write_log(GOOD_ROWS);
    let dataset = load_log(file.path()).await.unwrap();

    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.commits()[0].id(), "a1");
    assert_eq!(dataset.commits()[0].total_lines(), 2);
    assert_eq!(dataset.summary().total_loc, 3);
    assert_eq!(dataset.summary().file_types, ["css", "html"]);
    assert!((dataset.summary().average_file_length - 92.0 / 3.0).abs() < 1e-9);
}

#[tokio::test]
async fn one_malformed_row_fails_the_whole_load() {
    let body = format!(
        "{GOOD_ROWS}style.css,two,css,b2,emily,2025-02-12,22:15:00-08:00,-08:00,2025-02-12T22:15:00-08:00,0,12\n"
    );
    let file = write_log(&body);

    match load_log(file.path()).await {
        Err(LoadError::Parse(ParseError::InvalidInteger { row, field, .. })) => {
            assert_eq!(row, 3);
            assert_eq!(field, "line");
        }
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_file_is_an_io_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let err = load_log(dir.path().join("absent.csv")).await.unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
}

#[test]
fn bad_datetime_is_reported_with_its_field() {
    let csv = format!(
        "{CSV_HEADER}\nindex.html,1,html,a1,emily,2025-02-10,09:30:00,-08:00,yesterday,0,40\n"
    );
    let err = dataset_from_reader(csv.as_bytes()).unwrap_err();
    match err {
        LoadError::Parse(e) => assert_eq!((e.row(), e.field()), (0, "datetime")),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn ragged_csv_is_a_framing_error() {
    let csv = format!("{CSV_HEADER}\nindex.html,1,html\n");
    assert!(matches!(dataset_from_reader(csv.as_bytes()), Err(LoadError::Csv(_))));
}
