use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::aggregate::Dataset;
use crate::parse::{parse_rows, ParseError, RawRow};

/// Failure of a whole-log ingestion. No partial dataset is ever returned.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("loader task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Loads, parses and aggregates the change log at `path`.
///
/// This is the single ingestion entry point and the only asynchronous
/// boundary of the engine. The file read, CSV decoding, record parsing and
/// commit aggregation all run on a blocking task; the caller is suspended
/// until the complete [`Dataset`] is available.
///
/// # Errors
///
/// Returns `LoadError` if the file cannot be opened, the CSV framing is
/// broken, or any row fails to parse. The whole load fails in each case.
pub async fn load_log(path: impl AsRef<Path>) -> Result<Dataset, LoadError> {
    let path = path.as_ref().to_path_buf();
    debug!(path = %path.display(), "loading change log");

    let dataset = tokio::task::spawn_blocking(move || {
        let file = std::fs::File::open(&path).map_err(|source| LoadError::Io {
            path: path.clone(),
            source,
        })?;
        dataset_from_reader(file)
    })
    .await??;

    info!(
        commits = dataset.len(),
        records = dataset.summary().total_loc,
        "change log loaded"
    );
    Ok(dataset)
}

/// Synchronous counterpart of [`load_log`] over any CSV source.
///
/// # Errors
///
/// Returns `LoadError::Csv` for framing errors and `LoadError::Parse` for the
/// first row that fails typed parsing.
pub fn dataset_from_reader<R: Read>(reader: R) -> Result<Dataset, LoadError> {
    let rows = read_rows(reader)?;
    let records = parse_rows(&rows)?;
    Ok(Dataset::from_records(records))
}

/// Decodes CSV with a header row into raw field maps.
///
/// # Errors
///
/// Returns `csv::Error` when a record has the wrong number of fields or is
/// not valid UTF-8.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<RawRow>, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let rows = rdr
        .deserialize::<RawRow>()
        .collect::<Result<Vec<_>, csv::Error>>()?;
    Ok(rows)
}
