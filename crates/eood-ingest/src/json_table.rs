//! JSON record reading (an array of objects, as spreadsheet exports produce).

use std::path::Path;

use eood_model::{Batch, Record};
use tracing::debug;

use crate::error::{IngestError, Result};

fn batch_from_records(records: Vec<Record>) -> Batch {
    let mut headers: Vec<String> = Vec::new();
    for record in &records {
        for column in record.columns() {
            if !headers.iter().any(|header| header == column) {
                headers.push(column.to_string());
            }
        }
    }
    Batch::new(headers, records)
}

fn parse_records(contents: &str, path: &Path) -> Result<Batch> {
    let records: Vec<Record> =
        serde_json::from_str(contents).map_err(|source| IngestError::JsonParse {
            path: path.to_path_buf(),
            source,
        })?;
    let total = records.len();
    let records: Vec<Record> = records
        .into_iter()
        .filter(|record| !record.is_blank())
        .collect();
    debug!(
        path = %path.display(),
        rows = records.len(),
        blank_rows = total - records.len(),
        "read json batch"
    );
    Ok(batch_from_records(records))
}

/// Reads a JSON array of flat objects.
///
/// Headers are the union of object keys in first-seen order. Numbers and
/// booleans become their text form, `null` becomes the empty value.
pub fn read_json_batch(path: &Path) -> Result<Batch> {
    let contents =
        std::fs::read_to_string(path).map_err(|error| IngestError::from_io(path, error))?;
    parse_records(contents.trim_start_matches('\u{feff}'), path)
}

/// Reads JSON text already held in memory.
pub fn read_json_str(contents: &str) -> Result<Batch> {
    parse_records(contents, Path::new("<inline>"))
}
