//! CSV batch reading.

use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use eood_model::Batch;
use tracing::debug;

use crate::error::{IngestError, Result};

const INLINE_SOURCE: &str = "<inline>";

/// Trims, strips a UTF-8 BOM and collapses inner whitespace runs.
pub(crate) fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub(crate) fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

fn read_csv_from<R: Read>(reader: R, path: &Path) -> Result<Batch> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut headers: Option<Vec<String>> = None;
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut skipped = 0usize;
    for record in reader.records() {
        let record = record.map_err(|source| IngestError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(String::is_empty) {
            skipped += 1;
            continue;
        }
        match headers {
            None => headers = Some(row.iter().map(|value| normalize_header(value)).collect()),
            Some(_) => rows.push(row),
        }
    }
    let headers = headers.unwrap_or_default();
    debug!(
        path = %path.display(),
        columns = headers.len(),
        rows = rows.len(),
        blank_rows = skipped,
        "read csv batch"
    );
    Ok(Batch::from_rows(headers, rows))
}

/// Reads a CSV file whose first non-blank row is the header row.
///
/// Blank rows are skipped and cells are trimmed. A file with no rows yields an
/// empty batch.
pub fn read_csv_batch(path: &Path) -> Result<Batch> {
    let file = std::fs::File::open(path).map_err(|error| IngestError::from_io(path, error))?;
    read_csv_from(file, path)
}

/// Reads CSV text already held in memory.
pub fn read_csv_str(contents: &str) -> Result<Batch> {
    read_csv_from(contents.as_bytes(), Path::new(INLINE_SOURCE))
}
