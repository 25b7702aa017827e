//! Source format dispatch and pre-load checks.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use eood_model::Batch;
use tracing::info;

use crate::csv_table::read_csv_batch;
use crate::error::{IngestError, Result};
use crate::json_table::read_json_batch;
use crate::spreadsheet::read_spreadsheet_batch;

/// Maximum source file size (50 MB).
pub const MAX_SOURCE_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// On-disk layout of a record source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Delimited text with a header row.
    Csv,
    /// Array of flat JSON objects.
    Json,
    /// Excel workbook; only the first worksheet is read.
    Spreadsheet,
}

impl SourceFormat {
    /// Picks the format from the file extension: `.json` is JSON, `.xlsx`,
    /// `.xlsm` and `.xls` are workbooks, anything else is CSV.
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("json") => Self::Json,
            Some("xlsx" | "xlsm" | "xls") => Self::Spreadsheet,
            _ => Self::Csv,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Spreadsheet => "spreadsheet",
        }
    }
}

/// Check file size against a limit.
pub fn check_file_size(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|error| IngestError::from_io(path, error))?;
    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }
    Ok(())
}

/// Rejects UTF-16 sources (detected by BOM); UTF-8 with or without BOM passes.
fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|error| IngestError::from_io(path, error))?;
    let mut buffer = [0u8; 2];
    let bytes_read = file
        .read(&mut buffer)
        .map_err(|error| IngestError::from_io(path, error))?;
    if bytes_read == 2 {
        let encoding = match buffer {
            [0xFF, 0xFE] => Some("UTF-16 LE"),
            [0xFE, 0xFF] => Some("UTF-16 BE"),
            _ => None,
        };
        if let Some(encoding) = encoding {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding,
            });
        }
    }
    Ok(())
}

/// Loads a sales or KPI batch, choosing the reader from the file extension.
pub fn load_batch(path: &Path) -> Result<Batch> {
    check_file_size(path, MAX_SOURCE_FILE_SIZE)?;
    validate_encoding(path)?;
    let format = SourceFormat::from_path(path);
    let batch = match format {
        SourceFormat::Csv => read_csv_batch(path)?,
        SourceFormat::Json => read_json_batch(path)?,
        SourceFormat::Spreadsheet => read_spreadsheet_batch(path)?,
    };
    info!(
        path = %path.display(),
        format = format.as_str(),
        records = batch.len(),
        columns = batch.headers().len(),
        "batch loaded"
    );
    Ok(batch)
}
