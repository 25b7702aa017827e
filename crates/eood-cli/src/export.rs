//! Writes filtered, enriched records to CSV or JSON.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use eood_model::EnrichedRecord;

/// Output encoding for exported records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// `.json` exports JSON and plain extensions export CSV. Workbook
    /// extensions have no writer and yield `None`.
    pub fn from_path(path: &Path) -> Option<Self> {
        match eood_ingest::SourceFormat::from_path(path) {
            eood_ingest::SourceFormat::Json => Some(Self::Json),
            eood_ingest::SourceFormat::Csv => Some(Self::Csv),
            eood_ingest::SourceFormat::Spreadsheet => None,
        }
    }
}

/// One CSV row per record, columns in `headers` order. `OOD_*` columns carry
/// the assessment.
pub fn write_csv<W: Write>(writer: W, headers: &[String], records: &[&EnrichedRecord]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(headers)?;
    for enriched in records {
        let flattened = enriched.to_record();
        csv_writer.write_record(headers.iter().map(|name| flattened.value(name)))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Pretty-printed JSON array of flat objects.
pub fn write_json<W: Write>(mut writer: W, records: &[&EnrichedRecord]) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, records)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

pub fn export_records(
    path: &Path,
    format: ExportFormat,
    headers: &[String],
    records: &[&EnrichedRecord],
) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let writer = BufWriter::new(file);
    match format {
        ExportFormat::Csv => write_csv(writer, headers, records),
        ExportFormat::Json => write_json(writer, records),
    }
    .with_context(|| format!("write {}", path.display()))
}
