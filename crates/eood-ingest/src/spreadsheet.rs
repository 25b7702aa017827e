//! Spreadsheet batch reading (first worksheet of an xlsx/xls workbook).

use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};
use eood_model::Batch;
use tracing::debug;

use crate::csv_table::{normalize_cell, normalize_header};
use crate::error::{IngestError, Result};

/// Empty cells become `""`; numbers and booleans become their text form.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(value) => normalize_cell(value),
        other => normalize_cell(&other.to_string()),
    }
}

/// First non-blank row is the header row; later blank rows are skipped.
pub(crate) fn batch_from_range(range: &Range<Data>) -> Batch {
    let mut rows = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect::<Vec<_>>())
        .filter(|row| row.iter().any(|value| !value.is_empty()));
    let Some(header_row) = rows.next() else {
        return Batch::default();
    };
    let headers = header_row
        .iter()
        .map(|value| normalize_header(value))
        .collect();
    Batch::from_rows(headers, rows.collect())
}

/// Reads the first worksheet of a workbook. A workbook without sheets yields
/// an empty batch.
pub fn read_spreadsheet_batch(path: &Path) -> Result<Batch> {
    let spreadsheet_error = |source: calamine::Error| IngestError::Spreadsheet {
        path: path.to_path_buf(),
        source,
    };
    let mut workbook = open_workbook_auto(path).map_err(spreadsheet_error)?;
    let batch = match workbook.worksheet_range_at(0) {
        Some(range) => batch_from_range(&range.map_err(spreadsheet_error)?),
        None => Batch::default(),
    };
    debug!(
        path = %path.display(),
        columns = batch.headers().len(),
        rows = batch.len(),
        "read spreadsheet batch"
    );
    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> Data {
        Data::String(value.to_string())
    }

    #[test]
    fn test_first_sheet_rows_become_records() {
        let mut range = Range::new((0, 0), (3, 2));
        range.set_value((0, 0), text(" Tên sản phẩm "));
        range.set_value((0, 1), text("KPI doanh thu"));
        range.set_value((0, 2), text("Ghi chú"));
        range.set_value((1, 0), text("Áo thun"));
        range.set_value((1, 1), Data::Float(1200.0));
        range.set_value((3, 0), text("Mũ"));
        range.set_value((3, 1), Data::Int(300));
        range.set_value((3, 2), Data::Bool(true));

        let batch = batch_from_range(&range);

        assert_eq!(batch.headers(), &["Tên sản phẩm", "KPI doanh thu", "Ghi chú"]);
        assert_eq!(batch.len(), 2);
        let first = &batch.records()[0];
        assert_eq!(first.value("KPI doanh thu"), "1200");
        assert_eq!(first.value("Ghi chú"), "");
        let second = &batch.records()[1];
        assert_eq!(second.value("Tên sản phẩm"), "Mũ");
        assert_eq!(second.value("KPI doanh thu"), "300");
        assert_eq!(second.value("Ghi chú"), "true");
    }

    #[test]
    fn test_empty_sheet_is_empty_batch() {
        let range: Range<Data> = Range::new((0, 0), (1, 1));
        let batch = batch_from_range(&range);
        assert!(batch.is_empty());
        assert!(batch.headers().is_empty());
    }
}
