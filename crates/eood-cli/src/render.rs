//! Terminal tables for enriched records, run summaries and the KPI registry.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use tracing::warn;

use eood_core::{AnalysisReport, KpiReference};
use eood_map::HeaderIndex;
use eood_model::{EnrichedRecord, OodType};

/// Row cap applied when none is given on the command line.
pub const DEFAULT_MAX_ROWS: usize = 200;

/// Printed instead of a table when nothing matched.
pub const EMPTY_MESSAGE: &str = "No data.";

/// Presentation options for the record table.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub max_rows: usize,
    /// Header subset to display, matched case-insensitively. `None` shows all.
    pub columns: Option<Vec<String>>,
    /// Emit ANSI styling. Disabled for pipes and tests.
    pub styled: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_rows: DEFAULT_MAX_ROWS,
            columns: None,
            styled: true,
        }
    }
}

/// Foreground color for a row of the given type. `ID` rows stay plain.
pub fn type_color(ood_type: OodType) -> Option<Color> {
    match ood_type {
        OodType::New => Some(Color::Magenta),
        OodType::Kpi => Some(Color::Yellow),
        OodType::Spike => Some(Color::Red),
        OodType::Id => None,
    }
}

/// Resolves the displayed headers. Unknown requested names are skipped with a
/// warning; if none survive, every header is shown.
pub fn select_columns(headers: &[String], requested: Option<&[String]>) -> Vec<String> {
    let Some(requested) = requested else {
        return headers.to_vec();
    };
    let index = HeaderIndex::new(headers);
    let mut selected: Vec<String> = Vec::new();
    for name in requested {
        match index.get(name) {
            Some(header) if !selected.iter().any(|existing| existing == header) => {
                selected.push(header.to_string());
            }
            Some(_) => {}
            None => warn!(column = %name, "requested column not present"),
        }
    }
    if selected.is_empty() {
        headers.to_vec()
    } else {
        selected
    }
}

/// Builds the record table, capped at `options.max_rows` rows.
pub fn records_table(headers: &[String], records: &[&EnrichedRecord], options: &RenderOptions) -> Table {
    let columns = select_columns(headers, options.columns.as_deref());
    let mut table = Table::new();
    apply_table_style(&mut table, options.styled);
    table.set_header(columns.iter().map(|name| header_cell(name)).collect::<Vec<_>>());
    for enriched in records.iter().take(options.max_rows) {
        let flattened = enriched.to_record();
        let color = type_color(enriched.ood_type());
        table.add_row(
            columns
                .iter()
                .map(|name| {
                    let cell = Cell::new(flattened.value(name));
                    match color {
                        Some(color) => cell.fg(color),
                        None => cell,
                    }
                })
                .collect::<Vec<_>>(),
        );
    }
    table
}

/// Record view text: a "Showing" line followed by the table, or
/// [`EMPTY_MESSAGE`] when no records matched.
pub fn render_records(headers: &[String], records: &[&EnrichedRecord], options: &RenderOptions) -> String {
    if records.is_empty() {
        return EMPTY_MESSAGE.to_string();
    }
    let shown = records.len().min(options.max_rows);
    format!(
        "Showing {shown} / {} rows\n{}",
        records.len(),
        records_table(headers, records, options)
    )
}

/// Per-type counts with a total row.
pub fn summary_table(report: &AnalysisReport, styled: bool) -> Table {
    let mut table = Table::new();
    apply_summary_style(&mut table, styled);
    table.set_header(vec![header_cell("Type"), header_cell("Records")]);
    align_column(&mut table, 1, CellAlignment::Right);
    for ood_type in OodType::ALL {
        let count = report.counts.get(&ood_type).copied().unwrap_or(0);
        let label = Cell::new(ood_type.as_str());
        let label = match type_color(ood_type) {
            Some(color) => label.fg(color),
            None => label,
        };
        table.add_row(vec![label, count_cell(count)]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(report.records).add_attribute(Attribute::Bold),
    ]);
    table
}

pub fn print_summary(report: &AnalysisReport, styled: bool) {
    println!(
        "Sales columns: product={} revenue={} month={}",
        column_name(report.sales_columns.product.as_deref()),
        column_name(report.sales_columns.revenue.as_deref()),
        column_name(report.sales_columns.month.as_deref()),
    );
    println!(
        "KPI targets: {} | Products with history: {} | OOD records: {}",
        report.kpi_entries,
        report.stats_products,
        report.ood_count()
    );
    if report.missing_sales_columns {
        println!("Sales product/revenue columns not found; every record marked ID.");
    }
    println!("{}", summary_table(report, styled));
}

/// KPI registry listing in key order.
pub fn kpi_table(kpi: &KpiReference, styled: bool) -> Table {
    let mut table = Table::new();
    apply_summary_style(&mut table, styled);
    table.set_header(vec![header_cell("Product key"), header_cell("KPI revenue")]);
    align_column(&mut table, 1, CellAlignment::Right);
    for (key, target) in kpi.iter() {
        table.add_row(vec![Cell::new(key.as_str()), Cell::new(format!("{target:.2}"))]);
    }
    table
}

fn column_name(name: Option<&str>) -> &str {
    name.unwrap_or("-")
}

fn apply_table_style(table: &mut Table, styled: bool) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(160);
    if !styled {
        table.force_no_tty();
    }
}

fn apply_summary_style(table: &mut Table, styled: bool) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    if !styled {
        table.force_no_tty();
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).add_attribute(Attribute::Bold)
    } else {
        Cell::new(count).fg(Color::DarkGrey)
    }
}
