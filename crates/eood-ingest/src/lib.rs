//! Batch loaders for sales and KPI sources.
//!
//! Loaders turn CSV, JSON and Excel files into [`eood_model::Batch`] values
//! and surface I/O and parse failures as [`IngestError`]. They never classify
//! or interpret cells; that is the job of `eood-core`.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use eood_ingest::load_batch;
//!
//! let sales = load_batch(Path::new("data/sales_data.csv"))?;
//! let kpi = load_batch(Path::new("data/kpi_data.xlsx"))?;
//! ```

mod csv_table;
mod error;
mod json_table;
mod source;
mod spreadsheet;

// === Error Types ===
pub use error::{IngestError, Result};

// === Readers ===
pub use csv_table::{read_csv_batch, read_csv_str};
pub use json_table::{read_json_batch, read_json_str};
pub use spreadsheet::read_spreadsheet_batch;

// === Source Dispatch ===
pub use source::{MAX_SOURCE_FILE_SIZE, SourceFormat, check_file_size, load_batch};
