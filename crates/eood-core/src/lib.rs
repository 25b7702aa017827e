//! Enrichment engine for sales out-of-distribution screening.
//!
//! # Architecture
//!
//! ```text
//!  KPI batch ──► KpiReference ─────────────┐
//!                                          ▼
//!  sales batch ──► ColumnMapping ──► ProductStats ──► Classifier ──► EnrichedBatch
//! ```
//!
//! [`AnalysisSession`] owns the KPI reference between loads and rebuilds the
//! product statistics for every sales batch. The classifier only ever sees
//! immutable, fully built tables.

pub mod classifier;
pub mod config;
pub mod kpi;
pub mod query;
pub mod session;
pub mod stats;

pub use classifier::{
    Classifier, ID_LABEL, KPI_LABEL, MISSING_COLUMNS_LABEL, NOVELTY_LABEL, NOVELTY_SCORE,
    SPIKE_LABEL, SalesObservation, classify_batch,
};
pub use config::{AnalysisConfig, ClassifierConfig, ConfigError, load_config};
pub use kpi::KpiReference;
pub use query::{RecordQuery, Scope};
pub use session::{Analysis, AnalysisReport, AnalysisSession};
pub use stats::{ProductStat, ProductStats};
