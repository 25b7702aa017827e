//! Data model for sales out-of-distribution screening.
//!
//! Records are ordered header → value mappings loaded from arbitrary source
//! schemas. The enrichment engine attaches an [`OodAssessment`] to each record,
//! producing an [`EnrichedBatch`].

pub mod error;
pub mod ids;
pub mod mapping;
pub mod normalize;
pub mod ood;
pub mod record;

pub use error::{ModelError, Result};
pub use ids::ProductKey;
pub use mapping::ColumnMapping;
pub use normalize::{normalize_key, parse_amount};
pub use ood::{
    EnrichedBatch, EnrichedRecord, OOD_COLUMNS, OOD_LABEL_COLUMN, OOD_SCORE_COLUMN,
    OOD_TYPE_COLUMN, OodAssessment, OodType,
};
pub use record::{Batch, Record};
