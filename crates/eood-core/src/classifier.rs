//! Three-rule OOD classifier.
//!
//! Rules are evaluated in strict precedence; the first one that fires decides
//! the record's type:
//!
//! 1. **Novelty**: the product name carries a `(new)` / ` new` marker.
//! 2. **KPI deviation**: `|revenue - target| / target` exceeds the deviation
//!    threshold (only for targets > 0).
//! 3. **Spike**: the product-level z-score exceeds the spike threshold (only
//!    when the product's deviation is positive).
//!
//! Records no rule claims are in-distribution. Scores that overflow saturate at
//! `f64::MAX`, so every score stays finite.

use eood_model::{
    Batch, ColumnMapping, EnrichedBatch, EnrichedRecord, OodAssessment, OodType, ProductKey,
    Record, parse_amount,
};
use tracing::{trace, warn};

use crate::config::ClassifierConfig;
use crate::kpi::KpiReference;
use crate::stats::ProductStats;

pub const NOVELTY_LABEL: &str = "OOD: Novelty (New product)";
pub const KPI_LABEL: &str = "OOD: High-entropy (KPI deviation)";
pub const SPIKE_LABEL: &str = "OOD: Spike/Drop (seasonality/promo proxy)";
pub const ID_LABEL: &str = "ID (in-distribution)";
pub const MISSING_COLUMNS_LABEL: &str = "ID (missing columns)";

/// Fixed score of a novelty hit.
pub const NOVELTY_SCORE: f64 = 1.0;

/// The fields of one sales record the rules look at.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesObservation<'a> {
    /// Normalized product; `None` for a blank name.
    pub product: Option<ProductKey>,
    pub revenue: f64,
    /// Month annotation, when a month column resolved and the cell is not blank.
    pub month: Option<&'a str>,
}

impl<'a> SalesObservation<'a> {
    /// Extracts the observation using already resolved columns.
    ///
    /// Unresolved product or revenue columns read as blank / zero.
    pub fn from_record(record: &'a Record, columns: &ColumnMapping) -> Self {
        let product = columns
            .product
            .as_deref()
            .and_then(|column| ProductKey::new(record.value(column)));
        let revenue = columns
            .revenue
            .as_deref()
            .map(|column| parse_amount(record.value(column)))
            .unwrap_or(0.0);
        let month = columns
            .month
            .as_deref()
            .map(|column| record.value(column).trim())
            .filter(|value| !value.is_empty());
        Self {
            product,
            revenue,
            month,
        }
    }
}

/// Classifies observations against a finished KPI reference and stats table.
///
/// Holds shared borrows only, so both tables are immutable for the whole pass.
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'a> {
    config: &'a ClassifierConfig,
    kpi: &'a KpiReference,
    stats: &'a ProductStats,
}

impl<'a> Classifier<'a> {
    pub fn new(config: &'a ClassifierConfig, kpi: &'a KpiReference, stats: &'a ProductStats) -> Self {
        Self { config, kpi, stats }
    }

    /// Applies the rules in precedence order and returns exactly one outcome.
    pub fn assess(&self, observation: &SalesObservation<'_>) -> OodAssessment {
        let Some(product) = observation.product.as_ref() else {
            return self.in_distribution();
        };

        if product.is_novel() {
            return OodAssessment {
                score: Some(NOVELTY_SCORE),
                ood_type: OodType::New,
                label: NOVELTY_LABEL.to_string(),
            };
        }

        if let Some(target) = self.kpi.target(product).filter(|target| *target > 0.0) {
            let deviation = ((observation.revenue - target).abs() / target).min(f64::MAX);
            if deviation > self.config.deviation_threshold {
                return OodAssessment {
                    score: Some(deviation),
                    ood_type: OodType::Kpi,
                    label: with_month(KPI_LABEL, observation.month),
                };
            }
        }

        if let Some(z_score) = self
            .stats
            .get(product)
            .and_then(|stat| stat.z_score(observation.revenue))
            && z_score > self.config.spike_threshold
        {
            return OodAssessment {
                score: Some(z_score),
                ood_type: OodType::Spike,
                label: with_month(SPIKE_LABEL, observation.month),
            };
        }

        self.in_distribution()
    }

    /// Convenience for [`Self::assess`] on a raw record.
    pub fn assess_record(&self, record: &Record, columns: &ColumnMapping) -> OodAssessment {
        self.assess(&SalesObservation::from_record(record, columns))
    }

    fn in_distribution(&self) -> OodAssessment {
        OodAssessment {
            score: Some(self.config.id_score),
            ood_type: OodType::Id,
            label: ID_LABEL.to_string(),
        }
    }
}

fn with_month(label: &str, month: Option<&str>) -> String {
    match month {
        Some(month) => format!("{label} (month: {month})"),
        None => label.to_string(),
    }
}

fn missing_columns() -> OodAssessment {
    OodAssessment {
        score: None,
        ood_type: OodType::Id,
        label: MISSING_COLUMNS_LABEL.to_string(),
    }
}

/// Classifies every record of a sales batch.
///
/// An empty batch is returned unchanged. When the product or revenue column is
/// unresolved, every record is marked [`MISSING_COLUMNS_LABEL`] without
/// evaluating any rule. Input records are never modified.
pub fn classify_batch(
    batch: &Batch,
    columns: &ColumnMapping,
    kpi: &KpiReference,
    stats: &ProductStats,
    config: &ClassifierConfig,
) -> EnrichedBatch {
    if batch.is_empty() {
        return EnrichedBatch::unchanged(batch);
    }
    if !columns.is_complete() {
        warn!(
            missing = ?columns.missing_fields(),
            records = batch.len(),
            "sales columns unresolved; all records marked in-distribution"
        );
        let records = batch
            .iter()
            .map(|record| EnrichedRecord::new(record.clone(), missing_columns()))
            .collect();
        return EnrichedBatch::new(batch.headers(), records);
    }

    let classifier = Classifier::new(config, kpi, stats);
    let records = batch
        .iter()
        .enumerate()
        .map(|(row, record)| {
            let assessment = classifier.assess_record(record, columns);
            trace!(row, ood_type = %assessment.ood_type, "classified record");
            EnrichedRecord::new(record.clone(), assessment)
        })
        .collect();
    EnrichedBatch::new(batch.headers(), records)
}
