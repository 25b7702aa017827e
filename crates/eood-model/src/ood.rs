//! OOD assessment types attached to classified records.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};

use crate::error::ModelError;
use crate::record::{Batch, Record};

pub const OOD_SCORE_COLUMN: &str = "OOD_score";
pub const OOD_TYPE_COLUMN: &str = "OOD_type";
pub const OOD_LABEL_COLUMN: &str = "OOD_label";

/// Derived columns appended to every enriched record, in output order.
pub const OOD_COLUMNS: [&str; 3] = [OOD_SCORE_COLUMN, OOD_TYPE_COLUMN, OOD_LABEL_COLUMN];

/// Classification outcome of one record. Exactly one type per record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OodType {
    /// In-distribution: no rule fired.
    #[serde(rename = "ID")]
    Id,
    /// Novel product name.
    #[serde(rename = "NEW")]
    New,
    /// Revenue deviates from the KPI target.
    #[serde(rename = "KPI")]
    Kpi,
    /// Revenue is a statistical outlier for the product.
    #[serde(rename = "SPIKE")]
    Spike,
}

impl OodType {
    pub const ALL: [OodType; 4] = [OodType::Id, OodType::New, OodType::Kpi, OodType::Spike];

    pub fn as_str(&self) -> &'static str {
        match self {
            OodType::Id => "ID",
            OodType::New => "NEW",
            OodType::Kpi => "KPI",
            OodType::Spike => "SPIKE",
        }
    }

    /// True for every type except [`OodType::Id`].
    pub fn is_ood(&self) -> bool {
        !matches!(self, OodType::Id)
    }
}

impl fmt::Display for OodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OodType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ID" => Ok(OodType::Id),
            "NEW" => Ok(OodType::New),
            "KPI" => Ok(OodType::Kpi),
            "SPIKE" => Ok(OodType::Spike),
            _ => Err(ModelError::UnknownOodType(s.to_string())),
        }
    }
}

/// Score, type and label produced for one record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OodAssessment {
    /// Non-negative score; `None` only when the batch lacked required columns.
    pub score: Option<f64>,
    pub ood_type: OodType,
    pub label: String,
}

impl OodAssessment {
    /// Score rendered with exactly three decimals, or `""` when absent.
    pub fn formatted_score(&self) -> String {
        match self.score {
            Some(score) => format!("{score:.3}"),
            None => String::new(),
        }
    }
}

/// A source record with its assessment. Read-only derived output.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedRecord {
    pub record: Record,
    pub assessment: OodAssessment,
}

impl EnrichedRecord {
    pub fn new(record: Record, assessment: OodAssessment) -> Self {
        Self { record, assessment }
    }

    pub fn ood_type(&self) -> OodType {
        self.assessment.ood_type
    }

    /// Flattens into a record with the `OOD_*` columns set.
    ///
    /// Existing `OOD_*` columns are overwritten rather than duplicated.
    pub fn to_record(&self) -> Record {
        let mut record = self.record.clone();
        record.set(OOD_SCORE_COLUMN, self.assessment.formatted_score());
        record.set(OOD_TYPE_COLUMN, self.assessment.ood_type.as_str());
        record.set(OOD_LABEL_COLUMN, self.assessment.label.clone());
        record
    }
}

impl Serialize for EnrichedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_record().serialize(serializer)
    }
}

/// Classified batch. Headers are the source headers followed by `OOD_*`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnrichedBatch {
    headers: Vec<String>,
    records: Vec<EnrichedRecord>,
}

impl EnrichedBatch {
    pub fn new(source_headers: &[String], records: Vec<EnrichedRecord>) -> Self {
        let mut headers = source_headers.to_vec();
        for column in OOD_COLUMNS {
            if !headers.iter().any(|header| header == column) {
                headers.push(column.to_string());
            }
        }
        Self { headers, records }
    }

    /// An empty batch passed through untouched: headers unchanged, no rows.
    pub fn unchanged(batch: &Batch) -> Self {
        Self {
            headers: batch.headers().to_vec(),
            records: Vec::new(),
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn records(&self) -> &[EnrichedRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EnrichedRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records per type; every type is present, possibly with zero.
    pub fn count_by_type(&self) -> BTreeMap<OodType, usize> {
        let mut counts: BTreeMap<OodType, usize> =
            OodType::ALL.iter().map(|ood_type| (*ood_type, 0)).collect();
        for record in &self.records {
            *counts.entry(record.ood_type()).or_insert(0) += 1;
        }
        counts
    }

    /// Flattens into a plain batch carrying the `OOD_*` columns.
    pub fn to_batch(&self) -> Batch {
        Batch::new(
            self.headers.clone(),
            self.records.iter().map(EnrichedRecord::to_record).collect(),
        )
    }
}

impl<'a> IntoIterator for &'a EnrichedBatch {
    type Item = &'a EnrichedRecord;
    type IntoIter = std::slice::Iter<'a, EnrichedRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
