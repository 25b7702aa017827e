//! Read-only views over an enriched batch.

use eood_model::{EnrichedBatch, EnrichedRecord, OodType};
use serde::{Deserialize, Serialize};

/// Coarse in/out-of-distribution selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    #[default]
    All,
    /// Only `ID` records.
    #[serde(rename = "id")]
    InDistribution,
    /// Every non-`ID` record.
    #[serde(rename = "ood")]
    OutOfDistribution,
}

impl Scope {
    pub fn admits(&self, ood_type: OodType) -> bool {
        match self {
            Scope::All => true,
            Scope::InDistribution => !ood_type.is_ood(),
            Scope::OutOfDistribution => ood_type.is_ood(),
        }
    }
}

/// Conjunction of scope, exact type and free-text filters.
///
/// Text matching is a case-insensitive substring search over the record's JSON
/// form, `OOD_*` columns included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordQuery {
    pub scope: Scope,
    pub ood_type: Option<OodType>,
    pub text: Option<String>,
}

impl RecordQuery {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    #[must_use]
    pub fn with_type(mut self, ood_type: OodType) -> Self {
        self.ood_type = Some(ood_type);
        self
    }

    /// Blank text is treated as no text filter.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.text = if text.trim().is_empty() {
            None
        } else {
            Some(text)
        };
        self
    }

    pub fn matches(&self, record: &EnrichedRecord) -> bool {
        let ood_type = record.ood_type();
        if !self.scope.admits(ood_type) {
            return false;
        }
        if self.ood_type.is_some_and(|wanted| wanted != ood_type) {
            return false;
        }
        match &self.text {
            Some(needle) => serde_json::to_string(record)
                .map(|haystack| haystack.to_lowercase().contains(&needle.to_lowercase()))
                .unwrap_or(false),
            None => true,
        }
    }

    /// Matching records in batch order. The batch itself is untouched.
    pub fn apply<'a>(&self, batch: &'a EnrichedBatch) -> Vec<&'a EnrichedRecord> {
        batch.iter().filter(|record| self.matches(record)).collect()
    }
}
