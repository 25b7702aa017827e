//! KPI reference registry: normalized product name → target revenue.

use std::collections::BTreeMap;

use eood_map::{AliasConfig, resolve_kpi_columns};
use eood_model::{Batch, ColumnMapping, ProductKey, parse_amount};
use serde::Serialize;
use tracing::{debug, warn};

/// Target revenue per product, built wholesale from one KPI batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KpiReference {
    targets: BTreeMap<ProductKey, f64>,
}

impl KpiReference {
    /// An empty registry; the KPI rule never fires against it.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds the registry from a KPI batch and its resolved columns.
    ///
    /// Rows with a blank product are skipped, unparsable targets become `0.0`,
    /// negative targets are clamped to `0.0`, and a repeated product keeps the
    /// last row's target. When either column is unresolved the registry is
    /// empty.
    pub fn build(batch: &Batch, columns: &ColumnMapping) -> Self {
        let (Some(product_column), Some(target_column)) = (&columns.product, &columns.revenue)
        else {
            warn!(
                missing = ?columns.missing_fields(),
                "KPI columns unresolved; KPI reference left empty"
            );
            return Self::empty();
        };
        let mut targets = BTreeMap::new();
        let mut skipped = 0usize;
        for record in batch {
            let Some(key) = ProductKey::new(record.value(product_column)) else {
                skipped += 1;
                continue;
            };
            let target = parse_amount(record.value(target_column)).max(0.0);
            targets.insert(key, target);
        }
        debug!(
            entries = targets.len(),
            skipped_rows = skipped,
            "built KPI reference"
        );
        Self { targets }
    }

    /// Resolves the KPI columns with `aliases`, then builds the registry.
    pub fn from_batch(batch: &Batch, aliases: &AliasConfig) -> (Self, ColumnMapping) {
        let columns = resolve_kpi_columns(batch.headers(), aliases);
        (Self::build(batch, &columns), columns)
    }

    pub fn target(&self, key: &ProductKey) -> Option<f64> {
        self.targets.get(key).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ProductKey, f64)> {
        self.targets.iter().map(|(key, target)| (key, *target))
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
