//! Per-analysis state: the KPI reference between loads and the load step.

use std::collections::BTreeMap;
use std::time::Instant;

use eood_map::resolve_sales_columns;
use eood_model::{Batch, ColumnMapping, EnrichedBatch, OodType};
use serde::Serialize;
use tracing::{info, info_span};

use crate::classifier::classify_batch;
use crate::config::AnalysisConfig;
use crate::kpi::KpiReference;
use crate::stats::ProductStats;

/// Summary of one analysis pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub records: usize,
    pub sales_columns: ColumnMapping,
    pub kpi_columns: ColumnMapping,
    pub kpi_entries: usize,
    pub stats_products: usize,
    pub counts: BTreeMap<OodType, usize>,
    /// True when the sales columns did not resolve and no rule was evaluated.
    pub missing_sales_columns: bool,
}

impl AnalysisReport {
    pub fn ood_count(&self) -> usize {
        self.counts
            .iter()
            .filter(|(ood_type, _)| ood_type.is_ood())
            .map(|(_, count)| count)
            .sum()
    }
}

/// Result of [`AnalysisSession::analyze`].
#[derive(Debug, Clone)]
pub struct Analysis {
    pub enriched: EnrichedBatch,
    pub stats: ProductStats,
    pub report: AnalysisReport,
}

/// One analysis session. Owns the KPI reference; statistics are per batch.
#[derive(Debug, Clone, Default)]
pub struct AnalysisSession {
    config: AnalysisConfig,
    kpi: KpiReference,
    kpi_columns: ColumnMapping,
}

impl AnalysisSession {
    /// Creates a session with an empty KPI reference.
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            kpi: KpiReference::empty(),
            kpi_columns: ColumnMapping::default(),
        }
    }

    pub fn kpi(&self) -> &KpiReference {
        &self.kpi
    }

    pub fn kpi_columns(&self) -> &ColumnMapping {
        &self.kpi_columns
    }

    /// Replaces the KPI reference with one built from `batch`.
    ///
    /// The new registry is built completely before it replaces the old one.
    pub fn load_kpi(&mut self, batch: &Batch) -> &KpiReference {
        let span = info_span!("load_kpi", records = batch.len());
        let _guard = span.enter();
        let (kpi, columns) = KpiReference::from_batch(batch, &self.config.aliases);
        info!(entries = kpi.len(), "KPI reference loaded");
        self.kpi = kpi;
        self.kpi_columns = columns;
        &self.kpi
    }

    /// Resolves the sales columns, rebuilds product statistics from `sales`
    /// and classifies every record.
    pub fn analyze(&self, sales: &Batch) -> Analysis {
        let span = info_span!("analyze", records = sales.len());
        let _guard = span.enter();
        let start = Instant::now();

        let sales_columns = resolve_sales_columns(sales.headers(), &self.config.aliases);
        let stats = ProductStats::compute(sales, &sales_columns);
        let enriched = classify_batch(
            sales,
            &sales_columns,
            &self.kpi,
            &stats,
            &self.config.classifier,
        );

        let report = AnalysisReport {
            records: enriched.len(),
            missing_sales_columns: !sales.is_empty() && !sales_columns.is_complete(),
            sales_columns,
            kpi_columns: self.kpi_columns.clone(),
            kpi_entries: self.kpi.len(),
            stats_products: stats.len(),
            counts: enriched.count_by_type(),
        };
        info!(
            records = report.records,
            ood = report.ood_count(),
            kpi_entries = report.kpi_entries,
            products = report.stats_products,
            duration_ms = start.elapsed().as_millis(),
            "analysis complete"
        );
        Analysis {
            enriched,
            stats,
            report,
        }
    }
}
