use std::collections::HashMap;

use eood_model::{ColumnMapping, normalize_key};
use tracing::debug;

use crate::aliases::AliasConfig;

/// Normalized-header lookup over one batch's header row.
///
/// When two headers normalize to the same key, the first one is kept.
#[derive(Debug, Clone)]
pub struct HeaderIndex<'a> {
    map: HashMap<String, &'a str>,
}

impl<'a> HeaderIndex<'a> {
    pub fn new<S: AsRef<str>>(headers: &'a [S]) -> Self {
        let mut map = HashMap::with_capacity(headers.len());
        for header in headers {
            let header = header.as_ref();
            map.entry(normalize_key(header)).or_insert(header);
        }
        Self { map }
    }

    /// Original header matching `name` after normalization.
    pub fn get(&self, name: &str) -> Option<&'a str> {
        self.map.get(&normalize_key(name)).copied()
    }

    /// First candidate, in caller order, that names a header.
    pub fn resolve<S: AsRef<str>>(&self, candidates: &[S]) -> Option<&'a str> {
        candidates
            .iter()
            .find_map(|candidate| self.get(candidate.as_ref()))
    }
}

/// Returns the header (original casing) matched by the first fitting candidate.
pub fn resolve_column<'a, H, C>(headers: &'a [H], candidates: &[C]) -> Option<&'a str>
where
    H: AsRef<str>,
    C: AsRef<str>,
{
    HeaderIndex::new(headers).resolve(candidates)
}

/// Resolves product, revenue and month columns of a sales batch.
pub fn resolve_sales_columns<S: AsRef<str>>(headers: &[S], aliases: &AliasConfig) -> ColumnMapping {
    let index = HeaderIndex::new(headers);
    let mapping = ColumnMapping {
        product: index.resolve(&aliases.product).map(str::to_string),
        revenue: index.resolve(&aliases.revenue).map(str::to_string),
        month: index.resolve(&aliases.month).map(str::to_string),
    };
    debug!(
        product = ?mapping.product,
        revenue = ?mapping.revenue,
        month = ?mapping.month,
        "resolved sales columns"
    );
    mapping
}

/// Resolves product and KPI target revenue columns of a KPI batch.
pub fn resolve_kpi_columns<S: AsRef<str>>(headers: &[S], aliases: &AliasConfig) -> ColumnMapping {
    let index = HeaderIndex::new(headers);
    let mapping = ColumnMapping {
        product: index.resolve(&aliases.product).map(str::to_string),
        revenue: index.resolve(&aliases.kpi_revenue).map(str::to_string),
        month: None,
    };
    debug!(
        product = ?mapping.product,
        kpi_revenue = ?mapping.revenue,
        "resolved KPI columns"
    );
    mapping
}
