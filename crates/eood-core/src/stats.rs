//! Per-product revenue statistics over the current sales batch.

use std::collections::BTreeMap;

use eood_model::{Batch, ColumnMapping, ProductKey, parse_amount};
use serde::Serialize;
use tracing::debug;

/// Mean and sample standard deviation of one product's revenues.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProductStat {
    pub mean: f64,
    pub std_dev: f64,
    pub sample_count: usize,
}

impl ProductStat {
    /// Computes mean and Bessel-corrected deviation (denominator `max(1, n-1)`).
    ///
    /// Returns `None` for an empty slice. A single observation has a deviation
    /// of zero.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let n = values.len();
        let mean = values.iter().sum::<f64>() / n as f64;
        let squared: f64 = values.iter().map(|value| (value - mean).powi(2)).sum();
        let variance = squared / n.saturating_sub(1).max(1) as f64;
        Some(Self {
            mean,
            std_dev: variance.sqrt(),
            sample_count: n,
        })
    }

    /// Absolute z-score of `value`, or `None` when the deviation is not positive.
    ///
    /// An overflowing score saturates at `f64::MAX`; one that is undefined
    /// because the group sums overflowed is `None`.
    pub fn z_score(&self, value: f64) -> Option<f64> {
        if self.std_dev > 0.0 {
            let z = (value - self.mean).abs() / self.std_dev;
            (!z.is_nan()).then(|| z.min(f64::MAX))
        } else {
            None
        }
    }
}

/// Statistics for every product of one sales batch. Not cumulative.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductStats {
    by_product: BTreeMap<ProductKey, ProductStat>,
}

impl ProductStats {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Groups revenues by normalized product and summarizes each group.
    ///
    /// Records with a blank product are excluded. Unresolved columns yield an
    /// empty table.
    pub fn compute(batch: &Batch, columns: &ColumnMapping) -> Self {
        let (Some(product_column), Some(revenue_column)) = (&columns.product, &columns.revenue)
        else {
            return Self::empty();
        };
        let mut groups: BTreeMap<ProductKey, Vec<f64>> = BTreeMap::new();
        for record in batch {
            let Some(key) = ProductKey::new(record.value(product_column)) else {
                continue;
            };
            groups
                .entry(key)
                .or_default()
                .push(parse_amount(record.value(revenue_column)));
        }
        let by_product: BTreeMap<ProductKey, ProductStat> = groups
            .into_iter()
            .filter_map(|(key, values)| ProductStat::from_values(&values).map(|stat| (key, stat)))
            .collect();
        debug!(products = by_product.len(), "computed product statistics");
        Self { by_product }
    }

    pub fn get(&self, key: &ProductKey) -> Option<&ProductStat> {
        self.by_product.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ProductKey, &ProductStat)> {
        self.by_product.iter()
    }

    pub fn len(&self) -> usize {
        self.by_product.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_product.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bessel_corrected_deviation() {
        let stat = ProductStat::from_values(&[100.0, 100.0, 100.0, 400.0]).unwrap();
        assert_eq!(stat.mean, 175.0);
        assert!((stat.std_dev - 150.0).abs() < 1e-9);
        assert_eq!(stat.sample_count, 4);
        assert!((stat.z_score(700.0).unwrap() - 3.5).abs() < 1e-9);
    }

    #[test]
    fn single_observation_has_no_z_score() {
        let stat = ProductStat::from_values(&[42.0]).unwrap();
        assert_eq!(stat.std_dev, 0.0);
        assert_eq!(stat.z_score(1_000_000.0), None);
    }

    #[test]
    fn constant_values_have_no_z_score() {
        let stat = ProductStat::from_values(&[5.0, 5.0, 5.0]).unwrap();
        assert_eq!(stat.z_score(6.0), None);
    }

    #[test]
    fn overflowing_groups_never_yield_non_finite_scores() {
        let overflowed = ProductStat::from_values(&[1e308, 1e308, 1e308]).unwrap();
        assert_eq!(overflowed.z_score(1.0), None);

        let wide = ProductStat::from_values(&[-1e308, 0.0, 1e308]).unwrap();
        if let Some(z) = wide.z_score(1e308) {
            assert!(z.is_finite());
        }
    }

    #[test]
    fn empty_values_have_no_stat() {
        assert!(ProductStat::from_values(&[]).is_none());
    }
}
