use serde::{Deserialize, Serialize};

/// Concrete headers resolved for the logical fields of one batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    /// Header holding the product name.
    pub product: Option<String>,
    /// Header holding the revenue (sales revenue or KPI target revenue).
    pub revenue: Option<String>,
    /// Header holding the reporting month, when present.
    pub month: Option<String>,
}

impl ColumnMapping {
    /// True when both the product and revenue columns resolved.
    pub fn is_complete(&self) -> bool {
        self.product.is_some() && self.revenue.is_some()
    }

    /// Logical names of required fields that did not resolve.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.product.is_none() {
            missing.push("product");
        }
        if self.revenue.is_none() {
            missing.push("revenue");
        }
        missing
    }
}
