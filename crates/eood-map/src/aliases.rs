use serde::{Deserialize, Serialize};

pub const DEFAULT_PRODUCT_ALIASES: &[&str] =
    &["Tên sản phẩm", "ten san pham", "product", "product_name"];

pub const DEFAULT_REVENUE_ALIASES: &[&str] = &["Doanh thu", "doanhthu", "revenue", "sales"];

pub const DEFAULT_KPI_REVENUE_ALIASES: &[&str] = &[
    "KPI doanh thu",
    "kpi_doanh_thu",
    "doanh thu kpi",
    "kpi_revenue",
    "revenue_kpi",
];

pub const DEFAULT_MONTH_ALIASES: &[&str] = &["Tháng", "thang", "month", "period"];

/// Ordered header aliases per logical field.
///
/// Earlier aliases win when several are present in the same batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AliasConfig {
    pub product: Vec<String>,
    pub revenue: Vec<String>,
    pub kpi_revenue: Vec<String>,
    pub month: Vec<String>,
}

fn owned(aliases: &[&str]) -> Vec<String> {
    aliases.iter().map(|alias| (*alias).to_string()).collect()
}

impl Default for AliasConfig {
    fn default() -> Self {
        Self {
            product: owned(DEFAULT_PRODUCT_ALIASES),
            revenue: owned(DEFAULT_REVENUE_ALIASES),
            kpi_revenue: owned(DEFAULT_KPI_REVENUE_ALIASES),
            month: owned(DEFAULT_MONTH_ALIASES),
        }
    }
}
