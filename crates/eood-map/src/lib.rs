//! Column resolution for heterogeneous sales and KPI sources.
//!
//! Source files name the same logical field differently (`Tên sản phẩm`,
//! `product_name`, `Product`). Each logical field has an ordered alias list and
//! a single resolver picks the first alias present among a batch's headers.

#![deny(unsafe_code)]

mod aliases;
mod resolver;

pub use aliases::{
    AliasConfig, DEFAULT_KPI_REVENUE_ALIASES, DEFAULT_MONTH_ALIASES, DEFAULT_PRODUCT_ALIASES,
    DEFAULT_REVENUE_ALIASES,
};
pub use resolver::{HeaderIndex, resolve_column, resolve_kpi_columns, resolve_sales_columns};
