use eood_map::{AliasConfig, resolve_column, resolve_kpi_columns, resolve_sales_columns};

fn headers(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

#[test]
fn resolves_vietnamese_sales_headers_verbatim() {
    let headers = headers(&["STT", " Tên Sản Phẩm ", "DOANH THU", "Tháng"]);
    let mapping = resolve_sales_columns(&headers, &AliasConfig::default());

    assert_eq!(mapping.product.as_deref(), Some(" Tên Sản Phẩm "));
    assert_eq!(mapping.revenue.as_deref(), Some("DOANH THU"));
    assert_eq!(mapping.month.as_deref(), Some("Tháng"));
    assert!(mapping.is_complete());
}

#[test]
fn resolves_english_sales_headers() {
    let headers = headers(&["product_name", "Sales", "Period"]);
    let mapping = resolve_sales_columns(&headers, &AliasConfig::default());

    assert_eq!(mapping.product.as_deref(), Some("product_name"));
    assert_eq!(mapping.revenue.as_deref(), Some("Sales"));
    assert_eq!(mapping.month.as_deref(), Some("Period"));
}

#[test]
fn missing_revenue_is_reported() {
    let headers = headers(&["product", "qty"]);
    let mapping = resolve_sales_columns(&headers, &AliasConfig::default());

    assert!(!mapping.is_complete());
    assert_eq!(mapping.missing_fields(), vec!["revenue"]);
    assert_eq!(mapping.month, None);
}

#[test]
fn kpi_columns_use_kpi_revenue_aliases() {
    let headers = headers(&["Tên sản phẩm", "Doanh thu", "KPI_Revenue"]);
    let mapping = resolve_kpi_columns(&headers, &AliasConfig::default());

    assert_eq!(mapping.product.as_deref(), Some("Tên sản phẩm"));
    assert_eq!(mapping.revenue.as_deref(), Some("KPI_Revenue"));
}

#[test]
fn resolution_does_not_touch_input() {
    let original = headers(&["  Product  ", "revenue"]);
    let copy = original.clone();
    let _ = resolve_column(&original, &["product"]);
    assert_eq!(original, copy);
}

#[test]
fn alias_config_fills_missing_fields_from_defaults() {
    let config: AliasConfig =
        serde_json::from_str(r#"{"revenue": ["net_sales"]}"#).expect("parse aliases");
    assert_eq!(config.revenue, vec!["net_sales".to_string()]);
    assert_eq!(config.product, AliasConfig::default().product);

    let headers = headers(&["Product", "Net_Sales", "revenue"]);
    let mapping = resolve_sales_columns(&headers, &config);
    assert_eq!(mapping.revenue.as_deref(), Some("Net_Sales"));
}
