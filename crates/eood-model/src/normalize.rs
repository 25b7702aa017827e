//! Shared normalization for product names, headers and numeric cells.

/// Trims and lower-cases a product name or header for matching.
///
/// The same normalization is used for KPI registry keys, product statistics
/// keys and classification lookups; any divergence silently breaks matching.
pub fn normalize_key(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Parses a revenue-like cell, dropping thousands separators.
///
/// Empty, unparsable and non-finite values become `0.0`.
pub fn parse_amount(raw: &str) -> f64 {
    let cleaned = raw.trim().replace(',', "");
    if cleaned.is_empty() {
        return 0.0;
    }
    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize_key("  Foo "), "foo");
        assert_eq!(normalize_key("Tên Sản Phẩm"), "tên sản phẩm");
        assert_eq!(normalize_key("   "), "");
    }

    #[test]
    fn parse_amount_strips_thousands_separators() {
        assert_eq!(parse_amount("1,200"), 1200.0);
        assert_eq!(parse_amount(" 1,234,567.5 "), 1_234_567.5);
        assert_eq!(parse_amount("-42"), -42.0);
    }

    #[test]
    fn parse_amount_defaults_to_zero() {
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("n/a"), 0.0);
        assert_eq!(parse_amount("NaN"), 0.0);
        assert_eq!(parse_amount("inf"), 0.0);
    }
}
