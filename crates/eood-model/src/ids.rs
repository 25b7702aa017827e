use std::fmt;

use crate::normalize::normalize_key;

/// Normalized product name used as the join key between KPI and sales data.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ProductKey(String);

impl ProductKey {
    /// Normalizes a raw product name; blank names yield `None`.
    pub fn new(raw: &str) -> Option<Self> {
        let key = normalize_key(raw);
        if key.is_empty() {
            None
        } else {
            Some(Self(key))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the name is flagged as a new product (`(new)` or ` new`).
    pub fn is_novel(&self) -> bool {
        self.0.contains("(new)") || self.0.contains(" new")
    }
}

impl fmt::Display for ProductKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_names_have_no_key() {
        assert!(ProductKey::new("").is_none());
        assert!(ProductKey::new("  \t").is_none());
        assert_eq!(ProductKey::new("  Foo ").unwrap().as_str(), "foo");
    }

    #[test]
    fn novelty_markers() {
        assert!(ProductKey::new("Widget (New)").unwrap().is_novel());
        assert!(ProductKey::new("Brand NEW widget").unwrap().is_novel());
        assert!(!ProductKey::new("Renewal kit").unwrap().is_novel());
        assert!(!ProductKey::new("New").unwrap().is_novel());
    }
}
