//! Table name normalization for the mutation destination.

use serde::{Deserialize, Serialize};

/// Ordered prefix-to-canonical table rename rules.
///
/// Physical tables are often sharded with a suffix appended to a logical
/// name; the mutation destination wants the logical name. A rule collapses
/// any table whose name starts with the rule's prefix to the rule's
/// canonical name. Rules are checked in insertion order; the first match
/// wins. An empty map leaves every name unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableNameMap {
    rules: Vec<TableNameRule>,
}

/// One prefix-to-canonical rename rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableNameRule {
    /// Prefix the physical table name must start with.
    pub prefix: String,

    /// Canonical logical name every match collapses to.
    pub canonical: String,
}

impl TableNameMap {
    /// Create an empty map (identity normalization).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule collapsing `prefix`-named tables to `canonical`.
    #[must_use]
    pub fn with_rule(mut self, prefix: impl Into<String>, canonical: impl Into<String>) -> Self {
        self.rules.push(TableNameRule {
            prefix: prefix.into(),
            canonical: canonical.into(),
        });
        self
    }

    /// Add a rule collapsing a sharded family to its own prefix
    /// (e.g. `orders_shard_3` becomes `orders`).
    #[must_use]
    pub fn with_prefix(self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let canonical = prefix.clone();
        self.with_rule(prefix, canonical)
    }

    /// Normalize a physical table name to its canonical logical name.
    #[must_use]
    pub fn normalize<'a>(&'a self, table: &'a str) -> &'a str {
        self.rules
            .iter()
            .find(|rule| table.starts_with(rule.prefix.as_str()))
            .map_or(table, |rule| rule.canonical.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_map_is_identity() {
        let map = TableNameMap::new();
        assert_eq!(map.normalize("orders_2024"), "orders_2024");
    }

    #[test]
    fn test_prefix_collapses_any_suffix() {
        let map = TableNameMap::new().with_prefix("deposit_transaction_queue");
        assert_eq!(
            map.normalize("deposit_transaction_queue_shard_07"),
            "deposit_transaction_queue"
        );
        assert_eq!(
            map.normalize("deposit_transaction_queue"),
            "deposit_transaction_queue"
        );
        assert_eq!(map.normalize("other_table"), "other_table");
    }

    #[test]
    fn test_first_matching_rule_wins() {
        let map = TableNameMap::new()
            .with_rule("orders_eu", "orders_europe")
            .with_rule("orders", "orders");
        assert_eq!(map.normalize("orders_eu_05"), "orders_europe");
        assert_eq!(map.normalize("orders_us_05"), "orders");
    }
}
