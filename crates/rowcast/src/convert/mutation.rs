//! Row to upsert mutation conversion for the distributed table store.

use std::collections::{HashMap, HashSet};

use crate::codec::{self, MutationValue};
use crate::core::CursorRow;
use crate::error::Result;

use super::naming::TableNameMap;

/// One upsert-style change record targeting a table in the store.
///
/// Field order carries no meaning for the store's mutation API, so fields
/// live in a plain map keyed by column name. Null-valued and ignored columns
/// are never present.
#[derive(Debug, Clone, PartialEq)]
pub struct MutationRecord {
    table: String,
    fields: HashMap<String, MutationValue>,
}

impl MutationRecord {
    /// Target table name (already normalized).
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Look up a field by column name.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&MutationValue> {
        self.fields.get(column)
    }

    /// Check if a column is present.
    #[must_use]
    pub fn contains(&self, column: &str) -> bool {
        self.fields.contains_key(column)
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the mutation carries no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over (column name, value) pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MutationValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Converts cursor rows into [`MutationRecord`]s.
///
/// Fixed configuration only (target table, ignore-set); no per-row state.
/// Safe to share across worker threads, one row per call.
#[derive(Debug, Clone)]
pub struct MutationConverter {
    table: String,
    ignore: HashSet<String>,
}

impl MutationConverter {
    /// Create a converter targeting `table`.
    ///
    /// The table name is normalized through `renames` once, here; columns in
    /// `ignore` (exact name match) are skipped before type dispatch.
    pub fn new(
        table: impl Into<String>,
        ignore: HashSet<String>,
        renames: &TableNameMap,
    ) -> Self {
        let table = table.into();
        Self {
            table: renames.normalize(&table).to_string(),
            ignore,
        }
    }

    /// Normalized target table name.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Convert one row into one mutation.
    ///
    /// Columns are processed in cursor order. Null-valued and ignored
    /// columns are skipped; any column whose declared type has no mutation
    /// rule fails the whole row, returning no partial record.
    pub fn convert(&self, row: &CursorRow) -> Result<MutationRecord> {
        let mut fields = HashMap::with_capacity(row.len());

        for col in row.columns() {
            if col.value.is_null() {
                continue;
            }
            if self.ignore.contains(&col.desc.name) {
                continue;
            }
            let value = codec::mutation_value(&col.desc, &col.value)?;
            fields.insert(col.desc.name.clone(), value);
        }

        Ok(MutationRecord {
            table: self.table.clone(),
            fields,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ColumnDescriptor, CursorRow, CursorValue, SqlTypeCode};
    use crate::error::ConvertError;
    use chrono::{TimeZone, Utc};

    fn converter(table: &str, ignore: &[&str]) -> MutationConverter {
        MutationConverter::new(
            table,
            ignore.iter().map(|s| s.to_string()).collect(),
            &TableNameMap::new(),
        )
    }

    fn sample_row() -> CursorRow {
        CursorRow::default()
            .with_column(
                ColumnDescriptor::new("id", SqlTypeCode::BigInt, "bigint"),
                CursorValue::I64(7),
            )
            .with_column(
                ColumnDescriptor::new("name", SqlTypeCode::Varchar, "varchar"),
                CursorValue::Text("alice".to_string()),
            )
            .with_column(
                ColumnDescriptor::new("active", SqlTypeCode::Boolean, "bool"),
                CursorValue::Bool(true),
            )
            .with_column(
                ColumnDescriptor::new("score", SqlTypeCode::Double, "float8"),
                CursorValue::F64(9.5),
            )
            .with_column(
                ColumnDescriptor::new("updated_at", SqlTypeCode::Timestamp, "timestamp"),
                CursorValue::Timestamp(Utc.with_ymd_and_hms(2024, 3, 5, 10, 15, 30).unwrap()),
            )
    }

    #[test]
    fn test_convert_typed_round_trip() {
        let mutation = converter("users", &[]).convert(&sample_row()).unwrap();

        assert_eq!(mutation.table(), "users");
        assert_eq!(mutation.len(), 5);
        assert_eq!(mutation.get("id"), Some(&MutationValue::Int64(7)));
        assert_eq!(
            mutation.get("name"),
            Some(&MutationValue::Text("alice".to_string()))
        );
        assert_eq!(mutation.get("active"), Some(&MutationValue::Bool(true)));
        assert_eq!(mutation.get("score"), Some(&MutationValue::Float64(9.5)));
        assert_eq!(
            mutation.get("updated_at"),
            Some(&MutationValue::Timestamp(
                Utc.with_ymd_and_hms(2024, 3, 5, 10, 15, 30).unwrap()
            ))
        );
    }

    #[test]
    fn test_null_columns_are_omitted() {
        let row = CursorRow::default()
            .with_column(
                ColumnDescriptor::new("id", SqlTypeCode::BigInt, "bigint"),
                CursorValue::I64(1),
            )
            .with_column(
                ColumnDescriptor::new("note", SqlTypeCode::Varchar, "varchar"),
                CursorValue::Null,
            );

        let mutation = converter("users", &[]).convert(&row).unwrap();
        assert!(mutation.contains("id"));
        assert!(!mutation.contains("note"));
        assert_eq!(mutation.len(), 1);
    }

    #[test]
    fn test_ignored_columns_never_appear() {
        let mutation = converter("users", &["name", "score"])
            .convert(&sample_row())
            .unwrap();
        assert!(!mutation.contains("name"));
        assert!(!mutation.contains("score"));
        assert!(mutation.contains("id"));
    }

    #[test]
    fn test_ignore_skips_before_type_dispatch() {
        // The ignored column has no mutation rule; ignoring it must win.
        let row = CursorRow::default()
            .with_column(
                ColumnDescriptor::new("id", SqlTypeCode::BigInt, "bigint"),
                CursorValue::I64(1),
            )
            .with_column(
                ColumnDescriptor::new("payload", SqlTypeCode::Blob, "blob"),
                CursorValue::Json(serde_json::json!("blob")),
            );

        let mutation = converter("users", &["payload"]).convert(&row).unwrap();
        assert_eq!(mutation.len(), 1);
    }

    #[test]
    fn test_unsupported_type_fails_whole_row() {
        let row = sample_row().with_column(
            ColumnDescriptor::new("payload", SqlTypeCode::Blob, "BLOB"),
            CursorValue::Json(serde_json::json!("blob")),
        );

        let err = converter("users", &[]).convert(&row).unwrap_err();
        match err {
            ConvertError::UnsupportedColumnType { column, .. } => assert_eq!(column, "payload"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_table_name_normalized_at_construction() {
        let renames = TableNameMap::new().with_prefix("deposit_transaction_queue");
        let conv = MutationConverter::new(
            "deposit_transaction_queue_shard_12",
            HashSet::new(),
            &renames,
        );
        assert_eq!(conv.table(), "deposit_transaction_queue");

        let mutation = conv.convert(&CursorRow::default()).unwrap();
        assert_eq!(mutation.table(), "deposit_transaction_queue");
    }
}
