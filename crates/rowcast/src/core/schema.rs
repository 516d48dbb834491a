//! Cursor row and column metadata types.
//!
//! These types are the read-only view an external reader supplies for each
//! fetched row: positional columns, each with its declared SQL type, an
//! optional display alias, and the materialized runtime value.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::value::CursorValue;

/// Declared SQL type of a column, as reported by the driver.
///
/// Variants mirror the JDBC type-code constants so readers can hand over raw
/// driver codes via [`SqlTypeCode::from_code`]. Unknown codes are carried in
/// [`SqlTypeCode::Other`] so error messages can still name them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SqlTypeCode {
    Varchar,
    Char,
    LongVarchar,
    BigInt,
    Integer,
    SmallInt,
    TinyInt,
    Boolean,
    Bit,
    Double,
    Float,
    Real,
    Timestamp,
    Time,
    Date,
    Numeric,
    Decimal,
    Clob,
    Blob,
    Array,
    Other(i32),
}

impl SqlTypeCode {
    /// Map a raw JDBC type code to the corresponding variant.
    #[must_use]
    pub fn from_code(code: i32) -> Self {
        match code {
            12 => SqlTypeCode::Varchar,
            1 => SqlTypeCode::Char,
            -1 => SqlTypeCode::LongVarchar,
            -5 => SqlTypeCode::BigInt,
            4 => SqlTypeCode::Integer,
            5 => SqlTypeCode::SmallInt,
            -6 => SqlTypeCode::TinyInt,
            16 => SqlTypeCode::Boolean,
            -7 => SqlTypeCode::Bit,
            8 => SqlTypeCode::Double,
            6 => SqlTypeCode::Float,
            7 => SqlTypeCode::Real,
            93 => SqlTypeCode::Timestamp,
            92 => SqlTypeCode::Time,
            91 => SqlTypeCode::Date,
            2 => SqlTypeCode::Numeric,
            3 => SqlTypeCode::Decimal,
            2005 => SqlTypeCode::Clob,
            2004 => SqlTypeCode::Blob,
            2003 => SqlTypeCode::Array,
            other => SqlTypeCode::Other(other),
        }
    }

    /// The raw JDBC type code for this variant.
    #[must_use]
    pub fn code(&self) -> i32 {
        match self {
            SqlTypeCode::Varchar => 12,
            SqlTypeCode::Char => 1,
            SqlTypeCode::LongVarchar => -1,
            SqlTypeCode::BigInt => -5,
            SqlTypeCode::Integer => 4,
            SqlTypeCode::SmallInt => 5,
            SqlTypeCode::TinyInt => -6,
            SqlTypeCode::Boolean => 16,
            SqlTypeCode::Bit => -7,
            SqlTypeCode::Double => 8,
            SqlTypeCode::Float => 6,
            SqlTypeCode::Real => 7,
            SqlTypeCode::Timestamp => 93,
            SqlTypeCode::Time => 92,
            SqlTypeCode::Date => 91,
            SqlTypeCode::Numeric => 2,
            SqlTypeCode::Decimal => 3,
            SqlTypeCode::Clob => 2005,
            SqlTypeCode::Blob => 2004,
            SqlTypeCode::Array => 2003,
            SqlTypeCode::Other(code) => *code,
        }
    }
}

impl fmt::Display for SqlTypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Column metadata, derived once per row from cursor metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Declared column name.
    pub name: String,

    /// Display alias from the query (column label), if any.
    pub alias: Option<String>,

    /// Declared SQL type code.
    pub type_code: SqlTypeCode,

    /// Driver-reported type name (case varies by driver, e.g. "DATETIME"
    /// from MySQL, "timestamp" from PostgreSQL).
    pub type_name: String,
}

impl ColumnDescriptor {
    /// Create a descriptor without an alias.
    pub fn new(
        name: impl Into<String>,
        type_code: SqlTypeCode,
        type_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            alias: None,
            type_code,
            type_name: type_name.into(),
        }
    }

    /// Set the display alias.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Output field name under the given alias policy.
    ///
    /// Returns the alias when the policy is on and the alias is non-empty,
    /// otherwise the raw column name.
    #[must_use]
    pub fn output_name(&self, use_alias: bool) -> &str {
        if use_alias {
            if let Some(alias) = &self.alias {
                if !alias.is_empty() {
                    return alias;
                }
            }
        }
        &self.name
    }
}

/// One column of a fetched row: metadata plus the materialized value.
#[derive(Debug, Clone, PartialEq)]
pub struct CursorColumn {
    /// Column metadata.
    pub desc: ColumnDescriptor,

    /// Materialized runtime value (may be [`CursorValue::Null`]).
    pub value: CursorValue,
}

impl CursorColumn {
    pub fn new(desc: ColumnDescriptor, value: CursorValue) -> Self {
        Self { desc, value }
    }
}

/// One fetched result-set row.
///
/// Ordered columns with positional and named metadata. Supplied by the
/// external reader; read-only to the conversion engine; lives for one
/// conversion call.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CursorRow {
    columns: Vec<CursorColumn>,
}

impl CursorRow {
    /// Create a row from ordered columns.
    pub fn new(columns: Vec<CursorColumn>) -> Self {
        Self { columns }
    }

    /// Append a column (builder-style, for readers assembling rows).
    #[must_use]
    pub fn with_column(mut self, desc: ColumnDescriptor, value: CursorValue) -> Self {
        self.columns.push(CursorColumn::new(desc, value));
        self
    }

    /// Columns in cursor order.
    #[must_use]
    pub fn columns(&self) -> &[CursorColumn] {
        &self.columns
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check if the row has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_code_round_trip() {
        for code in [12, 1, -1, -5, 4, 5, -6, 16, -7, 8, 6, 7, 93, 92, 91, 2, 3, 2005, 2004, 2003]
        {
            assert_eq!(SqlTypeCode::from_code(code).code(), code);
        }
        assert_eq!(SqlTypeCode::from_code(1111), SqlTypeCode::Other(1111));
        assert_eq!(SqlTypeCode::Other(1111).code(), 1111);
    }

    #[test]
    fn test_type_code_display_is_numeric() {
        assert_eq!(SqlTypeCode::Varchar.to_string(), "12");
        assert_eq!(SqlTypeCode::Other(1111).to_string(), "1111");
    }

    #[test]
    fn test_output_name_alias_policy() {
        let plain = ColumnDescriptor::new("user_id", SqlTypeCode::BigInt, "bigint");
        assert_eq!(plain.output_name(true), "user_id");
        assert_eq!(plain.output_name(false), "user_id");

        let aliased = plain.clone().with_alias("id");
        assert_eq!(aliased.output_name(true), "id");
        assert_eq!(aliased.output_name(false), "user_id");

        let empty_alias = plain.with_alias("");
        assert_eq!(empty_alias.output_name(true), "user_id");
    }

    #[test]
    fn test_row_preserves_column_order() {
        let row = CursorRow::default()
            .with_column(
                ColumnDescriptor::new("a", SqlTypeCode::Integer, "int"),
                CursorValue::I32(1),
            )
            .with_column(
                ColumnDescriptor::new("b", SqlTypeCode::Varchar, "varchar"),
                CursorValue::Text("x".to_string()),
            );

        assert_eq!(row.len(), 2);
        assert_eq!(row.columns()[0].desc.name, "a");
        assert_eq!(row.columns()[1].desc.name, "b");
    }
}
