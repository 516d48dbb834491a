//! Error types for row conversion.

use thiserror::Error;

use crate::core::SqlTypeCode;

/// Main error type for conversion operations.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// The mutation destination has no mapping rule for this SQL type.
    ///
    /// Fatal to the row being converted: no partial mutation is returned.
    #[error("unsupported column type: {column},{type_code}:{type_name}")]
    UnsupportedColumnType {
        column: String,
        type_code: SqlTypeCode,
        type_name: String,
    },

    /// The runtime value does not match the column's declared type
    /// (e.g. an integer-typed column carrying non-numeric text).
    #[error("invalid value in column {column}: {message}")]
    InvalidValue { column: String, message: String },
}

impl ConvertError {
    /// Create an UnsupportedColumnType error from column metadata.
    pub fn unsupported(
        column: impl Into<String>,
        type_code: SqlTypeCode,
        type_name: impl Into<String>,
    ) -> Self {
        ConvertError::UnsupportedColumnType {
            column: column.into(),
            type_code,
            type_name: type_name.into(),
        }
    }

    /// Create an InvalidValue error.
    pub fn invalid_value(column: impl Into<String>, message: impl Into<String>) -> Self {
        ConvertError::InvalidValue {
            column: column.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, ConvertError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_message_names_column_code_and_type() {
        let err = ConvertError::unsupported("payload", SqlTypeCode::Blob, "BLOB");
        let msg = err.to_string();
        assert!(msg.contains("payload"));
        assert!(msg.contains("2004"));
        assert!(msg.contains("BLOB"));
    }

    #[test]
    fn test_invalid_value_message() {
        let err = ConvertError::invalid_value("qty", "expected integer, got text");
        assert_eq!(
            err.to_string(),
            "invalid value in column qty: expected integer, got text"
        );
    }
}
