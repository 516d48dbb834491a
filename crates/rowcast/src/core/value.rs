//! Runtime column values as materialized by the external reader.
//!
//! The engine performs no I/O of its own: by the time a [`CursorValue`]
//! reaches a converter, the cursor has already read it. Temporal values come
//! in two shapes because drivers disagree: some surface zone-naive calendar
//! values ([`CursorValue::DateTime`]), others surface zone-bearing instants
//! ([`CursorValue::Timestamp`]). The codec dispatches on that split.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Materialized value of one column in one fetched row.
#[derive(Debug, Clone, PartialEq)]
pub enum CursorValue {
    /// SQL NULL.
    Null,

    /// Boolean value.
    Bool(bool),

    /// 16-bit signed integer (smallint/tinyint).
    I16(i16),

    /// 32-bit signed integer (int).
    I32(i32),

    /// 64-bit signed integer (bigint).
    I64(i64),

    /// 32-bit floating point (real).
    F32(f32),

    /// 64-bit floating point (double precision/float).
    F64(f64),

    /// Text/string data.
    Text(String),

    /// UUID/GUID value.
    Uuid(Uuid),

    /// Decimal value with arbitrary precision.
    Decimal(Decimal),

    /// Calendar date without time component.
    Date(NaiveDate),

    /// Zone-naive timestamp: calendar fields are directly available.
    DateTime(NaiveDateTime),

    /// Zone-bearing instant, normalized to UTC by the reader.
    Timestamp(DateTime<Utc>),

    /// Time of day without date component.
    Time(NaiveTime),

    /// Large character object.
    Clob(Clob),

    /// Ordered list of primitive elements, already unwrapped by the reader.
    Array(Vec<ArrayElement>),

    /// Raw driver value with no dedicated representation, carried as JSON.
    Json(serde_json::Value),
}

impl CursorValue {
    /// Check if this value is NULL.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, CursorValue::Null)
    }
}

/// Large character object with its driver-reported logical length.
///
/// `length` is the total character count the driver claims for the column;
/// it can exceed the characters actually materialized in `text` when the
/// object is larger than what a single read can address.
#[derive(Debug, Clone, PartialEq)]
pub struct Clob {
    /// Materialized text (a prefix of the full object for oversized clobs).
    pub text: String,

    /// Driver-reported logical length in characters.
    pub length: u64,
}

impl Clob {
    /// Create a clob whose logical length matches the materialized text.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let length = text.chars().count() as u64;
        Self { text, length }
    }

    /// Create a clob with an explicit driver-reported length.
    pub fn with_length(text: impl Into<String>, length: u64) -> Self {
        Self {
            text: text.into(),
            length,
        }
    }
}

/// Element of an array-typed column.
///
/// Flat by construction: nested arrays are not representable, which keeps
/// element materialization from recursing into driver array metadata.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayElement {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl ArrayElement {
    /// JSON counterpart of this element.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            ArrayElement::Null => serde_json::Value::Null,
            ArrayElement::Bool(v) => serde_json::Value::Bool(*v),
            ArrayElement::Int(v) => serde_json::Value::from(*v),
            ArrayElement::Float(v) => serde_json::Value::from(*v),
            ArrayElement::Text(v) => serde_json::Value::String(v.clone()),
        }
    }
}

// Convenience From impls for readers assembling rows.
impl From<bool> for CursorValue {
    fn from(v: bool) -> Self {
        CursorValue::Bool(v)
    }
}

impl From<i16> for CursorValue {
    fn from(v: i16) -> Self {
        CursorValue::I16(v)
    }
}

impl From<i32> for CursorValue {
    fn from(v: i32) -> Self {
        CursorValue::I32(v)
    }
}

impl From<i64> for CursorValue {
    fn from(v: i64) -> Self {
        CursorValue::I64(v)
    }
}

impl From<f32> for CursorValue {
    fn from(v: f32) -> Self {
        CursorValue::F32(v)
    }
}

impl From<f64> for CursorValue {
    fn from(v: f64) -> Self {
        CursorValue::F64(v)
    }
}

impl From<String> for CursorValue {
    fn from(v: String) -> Self {
        CursorValue::Text(v)
    }
}

impl From<&str> for CursorValue {
    fn from(v: &str) -> Self {
        CursorValue::Text(v.to_string())
    }
}

impl From<Uuid> for CursorValue {
    fn from(v: Uuid) -> Self {
        CursorValue::Uuid(v)
    }
}

impl From<Decimal> for CursorValue {
    fn from(v: Decimal) -> Self {
        CursorValue::Decimal(v)
    }
}

impl From<NaiveDate> for CursorValue {
    fn from(v: NaiveDate) -> Self {
        CursorValue::Date(v)
    }
}

impl From<NaiveDateTime> for CursorValue {
    fn from(v: NaiveDateTime) -> Self {
        CursorValue::DateTime(v)
    }
}

impl From<DateTime<Utc>> for CursorValue {
    fn from(v: DateTime<Utc>) -> Self {
        CursorValue::Timestamp(v)
    }
}

impl From<NaiveTime> for CursorValue {
    fn from(v: NaiveTime) -> Self {
        CursorValue::Time(v)
    }
}

impl From<Clob> for CursorValue {
    fn from(v: Clob) -> Self {
        CursorValue::Clob(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_null() {
        assert!(CursorValue::Null.is_null());
        assert!(!CursorValue::I32(42).is_null());
    }

    #[test]
    fn test_clob_new_counts_chars() {
        let clob = Clob::new("héllo");
        assert_eq!(clob.length, 5);

        let clob = Clob::with_length("prefix", 10_000_000_000);
        assert_eq!(clob.length, 10_000_000_000);
        assert_eq!(clob.text, "prefix");
    }

    #[test]
    fn test_array_element_to_json() {
        assert_eq!(ArrayElement::Null.to_json(), serde_json::Value::Null);
        assert_eq!(ArrayElement::Int(3).to_json(), serde_json::json!(3));
        assert_eq!(
            ArrayElement::Text("a".to_string()).to_json(),
            serde_json::json!("a")
        );
    }

    #[test]
    fn test_from_implementations() {
        assert_eq!(CursorValue::from(42i64), CursorValue::I64(42));
        assert_eq!(
            CursorValue::from("hello"),
            CursorValue::Text("hello".to_string())
        );
    }
}
