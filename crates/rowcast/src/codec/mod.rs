//! Column value codec: per-column conversion rules for both destinations.
//!
//! Two independent rule sets over one (declared type, runtime value) pair:
//!
//! - **Mutation-bound** ([`MutationClass`]): keyed on the declared
//!   [`SqlTypeCode`], producing a strongly-typed [`MutationValue`] for the
//!   distributed table store. Strict: a type with no mapping rule fails the
//!   whole row with [`ConvertError::UnsupportedColumnType`].
//! - **Record-bound** ([`RecordClass`]): keyed on the lower-cased driver
//!   type name (MySQL reports names in caps, PostgreSQL in lower case),
//!   producing a JSON value for the analytics sink. Permissive: unrecognized
//!   types pass through as their JSON counterparts.
//!
//! All functions are pure and stateless; the only side effect is the
//! truncation warning logged for oversized clobs.

use std::borrow::Cow;

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use rust_decimal::prelude::ToPrimitive;

use crate::core::{ArrayElement, Clob, ColumnDescriptor, CursorValue, SqlTypeCode};
use crate::error::{ConvertError, Result};

/// Output pattern for `date`-typed record fields.
const DATE_FORMAT: &str = "%Y-%m-%d";
/// Output pattern for zone-naive `datetime` record fields (6-digit fraction).
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";
/// Output pattern for zoned record fields (6-digit fraction + offset).
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f%:z";

/// Maximum clob characters the record destination materializes.
///
/// Mirrors the largest addressable text length of a single read; anything
/// beyond is truncated with a warning rather than failing the row.
pub const MAX_CLOB_CHARS: u64 = i32::MAX as u64;

/// Typed value bound for the table store's mutation API.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationValue {
    Text(String),
    Int64(i64),
    Bool(bool),
    Float64(f64),
    Timestamp(DateTime<Utc>),
}

/// Mutation-destination type class.
///
/// Every [`SqlTypeCode`] variant gets an explicit decision in
/// [`MutationClass::classify`]; a `None` there is the reviewable record that
/// the store has no rule for that type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationClass {
    /// Character types: stringify via the value's display form.
    Text,
    /// Integer types: widen or parse to 64-bit signed.
    Int64,
    /// Boolean/bit.
    Bool,
    /// Floating types: widen to double.
    Float64,
    /// Temporal types: convert to the store's timestamp, preserving the instant.
    Timestamp,
}

impl MutationClass {
    /// Classify a declared SQL type for the mutation destination.
    #[must_use]
    pub fn classify(code: SqlTypeCode) -> Option<Self> {
        match code {
            SqlTypeCode::Varchar | SqlTypeCode::Char | SqlTypeCode::LongVarchar => {
                Some(MutationClass::Text)
            }
            SqlTypeCode::BigInt
            | SqlTypeCode::Integer
            | SqlTypeCode::SmallInt
            | SqlTypeCode::TinyInt => Some(MutationClass::Int64),
            SqlTypeCode::Boolean | SqlTypeCode::Bit => Some(MutationClass::Bool),
            SqlTypeCode::Double | SqlTypeCode::Float | SqlTypeCode::Real => {
                Some(MutationClass::Float64)
            }
            SqlTypeCode::Timestamp | SqlTypeCode::Time => Some(MutationClass::Timestamp),
            SqlTypeCode::Date
            | SqlTypeCode::Numeric
            | SqlTypeCode::Decimal
            | SqlTypeCode::Clob
            | SqlTypeCode::Blob
            | SqlTypeCode::Array
            | SqlTypeCode::Other(_) => None,
        }
    }
}

/// Record-destination type class, keyed on the lower-cased type name.
///
/// Array columns are detected from the value shape before this dispatch,
/// so they have no class here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordClass {
    Date,
    DateTime,
    Timestamp,
    Clob,
    /// No special rule: the raw value passes through unchanged.
    Other,
}

impl RecordClass {
    /// Classify a driver-reported type name (case-insensitive).
    #[must_use]
    pub fn classify(type_name: &str) -> Self {
        match type_name.to_lowercase().as_str() {
            "date" => RecordClass::Date,
            "datetime" => RecordClass::DateTime,
            "timestamp" => RecordClass::Timestamp,
            "clob" => RecordClass::Clob,
            _ => RecordClass::Other,
        }
    }
}

/// Time zone the record destination formats zoned values in.
///
/// Defaults to the process-local zone; a fixed offset makes formatting
/// deterministic for tests and pinned deployments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Zone {
    #[default]
    Local,
    Fixed(FixedOffset),
}

impl Zone {
    /// View a UTC instant in this zone.
    fn to_fixed(self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        match self {
            Zone::Local => instant.with_timezone(&Local).fixed_offset(),
            Zone::Fixed(offset) => instant.with_timezone(&offset),
        }
    }

    /// Interpret a zone-naive wall-clock reading in this zone.
    ///
    /// Returns `None` for wall-clock values that do not exist in the local
    /// zone (spring-forward gap).
    fn attach(self, naive: NaiveDateTime) -> Option<DateTime<FixedOffset>> {
        match self {
            Zone::Local => Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.fixed_offset()),
            Zone::Fixed(offset) => offset.from_local_datetime(&naive).earliest(),
        }
    }
}

/// Convert one non-null column to its mutation-bound typed value.
///
/// The caller is responsible for skipping nulls and ignored columns first.
pub fn mutation_value(desc: &ColumnDescriptor, value: &CursorValue) -> Result<MutationValue> {
    let class = MutationClass::classify(desc.type_code).ok_or_else(|| {
        ConvertError::unsupported(&desc.name, desc.type_code, &desc.type_name)
    })?;

    match class {
        MutationClass::Text => Ok(MutationValue::Text(display_string(value))),
        MutationClass::Int64 => as_i64(desc, value).map(MutationValue::Int64),
        MutationClass::Bool => as_bool(desc, value).map(MutationValue::Bool),
        MutationClass::Float64 => as_f64(desc, value).map(MutationValue::Float64),
        MutationClass::Timestamp => as_instant(desc, value).map(MutationValue::Timestamp),
    }
}

/// Convert one column to its record-bound JSON value.
///
/// Null is explicit JSON null. Array values become ordered lists regardless
/// of the reported type name. Everything else dispatches on the type name;
/// unrecognized names pass the raw value through.
pub fn record_value(desc: &ColumnDescriptor, value: &CursorValue, zone: Zone) -> serde_json::Value {
    if value.is_null() {
        return serde_json::Value::Null;
    }

    if let CursorValue::Array(elements) = value {
        return serde_json::Value::Array(elements.iter().map(ArrayElement::to_json).collect());
    }

    match RecordClass::classify(&desc.type_name) {
        RecordClass::Date => match value {
            CursorValue::Date(d) => format_date(*d),
            // Time-of-day is ignored: only the calendar date survives.
            CursorValue::DateTime(dt) => format_date(dt.date()),
            CursorValue::Timestamp(ts) => format_date(zone.to_fixed(*ts).date_naive()),
            other => passthrough(other),
        },
        RecordClass::DateTime => match value {
            // Calendar fields directly available: zone-naive output.
            CursorValue::DateTime(dt) => {
                serde_json::Value::String(dt.format(DATETIME_FORMAT).to_string())
            }
            // Instant-shaped: attach the process zone and keep the offset.
            CursorValue::Timestamp(ts) => format_zoned(zone.to_fixed(*ts)),
            other => passthrough(other),
        },
        RecordClass::Timestamp => match value {
            CursorValue::Timestamp(ts) => format_zoned(zone.to_fixed(*ts)),
            CursorValue::DateTime(dt) => match zone.attach(*dt) {
                Some(zoned) => format_zoned(zoned),
                None => passthrough(value),
            },
            other => passthrough(other),
        },
        RecordClass::Clob => match value {
            CursorValue::Clob(clob) => {
                serde_json::Value::String(read_clob(&desc.name, clob).into_owned())
            }
            CursorValue::Text(s) => serde_json::Value::String(s.clone()),
            other => passthrough(other),
        },
        RecordClass::Other => passthrough(value),
    }
}

/// Materialize a clob, truncating oversized objects with a warning.
pub fn read_clob<'a>(column: &str, clob: &'a Clob) -> Cow<'a, str> {
    if clob.length > MAX_CLOB_CHARS {
        tracing::warn!(
            column = %column,
            length = clob.length,
            "clob length exceeds {} characters and will be truncated",
            MAX_CLOB_CHARS
        );
        clamp_chars(&clob.text, MAX_CLOB_CHARS as usize)
    } else {
        Cow::Borrowed(&clob.text)
    }
}

/// Truncate a string to at most `max` characters.
fn clamp_chars(text: &str, max: usize) -> Cow<'_, str> {
    match text.char_indices().nth(max) {
        Some((byte_idx, _)) => Cow::Borrowed(&text[..byte_idx]),
        None => Cow::Borrowed(text),
    }
}

fn format_date(date: NaiveDate) -> serde_json::Value {
    serde_json::Value::String(date.format(DATE_FORMAT).to_string())
}

fn format_zoned(zoned: DateTime<FixedOffset>) -> serde_json::Value {
    serde_json::Value::String(zoned.format(TIMESTAMP_FORMAT).to_string())
}

/// Default display form of a value, for character-typed mutation columns.
fn display_string(value: &CursorValue) -> String {
    match value {
        CursorValue::Null => "null".to_string(),
        CursorValue::Bool(v) => v.to_string(),
        CursorValue::I16(v) => v.to_string(),
        CursorValue::I32(v) => v.to_string(),
        CursorValue::I64(v) => v.to_string(),
        CursorValue::F32(v) => v.to_string(),
        CursorValue::F64(v) => v.to_string(),
        CursorValue::Text(v) => v.clone(),
        CursorValue::Uuid(v) => v.to_string(),
        CursorValue::Decimal(v) => v.to_string(),
        CursorValue::Date(v) => v.to_string(),
        CursorValue::DateTime(v) => v.to_string(),
        CursorValue::Timestamp(v) => v.to_string(),
        CursorValue::Time(v) => v.to_string(),
        CursorValue::Clob(v) => v.text.clone(),
        CursorValue::Array(elements) => {
            serde_json::Value::Array(elements.iter().map(ArrayElement::to_json).collect())
                .to_string()
        }
        CursorValue::Json(v) => v.to_string(),
    }
}

fn as_i64(desc: &ColumnDescriptor, value: &CursorValue) -> Result<i64> {
    match value {
        CursorValue::I16(v) => Ok(i64::from(*v)),
        CursorValue::I32(v) => Ok(i64::from(*v)),
        CursorValue::I64(v) => Ok(*v),
        CursorValue::Text(s) => s.trim().parse::<i64>().map_err(|e| {
            ConvertError::invalid_value(&desc.name, format!("cannot parse {s:?} as i64: {e}"))
        }),
        other => Err(ConvertError::invalid_value(
            &desc.name,
            format!("expected integer value, got {other:?}"),
        )),
    }
}

fn as_bool(desc: &ColumnDescriptor, value: &CursorValue) -> Result<bool> {
    match value {
        CursorValue::Bool(v) => Ok(*v),
        // Drivers commonly surface bit columns as tiny integers.
        CursorValue::I16(v) => Ok(*v != 0),
        CursorValue::I32(v) => Ok(*v != 0),
        CursorValue::I64(v) => Ok(*v != 0),
        CursorValue::Text(s) => match s.trim() {
            "1" => Ok(true),
            "0" => Ok(false),
            s if s.eq_ignore_ascii_case("true") => Ok(true),
            s if s.eq_ignore_ascii_case("false") => Ok(false),
            other => Err(ConvertError::invalid_value(
                &desc.name,
                format!("cannot read {other:?} as boolean"),
            )),
        },
        other => Err(ConvertError::invalid_value(
            &desc.name,
            format!("expected boolean value, got {other:?}"),
        )),
    }
}

fn as_f64(desc: &ColumnDescriptor, value: &CursorValue) -> Result<f64> {
    match value {
        CursorValue::F32(v) => Ok(f64::from(*v)),
        CursorValue::F64(v) => Ok(*v),
        CursorValue::I16(v) => Ok(f64::from(*v)),
        CursorValue::I32(v) => Ok(f64::from(*v)),
        CursorValue::I64(v) => Ok(*v as f64),
        CursorValue::Decimal(v) => v.to_f64().ok_or_else(|| {
            ConvertError::invalid_value(&desc.name, format!("decimal {v} does not fit in f64"))
        }),
        CursorValue::Text(s) => s.trim().parse::<f64>().map_err(|e| {
            ConvertError::invalid_value(&desc.name, format!("cannot parse {s:?} as f64: {e}"))
        }),
        other => Err(ConvertError::invalid_value(
            &desc.name,
            format!("expected floating-point value, got {other:?}"),
        )),
    }
}

/// Read a temporal value as a UTC instant for the mutation destination.
///
/// Zone-naive datetimes are read as UTC; times sit on the epoch date.
fn as_instant(desc: &ColumnDescriptor, value: &CursorValue) -> Result<DateTime<Utc>> {
    match value {
        CursorValue::Timestamp(ts) => Ok(*ts),
        CursorValue::DateTime(dt) => Ok(dt.and_utc()),
        CursorValue::Date(d) => {
            let midnight = d.and_hms_opt(0, 0, 0).ok_or_else(|| {
                ConvertError::invalid_value(&desc.name, format!("invalid date {d}"))
            })?;
            Ok(midnight.and_utc())
        }
        CursorValue::Time(t) => {
            let epoch = NaiveDate::from_ymd_opt(1970, 1, 1)
                .expect("epoch date is valid")
                .and_time(*t);
            Ok(epoch.and_utc())
        }
        other => Err(ConvertError::invalid_value(
            &desc.name,
            format!("expected temporal value, got {other:?}"),
        )),
    }
}

/// JSON counterpart of a raw value, used for the permissive default branch.
fn passthrough(value: &CursorValue) -> serde_json::Value {
    match value {
        CursorValue::Null => serde_json::Value::Null,
        CursorValue::Bool(v) => serde_json::Value::Bool(*v),
        CursorValue::I16(v) => serde_json::Value::from(*v),
        CursorValue::I32(v) => serde_json::Value::from(*v),
        CursorValue::I64(v) => serde_json::Value::from(*v),
        CursorValue::F32(v) => serde_json::Value::from(f64::from(*v)),
        CursorValue::F64(v) => serde_json::Value::from(*v),
        CursorValue::Text(v) => serde_json::Value::String(v.clone()),
        // No native JSON form: string keeps these lossless.
        CursorValue::Uuid(v) => serde_json::Value::String(v.to_string()),
        CursorValue::Decimal(v) => serde_json::Value::String(v.to_string()),
        CursorValue::Date(v) => serde_json::Value::String(v.to_string()),
        CursorValue::DateTime(v) => serde_json::Value::String(v.to_string()),
        CursorValue::Timestamp(v) => serde_json::Value::String(v.to_rfc3339()),
        CursorValue::Time(v) => serde_json::Value::String(v.to_string()),
        CursorValue::Clob(v) => serde_json::Value::String(v.text.clone()),
        CursorValue::Array(elements) => {
            serde_json::Value::Array(elements.iter().map(ArrayElement::to_json).collect())
        }
        CursorValue::Json(v) => v.clone(),
    }
}
