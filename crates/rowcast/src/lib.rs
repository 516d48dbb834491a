//! # rowcast
//!
//! Convert relational cursor rows into two downstream representations:
//!
//! - **Mutations**: typed upsert change records for a distributed table
//!   store ([`MutationConverter`])
//! - **Structured records**: JSON-compatible documents for an analytics
//!   warehouse ([`RecordConverter`])
//!
//! Both conversions are deterministic, lossless for supported types, and
//! fail loudly for unsupported types on the mutation path. The library owns
//! no I/O: an external reader materializes one [`CursorRow`] per fetched row
//! and drives iteration; writers consume the outputs.
//!
//! ## Example
//!
//! ```rust
//! use std::collections::HashSet;
//! use rowcast::{
//!     ColumnDescriptor, CursorRow, CursorValue, MutationConverter, RecordConverter,
//!     SqlTypeCode, TableNameMap,
//! };
//!
//! let row = CursorRow::default()
//!     .with_column(
//!         ColumnDescriptor::new("id", SqlTypeCode::BigInt, "bigint"),
//!         CursorValue::I64(42),
//!     )
//!     .with_column(
//!         ColumnDescriptor::new("name", SqlTypeCode::Varchar, "varchar"),
//!         CursorValue::from("alice"),
//!     );
//!
//! let mutations = MutationConverter::new("users", HashSet::new(), &TableNameMap::new());
//! let mutation = mutations.convert(&row)?;
//! assert_eq!(mutation.table(), "users");
//!
//! let records = RecordConverter::new(false);
//! let record = records.convert(&row);
//! assert_eq!(record.len(), 2);
//! # Ok::<(), rowcast::ConvertError>(())
//! ```

pub mod codec;
pub mod convert;
pub mod core;
pub mod error;

// Re-exports for convenient access
pub use crate::codec::{MutationValue, Zone};
pub use crate::convert::{
    MutationConverter, MutationRecord, RecordConverter, StructuredRecord, TableNameMap,
    TableNameRule,
};
pub use crate::core::{
    ArrayElement, Clob, ColumnDescriptor, CursorColumn, CursorRow, CursorValue, SqlTypeCode,
};
pub use crate::error::{ConvertError, Result};
