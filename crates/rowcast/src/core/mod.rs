//! Core data model for cursor rows.
//!
//! - [`schema`]: column metadata and the row view supplied by the reader
//! - [`value`]: materialized runtime values
//!
//! These types are the boundary with the external cursor/reader collaborator:
//! the reader builds one [`CursorRow`] per fetched row, hands it to a
//! converter, and discards it. The engine never fetches rows itself.

pub mod schema;
pub mod value;

pub use schema::{ColumnDescriptor, CursorColumn, CursorRow, SqlTypeCode};
pub use value::{ArrayElement, Clob, CursorValue};
