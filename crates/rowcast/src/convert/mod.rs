//! Row converters, one per destination.
//!
//! - [`mutation`]: strict, typed conversion for the distributed table store
//! - [`record`]: permissive, JSON-shaped conversion for the analytics sink
//! - [`naming`]: table rename rules applied at converter construction
//!
//! Iteration is driven externally: the pipeline hands each fetched row to
//! exactly one converter and consumes exactly one output record (or one
//! error). The converters share no state between calls.

pub mod mutation;
pub mod naming;
pub mod record;

pub use mutation::{MutationConverter, MutationRecord};
pub use naming::{TableNameMap, TableNameRule};
pub use record::{RecordConverter, StructuredRecord};
