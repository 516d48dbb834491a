//! Row to JSON-compatible structured record conversion for the analytics sink.

use indexmap::IndexMap;
use serde::Serialize;

use crate::codec::{self, Zone};
use crate::core::CursorRow;

/// JSON-compatible document with one field per source column, in cursor
/// order. Nulls are explicit entries, never omitted, so field count always
/// equals column count.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct StructuredRecord {
    fields: IndexMap<String, serde_json::Value>,
}

impl StructuredRecord {
    /// Look up a field by output name.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&serde_json::Value> {
        self.fields.get(field)
    }

    /// Check if a field is present.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Number of fields (equals the source column count).
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the record has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over (field name, value) pairs in cursor order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &serde_json::Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Consume the record, yielding the ordered field map.
    #[must_use]
    pub fn into_fields(self) -> IndexMap<String, serde_json::Value> {
        self.fields
    }
}

/// Converts cursor rows into [`StructuredRecord`]s.
///
/// Permissive where [`MutationConverter`](super::MutationConverter) is
/// strict: unrecognized types pass through unchanged because the analytics
/// sink accepts semi-structured data. Conversion never fails; the only
/// diagnostic is the oversized-clob truncation warning.
///
/// Holds only the alias policy and the formatting zone; safe to share across
/// worker threads, one row per call.
#[derive(Debug, Clone, Default)]
pub struct RecordConverter {
    use_alias: bool,
    zone: Zone,
}

impl RecordConverter {
    /// Create a converter with the given alias policy, formatting zoned
    /// values in the process-local time zone.
    #[must_use]
    pub fn new(use_alias: bool) -> Self {
        Self {
            use_alias,
            zone: Zone::Local,
        }
    }

    /// Pin the formatting zone (deterministic output for tests and pinned
    /// deployments).
    #[must_use]
    pub fn with_zone(mut self, zone: Zone) -> Self {
        self.zone = zone;
        self
    }

    /// Convert one row into one structured record.
    ///
    /// One entry per cursor column, in cursor order. The field name is the
    /// column alias when the alias policy is on and a non-empty alias is
    /// present, otherwise the raw column name.
    #[must_use]
    pub fn convert(&self, row: &CursorRow) -> StructuredRecord {
        let mut fields = IndexMap::with_capacity(row.len());

        for col in row.columns() {
            let name = col.desc.output_name(self.use_alias);
            let value = codec::record_value(&col.desc, &col.value, self.zone);
            fields.insert(name.to_string(), value);
        }

        StructuredRecord { fields }
    }
}
