//! Record Module
//!
//! In-memory value object: one identifier plus an ordered mapping of
//! sub-keys to values.
//!
//! ## Responsibilities
//! - Field access by sub-key, by ordinal position and by range
//! - Set-like algebra between records and plain mappings (see `algebra`)
//! - Human-readable rendering
//!
//! Records never hold a handle to the store; persisting one goes through
//! [`FileStore::store`](crate::store::FileStore::store).

mod algebra;
mod operand;

use std::fmt;
use std::ops::Range;

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{MonoError, Result};

pub use algebra::MAX_SPLIT;
pub use operand::{Operand, SetOutcome};

/// Ordered sub-key → value mapping
pub type Fields = IndexMap<String, Value>;

/// Sub-key under which `union_add_sequence` stores a plain sequence
pub const UNDEFINED_SUB_KEY: &str = "undefined";

/// A key-multivalue record
///
/// Equality compares identifiers and field mappings; field order does not
/// matter for equality.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    identifier: String,
    fields: Fields,
}

/// Output shapes for [`Record::render`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// `Record(identifier=.., fields=[k=v, ..])`
    Debug,
    /// `{"identifier": {"k": v, ..}}`
    Full,
    /// `{"k": v, ..}`
    Fields,
    /// The identifier alone
    Identifier,
    /// `["k", ..]`
    Keys,
    /// `[v, ..]`
    Values,
}

impl Record {
    /// Create a record from an identifier and its fields
    pub fn new(identifier: impl Into<String>, fields: Fields) -> Self {
        Self {
            identifier: identifier.into(),
            fields,
        }
    }

    /// Create a record with no fields
    pub fn empty(identifier: impl Into<String>) -> Self {
        Self::new(identifier, Fields::new())
    }

    /// Create a record from `(sub-key, value)` pairs; later duplicates overwrite
    pub fn from_pairs<I, K, V>(identifier: impl Into<String>, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let fields = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::new(identifier, fields)
    }

    /// Builder-style field insert
    pub fn with_field(mut self, sub_key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(sub_key.into(), value.into());
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn into_parts(self) -> (String, Fields) {
        (self.identifier, self.fields)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Whether a sub-key is present
    pub fn contains(&self, sub_key: &str) -> bool {
        self.fields.contains_key(sub_key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.fields.values()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    // =========================================================================
    // Access by sub-key
    // =========================================================================

    pub fn get(&self, sub_key: &str) -> Option<&Value> {
        self.fields.get(sub_key)
    }

    /// Insert or overwrite a field, returning the previous value
    pub fn set(&mut self, sub_key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(sub_key.into(), value.into())
    }

    /// Remove a field, keeping the order of the others
    pub fn remove(&mut self, sub_key: &str) -> Option<Value> {
        self.fields.shift_remove(sub_key)
    }

    /// Merge more fields in place; existing sub-keys are overwritten
    pub fn extend<I, K, V>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.fields
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
    }

    // =========================================================================
    // Access by ordinal position
    // =========================================================================

    pub fn get_index(&self, index: usize) -> Result<(&str, &Value)> {
        self.fields
            .get_index(index)
            .map(|(k, v)| (k.as_str(), v))
            .ok_or(MonoError::IndexOutOfRange {
                index,
                len: self.len(),
            })
    }

    /// Overwrite the value at a position, returning the previous value
    pub fn set_index(&mut self, index: usize, value: impl Into<Value>) -> Result<Value> {
        let len = self.len();
        let (_, slot) = self
            .fields
            .get_index_mut(index)
            .ok_or(MonoError::IndexOutOfRange { index, len })?;
        Ok(std::mem::replace(slot, value.into()))
    }

    pub fn remove_index(&mut self, index: usize) -> Result<(String, Value)> {
        let len = self.len();
        self.fields
            .shift_remove_index(index)
            .ok_or(MonoError::IndexOutOfRange { index, len })
    }

    // =========================================================================
    // Access by range
    // =========================================================================

    /// Values in a contiguous range of positions; bounds past the end are clamped
    pub fn get_range(&self, range: Range<usize>) -> Vec<&Value> {
        let range = self.clamp(range);
        self.fields
            .values()
            .skip(range.start)
            .take(range.end - range.start)
            .collect()
    }

    /// Remove a contiguous range of positions; bounds past the end are clamped
    pub fn remove_range(&mut self, range: Range<usize>) -> Vec<(String, Value)> {
        let range = self.clamp(range);
        self.fields.drain(range).collect()
    }

    fn clamp(&self, range: Range<usize>) -> Range<usize> {
        let end = range.end.min(self.len());
        let start = range.start.min(end);
        start..end
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Render the record in one of the supported layouts
    pub fn render(&self, layout: Layout) -> String {
        match layout {
            Layout::Debug => {
                let pairs: Vec<String> = self
                    .fields
                    .iter()
                    .map(|(k, v)| format!("{}={}", k, v))
                    .collect();
                format!(
                    "Record(identifier={}, fields=[{}])",
                    self.identifier,
                    pairs.join(", ")
                )
            }
            Layout::Full => {
                let mut outer = serde_json::Map::new();
                outer.insert(self.identifier.clone(), self.fields_value());
                Value::Object(outer).to_string()
            }
            Layout::Fields => self.fields_value().to_string(),
            Layout::Identifier => self.identifier.clone(),
            Layout::Keys => Value::Array(
                self.fields.keys().cloned().map(Value::String).collect(),
            )
            .to_string(),
            Layout::Values => Value::Array(self.fields.values().cloned().collect()).to_string(),
        }
    }

    fn fields_value(&self) -> Value {
        Value::Object(
            self.fields
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self
            .fields
            .iter()
            .map(|(k, v)| format!("    {}: {}", k, v))
            .collect();
        write!(f, "{{\n  {}: {{\n{}\n  }}\n}}", self.identifier, lines.join(",\n"))
    }
}
