//! Operands and outcomes of the record algebra

use serde_json::Value;

use super::{Fields, Record};

/// Right-hand side of a binary record operation
#[derive(Debug, Clone, Copy)]
pub enum Operand<'a> {
    /// Another record; identifiers must match
    Record(&'a Record),

    /// A plain field mapping; accepted with a `HeterogeneousCombineWarning`
    Map(&'a Fields),
}

impl<'a> Operand<'a> {
    /// Fields carried by the operand
    pub fn fields(&self) -> &'a Fields {
        match self {
            Operand::Record(record) => &record.fields,
            Operand::Map(map) => map,
        }
    }

    /// True for plain mappings
    pub fn is_heterogeneous(&self) -> bool {
        matches!(self, Operand::Map(_))
    }
}

impl<'a> From<&'a Record> for Operand<'a> {
    fn from(record: &'a Record) -> Self {
        Operand::Record(record)
    }
}

impl<'a> From<&'a Fields> for Operand<'a> {
    fn from(map: &'a Fields) -> Self {
        Operand::Map(map)
    }
}

/// Result of a set operation that may come out empty
///
/// `Empty` is the sentinel `0`: it is distinct from a record with no fields.
#[derive(Debug, Clone, PartialEq)]
pub enum SetOutcome {
    Record(Record),
    Empty,
}

impl SetOutcome {
    /// JSON value of the empty sentinel
    pub const SENTINEL: i64 = 0;

    /// Wrap `fields` under `identifier`, collapsing to the sentinel when empty
    pub(crate) fn from_fields(identifier: &str, fields: Fields) -> Self {
        if fields.is_empty() {
            SetOutcome::Empty
        } else {
            SetOutcome::Record(Record::new(identifier, fields))
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, SetOutcome::Empty)
    }

    pub fn record(&self) -> Option<&Record> {
        match self {
            SetOutcome::Record(record) => Some(record),
            SetOutcome::Empty => None,
        }
    }

    pub fn into_record(self) -> Option<Record> {
        match self {
            SetOutcome::Record(record) => Some(record),
            SetOutcome::Empty => None,
        }
    }

    /// JSON form: `{"identifier": {..}}`, or `0` for the sentinel
    pub fn to_value(&self) -> Value {
        match self {
            SetOutcome::Record(record) => {
                let mut outer = serde_json::Map::new();
                outer.insert(record.identifier.clone(), record.fields_value());
                Value::Object(outer)
            }
            SetOutcome::Empty => Value::from(Self::SENTINEL),
        }
    }
}
