//! Record algebra
//!
//! Set-like combination of a record's fields with another record or a plain
//! mapping. Every operation returns a new record; operands are never mutated.
//!
//! | Operation              | Result on collision | Empty result       |
//! |------------------------|---------------------|--------------------|
//! | `union_add`            | right wins          | empty record       |
//! | `toggle_subtract`      | shared keys removed | empty record       |
//! | `intersect`            | right wins          | `SetOutcome::Empty`|
//! | `union`                | right wins          | `SetOutcome::Empty`|
//! | `symmetric_difference` | shared keys dropped | `SetOutcome::Empty`|
//! | `shift_left/right`     | n/a                 | `SetOutcome::Empty`|

use serde_json::Value;
use tracing::warn;

use crate::error::{MonoError, Result};

use super::{Fields, Operand, Record, SetOutcome, UNDEFINED_SUB_KEY};

/// Largest supported divisor for `split_into`
pub const MAX_SPLIT: usize = 9;

impl Record {
    /// Resolve the operand's fields, enforcing the identifier rule
    fn operand_fields<'a>(&self, operand: Operand<'a>, operation: &str) -> Result<&'a Fields> {
        match operand {
            Operand::Record(other) => {
                if other.identifier != self.identifier {
                    return Err(MonoError::IdentifierMismatch {
                        left: self.identifier.clone(),
                        right: other.identifier.clone(),
                    });
                }
                Ok(&other.fields)
            }
            Operand::Map(map) => {
                warn!(
                    advisory = "HeterogeneousCombineWarning",
                    operation,
                    identifier = %self.identifier,
                    "combining a record with a plain mapping may introduce unexpected fields"
                );
                Ok(map)
            }
        }
    }

    // =========================================================================
    // Arithmetic
    // =========================================================================

    /// Merge two field mappings; the right operand wins on collision
    pub fn union_add<'a>(&self, other: impl Into<Operand<'a>>) -> Result<Record> {
        let right = self.operand_fields(other.into(), "union_add")?;

        let mut fields = self.fields.clone();
        fields.extend(right.iter().map(|(k, v)| (k.clone(), v.clone())));

        Ok(Record::new(self.identifier.clone(), fields))
    }

    /// Add a plain sequence under the reserved `"undefined"` sub-key
    pub fn union_add_sequence(&self, items: Vec<Value>) -> Record {
        warn!(
            advisory = "HeterogeneousCombineWarning",
            operation = "union_add_sequence",
            identifier = %self.identifier,
            "storing a plain sequence under '{}'",
            UNDEFINED_SUB_KEY
        );

        let mut fields = self.fields.clone();
        fields.insert(UNDEFINED_SUB_KEY.to_string(), Value::Array(items));
        Record::new(self.identifier.clone(), fields)
    }

    /// Toggle the sub-keys shared by both operands
    ///
    /// Each shared sub-key is removed from the left operand if present,
    /// otherwise the right operand's value is copied in. Since the shared set
    /// is drawn from both sides, this is not the inverse of `union_add`:
    /// `a.union_add(b).toggle_subtract(b)` drops every sub-key of `b`.
    pub fn toggle_subtract<'a>(&self, other: impl Into<Operand<'a>>) -> Result<Record> {
        let right = self.operand_fields(other.into(), "toggle_subtract")?;

        let shared: Vec<&String> = self
            .fields
            .keys()
            .filter(|k| right.contains_key(k.as_str()))
            .collect();

        let mut fields = self.fields.clone();
        for key in shared {
            if fields.shift_remove(key.as_str()).is_none() {
                if let Some(value) = right.get(key.as_str()) {
                    fields.insert(key.clone(), value.clone());
                }
            }
        }

        Ok(Record::new(self.identifier.clone(), fields))
    }

    /// Division by a record or mapping is the same as `toggle_subtract`
    pub fn divide_by<'a>(&self, other: impl Into<Operand<'a>>) -> Result<Record> {
        self.toggle_subtract(other)
    }

    /// Partition the fields into `parts` contiguous chunks of equal size
    ///
    /// `parts` must be in `1..=9` and divide the field count exactly.
    pub fn split_into(&self, parts: usize) -> Result<Vec<Record>> {
        if !(1..=MAX_SPLIT).contains(&parts) {
            return Err(MonoError::InvalidDivisor(parts));
        }

        let count = self.len();
        if parts == 1 || count == 0 {
            return Ok(vec![self.clone()]);
        }

        if count % parts != 0 {
            return Err(MonoError::Indivisible {
                fields: count,
                divisor: parts,
            });
        }

        let entries: Vec<(&String, &Value)> = self.fields.iter().collect();
        let chunks = entries
            .chunks(count / parts)
            .map(|chunk| {
                let fields = chunk
                    .iter()
                    .map(|(k, v)| ((*k).clone(), (*v).clone()))
                    .collect();
                Record::new(self.identifier.clone(), fields)
            })
            .collect();

        Ok(chunks)
    }

    // =========================================================================
    // Set operations
    // =========================================================================

    /// Sub-keys present in both operands (AND)
    pub fn intersect<'a>(&self, other: impl Into<Operand<'a>>) -> Result<SetOutcome> {
        let right = self.operand_fields(other.into(), "intersect")?;

        let fields: Fields = self
            .fields
            .keys()
            .filter_map(|k| right.get(k.as_str()).map(|v| (k.clone(), v.clone())))
            .collect();

        Ok(SetOutcome::from_fields(&self.identifier, fields))
    }

    /// Sub-keys present in either operand (OR)
    pub fn union<'a>(&self, other: impl Into<Operand<'a>>) -> Result<SetOutcome> {
        let right = self.operand_fields(other.into(), "union")?;

        let mut fields = self.fields.clone();
        fields.extend(right.iter().map(|(k, v)| (k.clone(), v.clone())));

        Ok(SetOutcome::from_fields(&self.identifier, fields))
    }

    /// Sub-keys present in exactly one operand (XOR)
    pub fn symmetric_difference<'a>(&self, other: impl Into<Operand<'a>>) -> Result<SetOutcome> {
        let right = self.operand_fields(other.into(), "symmetric_difference")?;

        let left_only = self
            .fields
            .iter()
            .filter(|(k, _)| !right.contains_key(k.as_str()));
        let right_only = right
            .iter()
            .filter(|(k, _)| !self.fields.contains_key(k.as_str()));

        let fields: Fields = left_only
            .chain(right_only)
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        Ok(SetOutcome::from_fields(&self.identifier, fields))
    }

    // =========================================================================
    // Shifts
    // =========================================================================

    /// Drop the first `n` fields
    pub fn shift_left(&self, n: usize) -> SetOutcome {
        if n > self.len() {
            return SetOutcome::Empty;
        }
        let fields = self
            .fields
            .iter()
            .skip(n)
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        SetOutcome::from_fields(&self.identifier, fields)
    }

    /// Drop the last `n` fields
    pub fn shift_right(&self, n: usize) -> SetOutcome {
        if n > self.len() {
            return SetOutcome::Empty;
        }
        let fields = self
            .fields
            .iter()
            .take(self.len() - n)
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        SetOutcome::from_fields(&self.identifier, fields)
    }

    // =========================================================================
    // Ordering
    // =========================================================================

    /// True when `self` has fewer fields than `other`
    pub fn try_lt(&self, other: &Record) -> Result<bool> {
        self.ensure_same_identifier(other)?;
        Ok(self.len() < other.len())
    }

    /// True when `self` has fewer fields than `other` or equals it
    pub fn try_le(&self, other: &Record) -> Result<bool> {
        self.ensure_same_identifier(other)?;
        Ok(self.len() < other.len() || self == other)
    }

    fn ensure_same_identifier(&self, other: &Record) -> Result<()> {
        if self.identifier != other.identifier {
            return Err(MonoError::IdentifierMismatch {
                left: self.identifier.clone(),
                right: other.identifier.clone(),
            });
        }
        Ok(())
    }
}
