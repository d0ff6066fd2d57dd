//! Lookup helpers
//!
//! Read paths built on [`FileStore`]: by key, by ordinal index, and key and
//! value listings.

use serde_json::Value;
use tracing::{debug, warn};

use crate::codec::{self, Token};
use crate::error::{MonoError, Result};
use crate::record::{Fields, Record};

use super::FileStore;

impl FileStore {
    /// Load one record by identifier
    ///
    /// Unless `raw`, every value that looks like a token is decoded; values
    /// that fail to decode are returned unchanged.
    pub fn load_by_key(&self, identifier: &str, raw: bool) -> Result<Record> {
        let mut document = self.load()?;
        let fields = document
            .shift_remove(identifier)
            .ok_or_else(|| MonoError::key_not_found(self.path().display(), identifier))?;

        Ok(Record::new(identifier, decode_fields(fields, raw)))
    }

    /// Load one record by its position in the file
    ///
    /// An out-of-range index is a soft miss: it logs a warning and returns
    /// `Ok(None)`.
    pub fn load_by_index(&self, index: usize, raw: bool) -> Result<Option<Record>> {
        let document = self.load()?;

        match document.get_index(index) {
            Some((identifier, fields)) => Ok(Some(Record::new(
                identifier.clone(),
                decode_fields(fields.clone(), raw),
            ))),
            None => {
                warn!(
                    index,
                    available = document.len(),
                    path = %self.path().display(),
                    "index is out of bounds for the stored keys"
                );
                Ok(None)
            }
        }
    }

    /// All identifiers, in file order
    pub fn list_keys(&self) -> Result<Vec<String>> {
        Ok(self.load()?.into_keys().collect())
    }

    /// Values of one record, in field order
    ///
    /// With `with_keys`, each entry is rendered as `"sub-key: value"`.
    pub fn list_values(&self, identifier: &str, with_keys: bool, raw: bool) -> Result<Vec<String>> {
        let record = self.load_by_key(identifier, raw)?;

        let items = record
            .iter()
            .map(|(sub_key, value)| {
                let value = codec::canonical_string(value);
                if with_keys {
                    format!("{}: {}", sub_key, value)
                } else {
                    value
                }
            })
            .collect();

        Ok(items)
    }
}

fn decode_fields(fields: Fields, raw: bool) -> Fields {
    if raw {
        return fields;
    }
    fields
        .into_iter()
        .map(|(sub_key, value)| {
            let decoded = decode_field(&sub_key, value);
            (sub_key, decoded)
        })
        .collect()
}

/// Decode one stored value, passing through anything that is not a valid token
pub(super) fn decode_field(sub_key: &str, value: Value) -> Value {
    let Some(token) = Token::from_value(&value) else {
        return value;
    };

    match codec::decode(&token) {
        Ok(text) => Value::String(text),
        Err(e) => {
            debug!(sub_key, error = %e, "value is not a codec token, keeping it as stored");
            value
        }
    }
}
