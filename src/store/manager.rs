//! File Store
//!
//! Persists records and applies key-level and sub-key-level edits.
//!
//! Every public operation follows the same shape:
//! 1. Read the whole store file
//! 2. Apply one in-memory mutation
//! 3. Rewrite the whole store file
//!
//! Edits work on the stored (encoded) values directly, so fields that an
//! operation does not touch are written back exactly as they were read.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::codec;
use crate::config::Config;
use crate::error::{MonoError, Result};
use crate::record::{Fields, Record};

use super::document::{read_document, write_document, Document};

/// Outcome of [`FileStore::delete_all`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Purge {
    /// No confirmation was given; the file was not touched
    Refused,

    /// The file now holds an empty store
    Cleared,
}

/// Handle to a store file
///
/// Holds only configuration; the file is the sole source of truth and is
/// re-read by every call.
#[derive(Debug, Clone)]
pub struct FileStore {
    config: Config,
}

impl FileStore {
    /// Create a store handle with the given config
    ///
    /// Does not touch the disk; the file is created on first write.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Create a store handle for a path (convenience method)
    ///
    /// Uses default config with the specified store path
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        let mut config = Config::default();
        config.store_path = path.into();
        Self::new(config)
    }

    // =========================================================================
    // Create / Merge
    // =========================================================================

    /// Encode a record and merge it into the store file
    ///
    /// An existing entry for the same identifier is replaced in place.
    pub fn store(&self, record: &Record) -> Result<()> {
        let encoded = encode_fields(record.fields())?;

        let mut document = self.load()?;
        document.insert(record.identifier().to_string(), encoded);
        self.save(&document)?;

        info!(
            identifier = record.identifier(),
            path = %self.path().display(),
            "record stored"
        );
        Ok(())
    }

    // =========================================================================
    // Edits
    // =========================================================================

    /// Rename a sub-key within a record
    ///
    /// The renamed field moves to the end of the record. When `old` is
    /// missing, `create_if_missing` appends `new` with an empty value instead
    /// of failing.
    pub fn rename_sub_key(
        &self,
        identifier: &str,
        old: &str,
        new: &str,
        create_if_missing: bool,
    ) -> Result<()> {
        let mut document = self.load()?;
        let fields = self.fields_mut(&mut document, identifier)?;

        let value = match fields.shift_remove(old) {
            Some(value) => value,
            None if create_if_missing => {
                warn!(
                    identifier,
                    sub_key = old,
                    "sub-key not found, creating '{}' with an empty value",
                    new
                );
                codec::encode("")?.to_value()
            }
            None => return Err(MonoError::key_not_found(self.path().display(), old)),
        };
        fields.insert(new.to_string(), value);

        self.save(&document)?;
        info!(identifier, old, new, "sub-key renamed");
        Ok(())
    }

    /// Overwrite the value of an existing sub-key
    ///
    /// Returns the previous (decoded) value.
    pub fn set_sub_value(
        &self,
        identifier: &str,
        sub_key: &str,
        value: impl Into<Value>,
    ) -> Result<Value> {
        let value = value.into();
        let token = codec::encode_value(&value)?;

        let mut document = self.load()?;
        let path = self.path().display().to_string();
        let fields = self.fields_mut(&mut document, identifier)?;

        let slot = fields
            .get_mut(sub_key)
            .ok_or_else(|| MonoError::key_not_found(&path, sub_key))?;
        let previous = std::mem::replace(slot, token.to_value());

        self.save(&document)?;

        let previous = super::lookup::decode_field(sub_key, previous);
        info!(
            identifier,
            sub_key,
            from = %previous,
            to = %value,
            "sub-key value changed"
        );
        Ok(previous)
    }

    /// Rename a top-level identifier
    ///
    /// An existing entry under `new` is overwritten, keeping its position.
    /// Otherwise the renamed entry stays where `old` was.
    pub fn rename_top_key(&self, old: &str, new: &str) -> Result<()> {
        let mut document = self.load()?;
        let (index, _, fields) = document
            .shift_remove_full(old)
            .ok_or_else(|| MonoError::key_not_found(self.path().display(), old))?;

        match document.get_mut(new) {
            Some(slot) => {
                warn!(old, new, "destination identifier exists and will be overwritten");
                *slot = fields;
            }
            None => {
                document.shift_insert(index, new.to_string(), fields);
            }
        }

        self.save(&document)?;
        info!(old, new, "identifier renamed");
        Ok(())
    }

    // =========================================================================
    // Deletes
    // =========================================================================

    /// Remove one sub-key from a record
    pub fn delete_sub_key(&self, identifier: &str, sub_key: &str) -> Result<()> {
        let mut document = self.load()?;
        let path = self.path().display().to_string();
        let fields = self.fields_mut(&mut document, identifier)?;

        if fields.shift_remove(sub_key).is_none() {
            return Err(MonoError::key_not_found(path, sub_key));
        }

        self.save(&document)?;
        info!(identifier, sub_key, "sub-key deleted");
        Ok(())
    }

    /// Remove a whole record
    pub fn delete_key(&self, identifier: &str) -> Result<()> {
        let mut document = self.load()?;
        if document.shift_remove(identifier).is_none() {
            return Err(MonoError::key_not_found(self.path().display(), identifier));
        }

        self.save(&document)?;
        info!(identifier, path = %self.path().display(), "record deleted");
        Ok(())
    }

    /// Empty the store file
    ///
    /// Irreversible, so it only runs with `confirm`; otherwise it logs a
    /// warning and leaves the file alone.
    pub fn delete_all(&self, confirm: bool) -> Result<Purge> {
        if !confirm {
            warn!(
                advisory = "DeleteWarning",
                path = %self.path().display(),
                "refusing to delete all data without confirmation"
            );
            return Ok(Purge::Refused);
        }

        self.save(&Document::new())?;
        info!(path = %self.path().display(), "all data deleted");
        Ok(Purge::Cleared)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.config.store_path
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    pub(super) fn load(&self) -> Result<Document> {
        let document = read_document(self.path())?;
        debug!(
            path = %self.path().display(),
            records = document.len(),
            "store file loaded"
        );
        Ok(document)
    }

    fn save(&self, document: &Document) -> Result<()> {
        write_document(self.path(), document, self.config.indent)
    }

    fn fields_mut<'d>(&self, document: &'d mut Document, identifier: &str) -> Result<&'d mut Fields> {
        document
            .get_mut(identifier)
            .ok_or_else(|| MonoError::key_not_found(self.path().display(), identifier))
    }
}

/// Encode every field value into its stored token form
fn encode_fields(fields: &Fields) -> Result<Fields> {
    fields
        .iter()
        .map(|(k, v)| Ok((k.clone(), codec::encode_value(v)?.to_value())))
        .collect()
}
