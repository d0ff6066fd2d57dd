//! Request dispatch
//!
//! Routes requests to the store and converts results into replies.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{MonoError, Result};
use crate::record::Record;
use crate::store::FileStore;

use super::{Reply, Request};

/// Executes requests against store files
///
/// Each request names its own store file; the handler supplies the rest of
/// the configuration (indentation, pair limit).
#[derive(Debug, Clone, Default)]
pub struct Handler {
    config: Config,
}

impl Handler {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Parse and execute a named request
    pub fn handle_named(&self, name: &str, args: &[String]) -> Reply {
        match Request::parse(name, args) {
            Ok(request) => self.dispatch(request),
            Err(e) => {
                warn!(request = name, args = ?args, "rejected request: {}", e);
                Reply::error(e)
            }
        }
    }

    /// Execute a request
    ///
    /// Routes requests to appropriate handlers
    pub fn dispatch(&self, request: Request) -> Reply {
        debug!(request = request.name(), "dispatching request");

        match request {
            Request::Ping => self.ping(),
            Request::AddFields {
                path,
                identifier,
                pairs,
            } => self.add_fields(&path, &identifier, &pairs),
            Request::SetValue {
                path,
                identifier,
                sub_key,
                value,
            } => self.set_value(&path, &identifier, &sub_key, &value),
            Request::ListKeys { path } => self.list_keys(&path),
            Request::ListValues {
                path,
                identifier,
                with_keys,
                raw,
            } => self.list_values(&path, &identifier, with_keys, raw),
            Request::DeleteKey { path, identifier } => self.delete_key(&path, &identifier),
            Request::DeleteAll { path } => self.delete_all(&path),
        }
    }

    pub fn ping(&self) -> Reply {
        debug!("request handler pinged");
        Reply::Pong
    }

    /// Store a record made of `pairs` under `identifier`
    ///
    /// Replaces any existing record with the same identifier.
    pub fn add_fields(&self, path: &Path, identifier: &str, pairs: &[(String, String)]) -> Reply {
        let result = self.check_pairs(pairs).and_then(|()| {
            let record = Record::from_pairs(identifier, pairs.iter().cloned());
            self.store_for(path).store(&record)
        });

        finish("add_fields", result, |()| {
            info!(identifier, fields = pairs.len(), "added sub-key values");
            Reply::Success
        })
    }

    /// Overwrite one sub-key of an existing record
    pub fn set_value(&self, path: &Path, identifier: &str, sub_key: &str, value: &str) -> Reply {
        let result = self.store_for(path).set_sub_value(identifier, sub_key, value);
        finish("set_value", result, |_| Reply::Success)
    }

    pub fn list_keys(&self, path: &Path) -> Reply {
        finish("list_keys", self.store_for(path).list_keys(), Reply::Keys)
    }

    pub fn list_values(&self, path: &Path, identifier: &str, with_keys: bool, raw: bool) -> Reply {
        let result = self
            .store_for(path)
            .list_values(identifier, with_keys, raw);
        finish("list_values", result, Reply::Values)
    }

    pub fn delete_key(&self, path: &Path, identifier: &str) -> Reply {
        finish("delete_key", self.store_for(path).delete_key(identifier), |()| {
            Reply::Success
        })
    }

    /// Empty the store; the request itself is the caller's confirmation
    pub fn delete_all(&self, path: &Path) -> Reply {
        finish("delete_all", self.store_for(path).delete_all(true), |_| {
            Reply::Success
        })
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn store_for(&self, path: &Path) -> FileStore {
        let mut config = self.config.clone();
        config.store_path = path.to_path_buf();
        FileStore::new(config)
    }

    fn check_pairs(&self, pairs: &[(String, String)]) -> Result<()> {
        if pairs.is_empty() {
            return Err(MonoError::Protocol(
                "add_fields: at least one sub-key/value pair is required".to_string(),
            ));
        }
        if pairs.len() > self.config.max_field_pairs {
            return Err(MonoError::Protocol(format!(
                "add_fields: at most {} sub-key/value pairs per request, got {}",
                self.config.max_field_pairs,
                pairs.len()
            )));
        }
        Ok(())
    }
}

/// Convert a store result into a reply, logging failures
fn finish<T>(request: &str, result: Result<T>, on_ok: impl FnOnce(T) -> Reply) -> Reply {
    match result {
        Ok(value) => on_ok(value),
        Err(e) => {
            warn!(request, "request failed: {}", e);
            Reply::error(e)
        }
    }
}
