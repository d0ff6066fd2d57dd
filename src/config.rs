//! Configuration for monokv
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::error::{MonoError, Result};

/// Main configuration for a monokv store
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Path of the JSON store file. Created on first write.
    pub store_path: PathBuf,

    /// Indentation (in spaces) used when rewriting the store file.
    /// `0` writes compact JSON.
    pub indent: usize,

    // -------------------------------------------------------------------------
    // Request Handler Configuration
    // -------------------------------------------------------------------------
    /// Max sub-key/value pairs accepted by a single `add_fields` request
    pub max_field_pairs: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("./monokv.json"),
            indent: 4,
            max_field_pairs: 5,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the store file path
    pub fn store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.store_path = path.into();
        self
    }

    /// Set the indentation used when writing the store file
    pub fn indent(mut self, spaces: usize) -> Self {
        self.config.indent = spaces;
        self
    }

    /// Set the maximum number of pairs per `add_fields` request
    pub fn max_field_pairs(mut self, count: usize) -> Self {
        self.config.max_field_pairs = count;
        self
    }

    pub fn build(self) -> Result<Config> {
        if self.config.max_field_pairs == 0 {
            return Err(MonoError::Config(
                "max_field_pairs must be at least 1".to_string(),
            ));
        }
        Ok(self.config)
    }
}
