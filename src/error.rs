//! Error types for monokv
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using MonoError
pub type Result<T> = std::result::Result<T, MonoError>;

/// Unified error type for monokv operations
#[derive(Debug, Error)]
pub enum MonoError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Codec Errors
    // -------------------------------------------------------------------------
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Cannot encode character {0:?}: not in the codec alphabet")]
    UnsupportedCharacter(char),

    // -------------------------------------------------------------------------
    // Lookup Errors
    // -------------------------------------------------------------------------
    #[error("The following key was not found in {scope}: {key}")]
    KeyNotFound { scope: String, key: String },

    #[error("Index {index} is out of range for {len} fields")]
    IndexOutOfRange { index: usize, len: usize },

    // -------------------------------------------------------------------------
    // Record Algebra Errors
    // -------------------------------------------------------------------------
    #[error("Both records must have the same identifier ('{left}' != '{right}')")]
    IdentifierMismatch { left: String, right: String },

    #[error("Cannot divide {fields} fields into {divisor} equal parts")]
    Indivisible { fields: usize, divisor: usize },

    #[error("Divisor {0} is unsupported (must be between 1 and 9)")]
    InvalidDivisor(usize),

    // -------------------------------------------------------------------------
    // Store File Errors
    // -------------------------------------------------------------------------
    #[error("Store format error: {0}")]
    Format(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Request Errors
    // -------------------------------------------------------------------------
    #[error("Protocol error: {0}")]
    Protocol(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl MonoError {
    /// Build a `KeyNotFound` for `key` missing from `scope` (a file path or identifier)
    pub fn key_not_found(scope: impl ToString, key: impl Into<String>) -> Self {
        MonoError::KeyNotFound {
            scope: scope.to_string(),
            key: key.into(),
        }
    }
}

/// Reasons a token fails to decode
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("out of range: position {position} does not exist in the alphabet")]
    OutOfRange { position: usize },

    #[error("truncated token: expected {expected} digits at offset {offset}")]
    Truncated { offset: usize, expected: usize },
}
