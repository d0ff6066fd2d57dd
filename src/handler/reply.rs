//! Reply definitions
//!
//! Represents results returned to a dispatch layer.

use std::fmt;

/// A reply to send back to the requester
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Mutation applied
    Success,

    /// Answer to `ping`
    Pong,

    /// Identifiers from `list_keys`
    Keys(Vec<String>),

    /// Values from `list_values`
    Values(Vec<String>),

    /// Human-readable failure message
    Error(String),
}

impl Reply {
    /// Create an ERROR reply from anything printable
    pub fn error(message: impl fmt::Display) -> Self {
        Reply::Error(message.to_string())
    }

    /// True for every reply except `Error`
    pub fn is_success(&self) -> bool {
        !matches!(self, Reply::Error(_))
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Success => f.write_str("Success"),
            Reply::Pong => f.write_str("pong"),
            Reply::Keys(items) | Reply::Values(items) => {
                let rendered = serde_json::to_string(items).map_err(|_| fmt::Error)?;
                f.write_str(&rendered)
            }
            Reply::Error(message) => write!(f, "error: {}", message),
        }
    }
}
