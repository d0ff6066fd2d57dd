//! Token definitions
//!
//! The encoded representation of one stored value.

use std::fmt;
use std::str::FromStr;

use serde_json::{Number, Value};

use crate::error::DecodeError;

/// An encoded value: a run of ASCII digits
///
/// The empty token is the encoding of the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token(String);

impl Token {
    /// Wrap digits produced by the encoder
    pub(crate) fn from_digits(digits: String) -> Self {
        Self(digits)
    }

    /// Parse a digit string into a token
    pub fn parse(digits: &str) -> Result<Self, DecodeError> {
        match digits.bytes().find(|b| !b.is_ascii_digit()) {
            Some(bad) => Err(DecodeError::InvalidInput(format!(
                "expected only digits, found {:?}",
                bad as char
            ))),
            None => Ok(Self(digits.to_string())),
        }
    }

    /// Extract a token from a stored JSON value
    ///
    /// Accepts non-negative JSON integers and non-empty digit-only strings.
    /// Anything else is not codec output and returns `None`.
    pub fn from_value(value: &Value) -> Option<Self> {
        let digits = match value {
            Value::Number(n) => n.to_string(),
            Value::String(s) => s.clone(),
            _ => return None,
        };

        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            Some(Self(digits))
        } else {
            None
        }
    }

    /// JSON form written to the store file
    ///
    /// Non-empty tokens become integers; the empty token becomes `""`.
    pub fn to_value(&self) -> Value {
        if self.0.is_empty() {
            return Value::String(String::new());
        }
        Number::from_str(&self.0)
            .map(Value::Number)
            .unwrap_or_else(|_| Value::String(self.0.clone()))
    }

    /// The token digits
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of digits in the token
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Token {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
