//! Substitution codec
//!
//! Encoding and decoding functions between text and tokens.

use serde_json::Value;

use crate::error::{DecodeError, MonoError, Result};

use super::{alphabet, Token};

// =============================================================================
// Encoding
// =============================================================================

/// Encode a string into a token
///
/// Fails with `UnsupportedCharacter` for characters outside the alphabet
/// (control characters, non-ASCII).
pub fn encode(text: &str) -> Result<Token> {
    let mut digits = String::with_capacity(text.len() * 3);

    for ch in text.chars() {
        let position = alphabet::position_of(ch).ok_or(MonoError::UnsupportedCharacter(ch))?;
        let rendered = position.to_string();

        // Width prefix is always a single digit (positions are 1-2 digits)
        digits.push_str(&rendered.len().to_string());
        digits.push_str(&rendered);
    }

    Ok(Token::from_digits(digits))
}

/// Encode any JSON value through its canonical string form
pub fn encode_value(value: &Value) -> Result<Token> {
    encode(&canonical_string(value))
}

/// Canonical string form of a value
///
/// Strings are used verbatim; everything else is its compact JSON text.
pub fn canonical_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// =============================================================================
// Decoding
// =============================================================================

/// Decode a token back into text
pub fn decode(token: &Token) -> std::result::Result<String, DecodeError> {
    decode_digits(token.as_str())
}

/// Decode a raw digit string
///
/// Format: width (1 digit) + position (width digits), repeated
pub fn decode_digits(digits: &str) -> std::result::Result<String, DecodeError> {
    let bytes = digits.as_bytes();

    if let Some(&bad) = bytes.iter().find(|b| !b.is_ascii_digit()) {
        return Err(DecodeError::InvalidInput(format!(
            "expected only digits, found {:?}",
            bad as char
        )));
    }

    let mut output = String::with_capacity(bytes.len() / 2);
    let mut offset = 0;

    while offset < bytes.len() {
        let width = (bytes[offset] - b'0') as usize;
        if width == 0 {
            return Err(DecodeError::InvalidInput(format!(
                "zero-width field at offset {}",
                offset
            )));
        }

        let start = offset + 1;
        let end = start + width;
        if end > bytes.len() {
            return Err(DecodeError::Truncated {
                offset,
                expected: width,
            });
        }

        let position = bytes[start..end]
            .iter()
            .fold(0usize, |acc, &b| acc * 10 + (b - b'0') as usize);

        let ch = alphabet::char_at(position).ok_or(DecodeError::OutOfRange { position })?;
        output.push(ch);

        offset = end;
    }

    Ok(output)
}

/// Decode a stored JSON value
///
/// Accepts an integer token or its digit-string form; any other value is
/// rejected with `InvalidInput`.
pub fn decode_value(value: &Value) -> std::result::Result<String, DecodeError> {
    match Token::from_value(value) {
        Some(token) => decode(&token),
        None => Err(DecodeError::InvalidInput(format!(
            "expected an encoded integer, got {}",
            value
        ))),
    }
}
