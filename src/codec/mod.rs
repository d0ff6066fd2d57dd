//! Codec Module
//!
//! Reversible, stateless character substitution used to obscure stored values.
//! This is obfuscation, not encryption.
//!
//! ## Token Format
//!
//! Every character is replaced by its 1-based position in a fixed alphabet,
//! prefixed by the number of digits in that position:
//!
//! ```text
//! ┌───────────┬──────────────────┬───────────┬──────────────────┬─────
//! │ Width (1) │ Position (Width) │ Width (1) │ Position (Width) │ ...
//! └───────────┴──────────────────┴───────────┴──────────────────┴─────
//!
//!   "val1"  →  2 37 | 2 46 | 2 23 | 1 2  →  23724622312
//! ```
//!
//! The concatenated digits are stored as one JSON integer. The alphabet order
//! is part of the on-disk format and must never change.
//!
//! ## Values
//! Non-string values are coerced through [`canonical_string`] before
//! encoding, so a stored `42` reads back as the string `"42"`.

mod alphabet;
mod substitution;
mod token;

pub use alphabet::{char_at, position_of, ALPHABET, ALPHABET_LEN};
pub use substitution::{canonical_string, decode, decode_digits, decode_value, encode, encode_value};
pub use token::Token;
