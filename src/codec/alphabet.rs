//! Codec alphabet
//!
//! The permuted printable character set that defines token positions.

/// Substitution alphabet. Position `n` (1-based) is `ALPHABET[n - 1]`.
///
/// `<` and `>` occur twice; lookups always resolve to the first occurrence,
/// while decoding accepts either.
pub const ALPHABET: &[u8] =
    br#"`1234657809=-\][p';/.,lokimnjuyhbtfcvgrs edxzawq~+_)(*&^T$%@!#REDFGSWAQZXVCBNHYUJMKI<>LOP:{}|"?><"#;

/// Number of positions in the alphabet
pub const ALPHABET_LEN: usize = 97;

/// 1-based position of the first occurrence of `ch`, if it is encodable
pub fn position_of(ch: char) -> Option<usize> {
    if !ch.is_ascii() {
        return None;
    }
    ALPHABET
        .iter()
        .position(|&b| b == ch as u8)
        .map(|index| index + 1)
}

/// Character at a 1-based position
pub fn char_at(position: usize) -> Option<char> {
    let index = position.checked_sub(1)?;
    ALPHABET.get(index).map(|&b| b as char)
}
