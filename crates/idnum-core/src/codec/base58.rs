//! Base58 decoding with the Bitcoin alphabet.
//!
//! The string is read as a big-endian base-58 integer and converted to
//! big-endian bytes, with one leading zero byte per leading `'1'`.

use crate::error::CodecError;

/// The Bitcoin Base58 alphabet (no `0`, `O`, `I`, `l`).
pub const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// True if `c` belongs to the Base58 alphabet.
pub fn is_base58_char(c: char) -> bool {
    BASE58_ALPHABET.contains(c)
}

/// Decode a Base58 string to bytes.
///
/// # Errors
///
/// Returns [`CodecError::Base58Character`] for the first character outside
/// the alphabet.
pub fn decode(s: &str) -> Result<Vec<u8>, CodecError> {
    if let Some(bad) = s.chars().find(|c| !is_base58_char(*c)) {
        return Err(CodecError::Base58Character(bad));
    }
    bs58::decode(s)
        .with_alphabet(bs58::Alphabet::BITCOIN)
        .into_vec()
        .map_err(|e| CodecError::Base58(e.to_string()))
}
