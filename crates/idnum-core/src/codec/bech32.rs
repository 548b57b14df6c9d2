//! Bech32 (BIP-173) data-part decoding and checksum verification.
//!
//! The human-readable prefix is expanded to
//! `[c >> 5 for c in hrp] ++ [0] ++ [c & 31 for c in hrp]` and fed, followed
//! by the 5-bit data values, through the BCH polymod with generators
//! `0x3b6a57b2, 0x26508e6d, 0x1ea119fa, 0x3d4233dd, 0x2a1462b3`. The string
//! is valid iff the final residue equals the Bech32 constant `1`.
//!
//! The Bech32m constant (BIP-350) is not consulted here;
//! callers that want it must check it themselves.

use ::bech32::primitives::checksum::{Checksum, Engine};
use ::bech32::{Bech32, Fe32};

use crate::error::CodecError;

/// The 32-character Bech32 data alphabet, in value order.
pub const BECH32_ALPHABET: &str = "qpzry9x8gf2tvdw0s3jn54khce6mua7l";

/// Number of 5-bit values in the trailing checksum.
pub const CHECKSUM_LEN: usize = 6;

/// The residue a valid Bech32 string leaves in the polymod.
pub const BECH32_CONST: u32 = Bech32::TARGET_RESIDUE;

/// Translate a (lower-case) data part into 5-bit values.
///
/// # Errors
///
/// Returns [`CodecError::Bech32Character`] for the first character outside
/// the alphabet. Upper-case input is rejected; normalize first.
pub fn to_values(data: &str) -> Result<Vec<u8>, CodecError> {
    data.chars()
        .map(|c| {
            BECH32_ALPHABET
                .find(c)
                .and_then(|i| u8::try_from(i).ok())
                .ok_or(CodecError::Bech32Character(c))
        })
        .collect()
}

/// Expand a human-readable prefix into the values that seed the checksum.
///
/// # Errors
///
/// Returns [`CodecError::Bech32Hrp`] if the prefix is empty or contains
/// characters outside printable ASCII (33..=126).
pub fn hrp_expand(hrp: &str) -> Result<Vec<u8>, CodecError> {
    if hrp.is_empty() || !hrp.bytes().all(|b| (33..=126).contains(&b)) {
        return Err(CodecError::Bech32Hrp(hrp.to_string()));
    }
    let bytes = hrp.as_bytes();
    let mut out = Vec::with_capacity(bytes.len() * 2 + 1);
    out.extend(bytes.iter().map(|b| b >> 5));
    out.push(0);
    out.extend(bytes.iter().map(|b| b & 31));
    Ok(out)
}

/// Run the Bech32 polymod over `hrp_expand(hrp) ++ values` and return the
/// residue.
///
/// # Errors
///
/// Fails if the prefix is invalid or a value is not a 5-bit field element.
pub fn polymod(hrp: &str, values: &[u8]) -> Result<u32, CodecError> {
    let mut engine = Engine::<Bech32>::new();
    for v in hrp_expand(hrp)?.into_iter().chain(values.iter().copied()) {
        let fe = Fe32::try_from(v).map_err(|_| CodecError::Bech32Value(v))?;
        engine.input_fe(fe);
    }
    Ok(*engine.residue())
}

/// True if `values` (data plus the 6-value checksum) carry a valid Bech32
/// checksum under `hrp`.
pub fn verify_checksum(hrp: &str, values: &[u8]) -> Result<bool, CodecError> {
    Ok(polymod(hrp, values)? == BECH32_CONST)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alphabet_has_32_unique_chars() {
        let mut chars: Vec<char> = BECH32_ALPHABET.chars().collect();
        assert_eq!(chars.len(), 32);
        chars.sort_unstable();
        chars.dedup();
        assert_eq!(chars.len(), 32);
    }

    #[test]
    fn hrp_expansion_of_bc() {
        // 'b' = 0x62, 'c' = 0x63.
        assert_eq!(hrp_expand("bc").unwrap(), vec![3, 3, 0, 2, 3]);
    }

    #[test]
    fn hrp_expansion_rejects_empty_and_non_ascii() {
        assert!(hrp_expand("").is_err());
        assert!(hrp_expand("b c").is_err());
        assert!(hrp_expand("bç").is_err());
    }

    #[test]
    fn to_values_maps_alphabet_positions() {
        assert_eq!(to_values("qpzl").unwrap(), vec![0, 1, 2, 31]);
    }

    #[test]
    fn to_values_rejects_excluded_and_upper_case() {
        for bad in ["b", "i", "o", "1", "Q"] {
            assert!(matches!(to_values(bad), Err(CodecError::Bech32Character(_))));
        }
    }

    #[test]
    fn valid_segwit_checksum() {
        let data = "qw508d6qejxtdg4c5r3zarvary0c5xw7kv8f3t4";
        let values = to_values(data).unwrap();
        assert!(verify_checksum("bc", &values).unwrap());
    }

    #[test]
    fn corrupted_checksum_is_detected() {
        let data = "qw508d6qejxtdg4c5r3zarvary0c5xw7kv8f3t5";
        let values = to_values(data).unwrap();
        assert!(!verify_checksum("bc", &values).unwrap());
    }

    #[test]
    fn checksum_depends_on_hrp() {
        let values = to_values("qw508d6qejxtdg4c5r3zarvary0c5xw7kv8f3t4").unwrap();
        assert!(!verify_checksum("tb", &values).unwrap());
    }

    #[test]
    fn polymod_rejects_wide_values() {
        assert_eq!(polymod("bc", &[32]), Err(CodecError::Bech32Value(32)));
    }
}
