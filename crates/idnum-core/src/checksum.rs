//! # Checksum Primitives
//!
//! Weighted modular sums used by the national identifier algorithms and the
//! double SHA-256 truncation used by Base58Check.
//!
//! Weights are aligned to the right end of the digit sequence: when the two
//! slices differ in length, the last weight multiplies the last digit.

use sha2::{Digest, Sha256};

/// Sum of `w·d` over right-aligned `digits` and `weights`.
pub fn weighted_sum(digits: &[u32], weights: &[u32]) -> u64 {
    digits
        .iter()
        .rev()
        .zip(weights.iter().rev())
        .map(|(d, w)| u64::from(*d) * u64::from(*w))
        .sum()
}

/// `weighted_sum(digits, weights) mod modulus`.
///
/// `modulus` must be non-zero.
pub fn weighted_mod(digits: &[u32], weights: &[u32], modulus: u64) -> u64 {
    weighted_sum(digits, weights) % modulus
}

/// The mod-11 check value `(11 - Σ w·d) mod 11`, in `0..=10`.
///
/// How the residue 10 is presented is up to the kind: some standards reject
/// it, others map it through their own alphabet.
pub fn mod11_check_value(digits: &[u32], weights: &[u32]) -> u32 {
    let s = weighted_mod(digits, weights, 11);
    // s < 11, so the conversion is lossless.
    (11 - s as u32) % 11
}

/// The mod-11 check digit as a decimal character, or `None` when the check
/// value is 10 and therefore not representable as a single digit.
pub fn mod11_check_digit(digits: &[u32], weights: &[u32]) -> Option<char> {
    char::from_digit(mod11_check_value(digits, weights), 10)
}

/// First four bytes of `SHA-256(SHA-256(data))`.
pub fn double_sha256_prefix4(data: &[u8]) -> [u8; 4] {
    let first = Sha256::digest(data);
    let second = Sha256::digest(first);
    let mut out = [0u8; 4];
    out.copy_from_slice(&second[..4]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weighted_sum_equal_lengths() {
        assert_eq!(weighted_sum(&[1, 2, 3], &[3, 2, 1]), 3 + 4 + 3);
    }

    #[test]
    fn weighted_sum_aligns_right() {
        // Only the last two digits meet a weight.
        assert_eq!(weighted_sum(&[9, 1, 2], &[10, 1]), 10 + 2);
        // Only the last two weights meet a digit.
        assert_eq!(weighted_sum(&[1, 2], &[100, 10, 1]), 10 + 2);
    }

    #[test]
    fn weighted_mod_reduces() {
        assert_eq!(weighted_mod(&[9, 9], &[1, 1], 10), 8);
    }

    #[test]
    fn mod11_known_uid_body() {
        // CHE-100.155.212: body 10015521, weights 5,4,3,2,7,6,5,4 → check 2.
        let body = [1, 0, 0, 1, 5, 5, 2, 1];
        let weights = [5, 4, 3, 2, 7, 6, 5, 4];
        assert_eq!(mod11_check_value(&body, &weights), 2);
        assert_eq!(mod11_check_digit(&body, &weights), Some('2'));
    }

    #[test]
    fn mod11_residue_ten_has_no_digit() {
        // Σ = 1 → (11 - 1) % 11 = 10.
        assert_eq!(mod11_check_value(&[1], &[1]), 10);
        assert_eq!(mod11_check_digit(&[1], &[1]), None);
    }

    #[test]
    fn mod11_zero_sum_gives_zero() {
        assert_eq!(mod11_check_value(&[0, 0], &[5, 4]), 0);
    }

    #[test]
    fn double_sha256_known_vector() {
        // SHA-256(SHA-256("")) = 5df6e0e2761359d30a8275058e299fcc0381534545f55cf43e41983f5d4c9456
        assert_eq!(double_sha256_prefix4(b""), [0x5d, 0xf6, 0xe0, 0xe2]);
    }
}
