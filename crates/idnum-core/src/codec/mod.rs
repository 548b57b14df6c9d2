//! # Alphabet Codecs
//!
//! Decoding primitives for cryptocurrency address formats:
//!
//! - [`base58`]: Base58 decoding (Bitcoin alphabet) backed by `bs58`.
//! - [`bech32`]: Bech32 HRP expansion and polymod checksum backed by the
//!   `bech32` crate's checksum engine.
//! - [`bits`]: strict regrouping of 5-bit values into 8-bit bytes.
//!
//! Codecs report [`CodecError`](crate::error::CodecError); callers map it
//! onto the validation taxonomy.

pub mod base58;
pub mod bech32;
pub mod bits;
