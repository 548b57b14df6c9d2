//! # Bitcoin Address
//!
//! Two encodings are accepted:
//!
//! - **Base58Check** (`1…` pay-to-pubkey-hash, `3…` pay-to-script-hash):
//!   25 bytes, the last four of which are the first four bytes of the
//!   double SHA-256 of the first 21.
//! - **Bech32** (`bc1…` segregated witness): a witness version and a 2 to 40
//!   byte witness program; version 0 programs are 20 or 32 bytes.
//!
//! Base58Check addresses are case-sensitive and keep the case they were
//! entered in. Bech32 addresses are case-insensitive and canonicalized to
//! lower case.
//!
//! Every witness version is checked against the original Bech32 constant.
//! Bech32m (BIP-350) addresses for versions 1 to 16 are therefore rejected
//! with `InvalidChecksum`, and BIP-173 style version 1+ addresses pass.

use serde::Serialize;

use idnum_core::checksum::double_sha256_prefix4;
use idnum_core::codec::{base58, bech32, bits};
use idnum_core::normalize::{self, CasePolicy};
use idnum_core::{Attributes, ErrorCategory, Kind, ValidationError};

use crate::traits::NumberFormat;

const SEPARATORS: &str = " ";
const SEGWIT_PREFIX: &str = "bc1";
const SEGWIT_HRP: &str = "bc";

/// Decoded length of a Base58Check address.
const BASE58_LENGTH: usize = 25;
/// Version byte plus 20-byte hash.
const BASE58_PAYLOAD: usize = 21;

const BECH32_MIN_LENGTH: usize = 11;
const BECH32_MAX_LENGTH: usize = 90;
const MAX_WITNESS_VERSION: u8 = 16;
const MIN_PROGRAM_LENGTH: usize = 2;
const MAX_PROGRAM_LENGTH: usize = 40;

fn fail(category: ErrorCategory, number: &str) -> ValidationError {
    ValidationError::new(category, Kind::Bitcoin, number)
}

/// Address type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Base58Check, leading `1`.
    P2pkh,
    /// Base58Check, leading `3`.
    P2sh,
    /// Bech32 with HRP `bc`.
    Segwit,
}

impl Variant {
    /// Lowercase name, as reported by `info`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::P2pkh => "p2pkh",
            Self::P2sh => "p2sh",
            Self::Segwit => "segwit",
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trim whitespace; lower-case Bech32 addresses, keep Base58 case.
pub fn compact(number: &str) -> String {
    normalize::compact(number, SEPARATORS, CasePolicy::LowerIfPrefix(&[SEGWIT_PREFIX]))
}

/// A validated Bitcoin address.
///
/// Serializes as the canonical string; deserialization validates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct BitcoinAddress {
    number: String,
    #[serde(skip)]
    variant: Variant,
    #[serde(skip)]
    witness_version: Option<u8>,
    #[serde(skip)]
    payload: Vec<u8>,
}

impl_validating_deserialize!(BitcoinAddress);

impl BitcoinAddress {
    /// Validate and wrap an address.
    ///
    /// # Errors
    ///
    /// See [`validate()`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        parse(&value.into())
    }

    /// The canonical address.
    pub fn as_str(&self) -> &str {
        &self.number
    }

    /// Address type.
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Witness version for Bech32 addresses.
    pub fn witness_version(&self) -> Option<u8> {
        self.witness_version
    }

    /// The 20-byte hash for Base58Check addresses (version byte and
    /// checksum stripped), or the witness program for Bech32 addresses.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }
}

impl std::fmt::Display for BitcoinAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.number)
    }
}

fn parse(number: &str) -> Result<BitcoinAddress, ValidationError> {
    let number = compact(number);
    if number.starts_with('1') || number.starts_with('3') {
        parse_base58(number)
    } else if number.starts_with(SEGWIT_PREFIX) {
        parse_bech32(number)
    } else {
        Err(fail(ErrorCategory::InvalidComponent, &number))
    }
}

fn parse_base58(number: String) -> Result<BitcoinAddress, ValidationError> {
    let bytes = base58::decode(&number).map_err(|e| e.into_validation(Kind::Bitcoin, &number))?;
    if bytes.len() != BASE58_LENGTH {
        return Err(fail(ErrorCategory::InvalidLength, &number));
    }
    let (payload, checksum) = bytes.split_at(BASE58_PAYLOAD);
    if double_sha256_prefix4(payload) != checksum {
        return Err(fail(ErrorCategory::InvalidChecksum, &number));
    }
    let variant = if number.starts_with('1') {
        Variant::P2pkh
    } else {
        Variant::P2sh
    };
    Ok(BitcoinAddress {
        payload: payload[1..].to_vec(),
        number,
        variant,
        witness_version: None,
    })
}

fn parse_bech32(number: String) -> Result<BitcoinAddress, ValidationError> {
    let values = bech32::to_values(&number[SEGWIT_PREFIX.len()..])
        .map_err(|e| e.into_validation(Kind::Bitcoin, &number))?;

    let length = number.chars().count();
    if !(BECH32_MIN_LENGTH..=BECH32_MAX_LENGTH).contains(&length) {
        return Err(fail(ErrorCategory::InvalidLength, &number));
    }

    let checksum_ok = bech32::verify_checksum(SEGWIT_HRP, &values)
        .map_err(|e| e.into_validation(Kind::Bitcoin, &number))?;
    if !checksum_ok {
        return Err(fail(ErrorCategory::InvalidChecksum, &number));
    }

    let version = values[0];
    let program = bits::five_to_eight(&values[1..values.len() - bech32::CHECKSUM_LEN])
        .map_err(|e| e.into_validation(Kind::Bitcoin, &number))?;

    if version > MAX_WITNESS_VERSION {
        return Err(fail(ErrorCategory::InvalidComponent, &number));
    }
    if !(MIN_PROGRAM_LENGTH..=MAX_PROGRAM_LENGTH).contains(&program.len()) {
        return Err(fail(ErrorCategory::InvalidLength, &number));
    }
    if version == 0 && program.len() != 20 && program.len() != 32 {
        return Err(fail(ErrorCategory::InvalidLength, &number));
    }

    Ok(BitcoinAddress {
        number,
        variant: Variant::Segwit,
        witness_version: Some(version),
        payload: program,
    })
}

/// Validate an address and return its canonical form.
///
/// # Errors
///
/// - `InvalidComponent` if the address starts with neither `1`, `3` nor
///   `bc1`, or carries a witness version above 16 or bad regroup padding
/// - `InvalidFormat` for characters outside the encoding's alphabet
/// - `InvalidLength` for a wrong decoded or program length
/// - `InvalidChecksum` if the checksum disagrees
pub fn validate(number: &str) -> Result<String, ValidationError> {
    parse(number).map(|address| address.number)
}

/// `true` if [`validate()`] succeeds.
pub fn is_valid(number: &str) -> bool {
    validate(number).is_ok()
}

/// Addresses have no presentation form beyond the canonical one.
pub fn format(number: &str) -> String {
    compact(number)
}

/// Variant, plus witness version and program length for Bech32 addresses.
pub fn info(number: &str) -> Option<Attributes> {
    let address = parse(number).ok()?;
    let mut attributes = Attributes::new();
    attributes.insert("variant".to_string(), address.variant.to_string());
    if let Some(version) = address.witness_version {
        attributes.insert("witness_version".to_string(), version.to_string());
        attributes.insert("program_length".to_string(), address.payload.len().to_string());
    }
    Some(attributes)
}

/// Descriptor for the `bitcoin` kind.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bitcoin;

impl NumberFormat for Bitcoin {
    fn kind(&self) -> Kind {
        Kind::Bitcoin
    }

    fn compact(&self, number: &str) -> String {
        compact(number)
    }

    fn validate(&self, number: &str) -> Result<String, ValidationError> {
        validate(number)
    }

    fn format(&self, number: &str) -> String {
        format(number)
    }

    fn info(&self, number: &str) -> Option<Attributes> {
        info(number)
    }
}
