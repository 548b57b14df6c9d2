//! # Error Hierarchy
//!
//! Structured error types for identifier validation, built with `thiserror`.
//! No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! [`ValidationError`] is the closed taxonomy every kind reports through.
//! [`CodecError`] is internal to the codecs and is converted at the kind
//! boundary with [`CodecError::into_validation()`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::kind::Kind;

/// The four failure categories shared by all kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Characters outside the kind's alphabet or a structural mismatch.
    InvalidFormat,
    /// Canonical length outside the allowed set.
    InvalidLength,
    /// Structure is fine but the check digits disagree.
    InvalidChecksum,
    /// A semantically constrained sub-field is out of range.
    InvalidComponent,
}

impl ErrorCategory {
    /// Returns the snake_case identifier, matching the serde format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidFormat => "invalid_format",
            Self::InvalidLength => "invalid_length",
            Self::InvalidChecksum => "invalid_checksum",
            Self::InvalidComponent => "invalid_component",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation failure for an identifier.
///
/// Every variant carries the kind that rejected the number and the canonical
/// (compacted) string that failed, so callers can report the offending input
/// without keeping the raw value around.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Characters outside the alphabet or pattern mismatch.
    #[error("invalid {kind} format: \"{number}\"")]
    InvalidFormat {
        /// The kind that rejected the number.
        kind: Kind,
        /// The canonical form that failed.
        number: String,
    },

    /// Canonical length not in the allowed set.
    #[error("invalid {kind} length: \"{number}\"")]
    InvalidLength {
        /// The kind that rejected the number.
        kind: Kind,
        /// The canonical form that failed.
        number: String,
    },

    /// Check digits do not match.
    #[error("invalid {kind} checksum: \"{number}\"")]
    InvalidChecksum {
        /// The kind that rejected the number.
        kind: Kind,
        /// The canonical form that failed.
        number: String,
    },

    /// A sub-field (date, prefix, bank, witness version) is out of range.
    #[error("invalid {kind} component: \"{number}\"")]
    InvalidComponent {
        /// The kind that rejected the number.
        kind: Kind,
        /// The canonical form that failed.
        number: String,
    },
}

impl ValidationError {
    /// Build an error of the given category.
    pub fn new(category: ErrorCategory, kind: Kind, number: impl Into<String>) -> Self {
        let number = number.into();
        match category {
            ErrorCategory::InvalidFormat => Self::InvalidFormat { kind, number },
            ErrorCategory::InvalidLength => Self::InvalidLength { kind, number },
            ErrorCategory::InvalidChecksum => Self::InvalidChecksum { kind, number },
            ErrorCategory::InvalidComponent => Self::InvalidComponent { kind, number },
        }
    }

    /// The failure category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidFormat { .. } => ErrorCategory::InvalidFormat,
            Self::InvalidLength { .. } => ErrorCategory::InvalidLength,
            Self::InvalidChecksum { .. } => ErrorCategory::InvalidChecksum,
            Self::InvalidComponent { .. } => ErrorCategory::InvalidComponent,
        }
    }

    /// The kind that raised the error.
    pub fn kind(&self) -> Kind {
        match self {
            Self::InvalidFormat { kind, .. }
            | Self::InvalidLength { kind, .. }
            | Self::InvalidChecksum { kind, .. }
            | Self::InvalidComponent { kind, .. } => *kind,
        }
    }

    /// The canonical string that failed validation.
    pub fn number(&self) -> &str {
        match self {
            Self::InvalidFormat { number, .. }
            | Self::InvalidLength { number, .. }
            | Self::InvalidChecksum { number, .. }
            | Self::InvalidComponent { number, .. } => number,
        }
    }
}

/// Codec-internal failures.
///
/// These never escape a validator; see [`CodecError::into_validation()`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Character outside the Base58 alphabet.
    #[error("character {0:?} is not in the base58 alphabet")]
    Base58Character(char),

    /// The Base58 backend rejected the input.
    #[error("base58 decoding failed: {0}")]
    Base58(String),

    /// Character outside the Bech32 data alphabet.
    #[error("character {0:?} is not in the bech32 alphabet")]
    Bech32Character(char),

    /// A value fed to the Bech32 checksum is not a 5-bit field element.
    #[error("value {0} is not a 5-bit field element")]
    Bech32Value(u8),

    /// Human-readable prefix contains characters outside printable ASCII.
    #[error("invalid bech32 human-readable prefix: {0:?}")]
    Bech32Hrp(String),

    /// A regrouping input value does not fit in the source width.
    #[error("value {value} does not fit in {bits} bits")]
    ValueOutOfRange {
        /// The offending value.
        value: u8,
        /// The source group width.
        bits: u32,
    },

    /// Regrouping left a full source group (or more) unconsumed.
    #[error("{bits} leftover bits after regrouping")]
    ExcessPadding {
        /// Number of leftover bits.
        bits: u32,
    },

    /// Regrouping left padding bits that are not all zero.
    #[error("non-zero padding in {bits} leftover bits")]
    NonZeroPadding {
        /// Number of leftover bits.
        bits: u32,
    },
}

impl CodecError {
    /// Map a codec failure onto the validation taxonomy.
    ///
    /// Alphabet problems are format errors; padding and range problems in the
    /// decoded payload are component errors.
    pub fn into_validation(self, kind: Kind, number: impl Into<String>) -> ValidationError {
        let category = match self {
            Self::Base58Character(_)
            | Self::Base58(_)
            | Self::Bech32Character(_)
            | Self::Bech32Hrp(_) => ErrorCategory::InvalidFormat,
            Self::Bech32Value(_)
            | Self::ValueOutOfRange { .. }
            | Self::ExcessPadding { .. }
            | Self::NonZeroPadding { .. } => ErrorCategory::InvalidComponent,
        };
        ValidationError::new(category, kind, number)
    }
}

/// Errors while parsing an embedded prefix reference table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RefDataError {
    /// A line could not be parsed.
    #[error("reference data line {line}: {reason}")]
    Syntax {
        /// 1-based line number.
        line: usize,
        /// Why the line was rejected.
        reason: String,
    },

    /// An entry is indented deeper than its parent allows.
    #[error("reference data line {line}: indentation skips a level")]
    Orphan {
        /// 1-based line number.
        line: usize,
    },
}

/// A kind tag that does not name any supported standard.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown number kind: {0:?}")]
pub struct UnknownKind(pub String);
