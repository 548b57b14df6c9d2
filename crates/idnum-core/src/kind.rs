//! # Number Kinds: Single Source of Truth
//!
//! Defines the [`Kind`] enum naming every identifier standard the workspace
//! validates. This is the ONE definition used by the error taxonomy, the
//! registry, and the CLI. Every `match` on `Kind` is exhaustive, so adding a
//! standard forces every consumer to handle it at compile time.
//!
//! The string form follows the `<country>.<name>` convention (`ch.uid`,
//! `mx.rfc`, `nz.bankaccount`); identifiers without a country keep a bare
//! name (`bitcoin`).

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::UnknownKind;

/// All identifier standards known to the workspace.
///
/// | Tag | Standard |
/// |-----|----------|
/// | `ch.uid` | Swiss business identifier (Unternehmens-Identifikationsnummer) |
/// | `mx.rfc` | Mexican tax number (Registro Federal de Contribuyentes) |
/// | `nz.bankaccount` | New Zealand bank account number |
/// | `bitcoin` | Bitcoin address (P2PKH, P2SH, SegWit) |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Kind {
    /// Swiss UID: `CHE` + 8 digits + mod-11 check digit.
    #[serde(rename = "ch.uid")]
    ChUid,
    /// Mexican RFC: name prefix + date + optional serial.
    #[serde(rename = "mx.rfc")]
    MxRfc,
    /// New Zealand bank account: bank, branch, base, suffix.
    #[serde(rename = "nz.bankaccount")]
    NzBankAccount,
    /// Bitcoin address.
    #[serde(rename = "bitcoin")]
    Bitcoin,
}

/// Total number of kinds. Used for compile-time assertions.
pub const KIND_COUNT: usize = 4;

impl Kind {
    /// Returns all kinds in canonical order.
    pub fn all() -> &'static [Kind] {
        &[Self::ChUid, Self::MxRfc, Self::NzBankAccount, Self::Bitcoin]
    }

    /// Returns the dotted string identifier for this kind.
    ///
    /// This must match the serde serialization format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ChUid => "ch.uid",
            Self::MxRfc => "mx.rfc",
            Self::NzBankAccount => "nz.bankaccount",
            Self::Bitcoin => "bitcoin",
        }
    }

    /// ISO 3166-1 alpha-2 country code (lowercase) of the issuing country,
    /// if the standard is national.
    pub fn country(&self) -> Option<&'static str> {
        match self {
            Self::ChUid => Some("ch"),
            Self::MxRfc => Some("mx"),
            Self::NzBankAccount => Some("nz"),
            Self::Bitcoin => None,
        }
    }

    /// Human-readable name of the standard.
    pub fn description(&self) -> &'static str {
        match self {
            Self::ChUid => "Swiss business identifier (UID)",
            Self::MxRfc => "Mexican tax number (RFC)",
            Self::NzBankAccount => "New Zealand bank account number",
            Self::Bitcoin => "Bitcoin address",
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = UnknownKind;

    /// Parse a kind from its dotted identifier.
    ///
    /// Accepts the same identifiers produced by [`Kind::as_str()`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ch.uid" => Ok(Self::ChUid),
            "mx.rfc" => Ok(Self::MxRfc),
            "nz.bankaccount" => Ok(Self::NzBankAccount),
            "bitcoin" => Ok(Self::Bitcoin),
            other => Err(UnknownKind(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_kinds_count() {
        assert_eq!(Kind::all().len(), KIND_COUNT);
    }

    #[test]
    fn as_str_roundtrip() {
        for kind in Kind::all() {
            let parsed: Kind = kind
                .as_str()
                .parse()
                .unwrap_or_else(|e| panic!("failed to parse {kind}: {e}"));
            assert_eq!(*kind, parsed);
        }
    }

    #[test]
    fn from_str_invalid() {
        assert!("CH.UID".parse::<Kind>().is_err()); // case-sensitive
        assert!("ch".parse::<Kind>().is_err());
        assert!("".parse::<Kind>().is_err());
    }

    #[test]
    fn serde_format_matches_as_str() {
        for kind in Kind::all() {
            let json = serde_json::to_string(kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
            let back: Kind = serde_json::from_str(&json).unwrap();
            assert_eq!(back, *kind);
        }
    }

    #[test]
    fn country_prefix_matches_tag() {
        for kind in Kind::all() {
            match kind.country() {
                Some(cc) => assert!(kind.as_str().starts_with(&format!("{cc}."))),
                None => assert!(!kind.as_str().contains('.')),
            }
        }
    }
}
