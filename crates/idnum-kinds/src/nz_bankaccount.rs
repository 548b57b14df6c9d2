//! # New Zealand Bank Account Number
//!
//! A 16-digit number made of four fields:
//!
//! | Field | Width | Example |
//! |-------|-------|---------|
//! | bank | 2 | `01` |
//! | branch | 4 | `0242` |
//! | base account | 7 | `0100194` |
//! | suffix | 3 | `000` |
//!
//! Many issuers print the suffix with two digits, so input is accepted with a
//! short suffix and padded.
//!
//! ## Checksum
//!
//! The bank number selects one of several weighted algorithms. Each weighted
//! product is reduced modulo an inner modulus when it strictly exceeds it,
//! and the sum must be divisible by an outer modulus. Numbers from banks with
//! algorithm `X` always pass the checksum.
//!
//! ## Reference Data
//!
//! After the checksum, the bank and branch must both appear in the embedded
//! bank table (`data/nz_banks.dat`), parsed once on first use.

use std::sync::OnceLock;

use serde::Serialize;

use idnum_core::normalize;
use idnum_core::{Attributes, ErrorCategory, Kind, PrefixTable, RefDataError, ValidationError};

use crate::traits::NumberFormat;

/// Canonical length.
pub const LENGTH: usize = 16;

/// Field widths: bank, branch, base account, suffix.
const FIELD_WIDTHS: [usize; 4] = [2, 4, 7, 3];

/// Characters after which the suffix starts in a bare run of digits.
const SUFFIX_START: usize = 13;

/// Base accounts at or above this value switch algorithm `A` to `B`.
const ALGORITHM_B_THRESHOLD: &str = "0990000";

const BANK_TABLE_TEXT: &str = include_str!("../data/nz_banks.dat");

static BANK_TABLE: OnceLock<Result<PrefixTable, RefDataError>> = OnceLock::new();

/// The embedded bank and branch table.
///
/// # Errors
///
/// Returns the parse error if the embedded table is malformed. The result is
/// computed once and shared.
pub fn bank_table() -> Result<&'static PrefixTable, &'static RefDataError> {
    BANK_TABLE
        .get_or_init(|| {
            let table = PrefixTable::parse(BANK_TABLE_TEXT);
            match &table {
                Ok(t) => tracing::debug!(entries = t.len(), "loaded NZ bank table"),
                Err(e) => tracing::error!(error = %e, "embedded NZ bank table is malformed"),
            }
            table
        })
        .as_ref()
}

/// Checksum algorithm selected by the bank number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Algorithm {
    /// Mod 11 over branch and base; most banks.
    A,
    /// Mod 11 over the base only; algorithm-A banks with a base of
    /// `0990000` or above.
    B,
    /// Mod 11 over the base; bank 08.
    D,
    /// Mod 11 over base and suffix with a mod-9 clamp; bank 09.
    E,
    /// Mod 10 over the base; banks 25 and 33.
    F,
    /// Mod 10 over base and suffix with a mod-9 clamp; banks 26, 28 and 29.
    G,
    /// No checksum.
    X,
}

impl Algorithm {
    /// Weight per digit position of the canonical number.
    pub fn weights(&self) -> [u32; LENGTH] {
        match self {
            Self::A => [0, 0, 6, 3, 7, 9, 0, 10, 5, 8, 4, 2, 1, 0, 0, 0],
            Self::B => [0, 0, 0, 0, 0, 0, 0, 10, 5, 8, 4, 2, 1, 0, 0, 0],
            Self::D => [0, 0, 0, 0, 0, 0, 7, 6, 5, 4, 3, 2, 1, 0, 0, 0],
            Self::E => [0, 0, 0, 0, 0, 0, 0, 0, 0, 5, 4, 3, 2, 0, 0, 1],
            Self::F => [0, 0, 0, 0, 0, 0, 1, 7, 3, 1, 7, 3, 1, 0, 0, 0],
            Self::G => [0, 0, 0, 0, 0, 0, 1, 3, 7, 1, 3, 7, 1, 3, 7, 1],
            Self::X => [0; LENGTH],
        }
    }

    /// `(inner, outer)` moduli.
    pub fn moduli(&self) -> (u32, u32) {
        match self {
            Self::A | Self::B | Self::D => (11, 11),
            Self::E => (9, 11),
            Self::F => (10, 10),
            Self::G => (9, 10),
            Self::X => (1, 1),
        }
    }

    /// Single-letter name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::D => "D",
            Self::E => "E",
            Self::F => "F",
            Self::G => "G",
            Self::X => "X",
        }
    }

    /// Algorithm for a bank number; unknown banks get `X`.
    pub fn for_bank(bank: &str) -> Self {
        match bank {
            "01" | "02" | "03" | "04" | "06" | "10" | "11" | "12" | "13" | "14" | "15" | "16"
            | "17" | "18" | "19" | "20" | "21" | "22" | "23" | "24" | "27" | "30" | "35" | "38" => {
                Self::A
            }
            "08" => Self::D,
            "09" => Self::E,
            "25" | "33" => Self::F,
            "26" | "28" | "29" => Self::G,
            _ => Self::X,
        }
    }

    /// Algorithm for a canonical 16-digit number, including the `A` → `B`
    /// switch for high base accounts.
    pub fn for_number(number: &str) -> Self {
        let algorithm = Self::for_bank(number.get(..2).unwrap_or_default());
        let base = number.get(6..SUFFIX_START).unwrap_or_default();
        if algorithm == Self::A && base >= ALGORITHM_B_THRESHOLD {
            Self::B
        } else {
            algorithm
        }
    }

    /// True if the 16 digit values of a canonical number satisfy this
    /// algorithm. Each weighted product is reduced by the inner modulus only
    /// when strictly greater than it.
    pub fn verify(&self, digits: &[u32]) -> bool {
        let (inner, outer) = self.moduli();
        let sum: u32 = digits
            .iter()
            .zip(self.weights())
            .map(|(d, w)| {
                let p = w * d;
                if p > inner {
                    p % inner
                } else {
                    p
                }
            })
            .sum();
        sum % outer == 0
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn fail(category: ErrorCategory, number: &str) -> ValidationError {
    ValidationError::new(category, Kind::NzBankAccount, number)
}

/// Normalize to 16 digits where the input allows it.
///
/// Four fields separated by dashes or whitespace are padded to their widths.
/// Otherwise separators are removed and, for runs of 13 or more characters,
/// the suffix is padded to three digits.
pub fn compact(number: &str) -> String {
    let cleaned = normalize::clean(number);
    let parts: Vec<&str> = cleaned
        .split(|c: char| c == '-' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect();

    if parts.len() == FIELD_WIDTHS.len() {
        return parts
            .iter()
            .zip(FIELD_WIDTHS)
            .map(|(part, width)| normalize::zero_pad(part, width))
            .collect();
    }

    let joined: Vec<char> = parts.concat().chars().collect();
    if joined.len() < SUFFIX_START {
        return joined.into_iter().collect();
    }
    let (head, suffix) = joined.split_at(SUFFIX_START);
    let head: String = head.iter().collect();
    let suffix: String = suffix.iter().collect();
    head + &normalize::zero_pad(&suffix, FIELD_WIDTHS[3])
}

/// A validated NZ bank account number.
///
/// Serializes as the 16-digit canonical string; deserialization validates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NzBankAccountNumber {
    number: String,
    #[serde(skip)]
    algorithm: Algorithm,
}

impl_validating_deserialize!(NzBankAccountNumber);

impl NzBankAccountNumber {
    /// Validate and wrap an account number.
    ///
    /// # Errors
    ///
    /// See [`validate()`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        parse(&value.into())
    }

    /// The 16-digit canonical form.
    pub fn as_str(&self) -> &str {
        &self.number
    }

    /// Two-digit bank number.
    pub fn bank(&self) -> &str {
        &self.number[..2]
    }

    /// Four-digit branch number.
    pub fn branch(&self) -> &str {
        &self.number[2..6]
    }

    /// Seven-digit account base.
    pub fn base(&self) -> &str {
        &self.number[6..SUFFIX_START]
    }

    /// Three-digit suffix, zero-padded.
    pub fn suffix(&self) -> &str {
        &self.number[SUFFIX_START..]
    }

    /// The checksum algorithm that accepted the number.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// The presentation form `BB-BBBB-AAAAAAA-SSS`.
    pub fn formatted(&self) -> String {
        format(&self.number)
    }
}

impl std::fmt::Display for NzBankAccountNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.formatted())
    }
}

fn parse(number: &str) -> Result<NzBankAccountNumber, ValidationError> {
    let number = compact(number);
    let Some(digits) = normalize::digit_values(&number) else {
        return Err(fail(ErrorCategory::InvalidFormat, &number));
    };
    if digits.len() != LENGTH {
        return Err(fail(ErrorCategory::InvalidLength, &number));
    }

    let algorithm = Algorithm::for_number(&number);
    if !algorithm.verify(&digits) {
        return Err(fail(ErrorCategory::InvalidChecksum, &number));
    }

    let table = bank_table().map_err(|_| fail(ErrorCategory::InvalidComponent, &number))?;
    let info = table.info(&number);
    if !info.contains_key("bank") || !info.contains_key("branch") {
        tracing::trace!(number = %number, "bank or branch not in reference table");
        return Err(fail(ErrorCategory::InvalidComponent, &number));
    }

    Ok(NzBankAccountNumber { number, algorithm })
}

/// Validate an account number and return its 16-digit canonical form.
///
/// # Errors
///
/// - `InvalidFormat` if anything but digits remains after [`compact()`]
/// - `InvalidLength` unless exactly 16 digits
/// - `InvalidChecksum` if the bank's algorithm rejects the digits
/// - `InvalidComponent` if bank or branch is not in the bank table
pub fn validate(number: &str) -> Result<String, ValidationError> {
    parse(number).map(|account| account.number)
}

/// `true` if [`validate()`] succeeds.
pub fn is_valid(number: &str) -> bool {
    validate(number).is_ok()
}

/// Presentation form `BB-BBBB-AAAAAAA-SSS`. Does not validate.
pub fn format(number: &str) -> String {
    let chars: Vec<char> = compact(number).chars().collect();
    let mut fields = Vec::with_capacity(FIELD_WIDTHS.len());
    let mut start = 0;
    for (i, width) in FIELD_WIDTHS.iter().enumerate() {
        let end = if i + 1 == FIELD_WIDTHS.len() {
            chars.len()
        } else {
            (start + width).min(chars.len())
        };
        let field: String = chars[start..end].iter().collect();
        if !field.is_empty() {
            fields.push(field);
        }
        start = end;
    }
    fields.join("-")
}

/// Bank and branch attributes of a valid number.
pub fn info(number: &str) -> Option<Attributes> {
    let account = parse(number).ok()?;
    let table = bank_table().ok()?;
    Some(table.info(account.as_str()))
}

/// Descriptor for the `nz.bankaccount` kind.
#[derive(Debug, Clone, Copy, Default)]
pub struct NzBankAccount;

impl NumberFormat for NzBankAccount {
    fn kind(&self) -> Kind {
        Kind::NzBankAccount
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
