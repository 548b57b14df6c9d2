//! # Mexican RFC (Registro Federal de Contribuyentes)
//!
//! The RFC is issued by the SAT to every tax payer. It is built from the
//! holder's name, a date, and (usually) a three-character serial assigned by
//! the tax office:
//!
//! | Holder | Length | Layout |
//! |--------|--------|--------|
//! | company | 12 | 3 name chars, `YYMMDD`, 3 serial chars |
//! | person | 10 or 13 | 4 name chars, `YYMMDD`, optional 3 serial chars |
//!
//! Name characters are `A-Z`, `&` and `Ñ`; serial characters are `0-9A-Z`.
//!
//! ## Date Century
//!
//! The date is always read as `20YY`. Numbers issued before 2000 therefore
//! map to the wrong century but still pass as long as the day exists in the
//! 20xx year (29 February only in 20xx leap years).
//!
//! ## Check Digit
//!
//! Checking the final serial character is opt-in
//! ([`MxRfc::with_check_digits`]): a noticeable share of legitimately issued
//! numbers carry a check digit that does not match the published algorithm.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;

use idnum_core::normalize::{self, CasePolicy};
use idnum_core::{Attributes, ErrorCategory, Kind, ValidationError};

use crate::traits::NumberFormat;

const SEPARATORS: &str = "-_ ";

/// Default separator between the name, date and serial groups.
pub const DEFAULT_SEPARATOR: &str = " ";

/// `true` if [`compact()`] removes every character of `separator`, so that
/// numbers formatted with it validate back to their canonical form. The
/// empty string qualifies.
pub fn is_group_separator(separator: &str) -> bool {
    separator.chars().all(|c| SEPARATORS.contains(c))
}

/// Alphabet for the check-digit computation; a character's value is its
/// position. Note `&` between `N` and `O`, and the space before `Ñ`.
const CHECK_ALPHABET: &str = "0123456789ABCDEFGHIJKLMN&OPQRSTUVWXYZ Ñ";

/// Width of the right-aligned check-digit window.
const CHECK_WINDOW: usize = 12;

/// Four-letter personal prefixes that SAT never issues.
pub const NAME_BLACKLIST: [&str; 41] = [
    "BUEI", "BUEY", "CACA", "CACO", "CAGA", "CAGO", "CAKA", "CAKO", "COGE", "COJA", "COJE",
    "COJI", "COJO", "CULO", "FETO", "GUEY", "JOTO", "KACA", "KACO", "KAGA", "KAGO", "KOGE",
    "KOJO", "KAKA", "KULO", "MAME", "MAMO", "MEAR", "MEAS", "MEON", "MION", "MOCO", "MULA",
    "PEDA", "PEDO", "PENE", "PUTA", "PUTO", "QULO", "RATA", "RUIN",
];

static COMPANY_PATTERN: OnceLock<Regex> = OnceLock::new();
static PERSON_PATTERN: OnceLock<Regex> = OnceLock::new();
static SERIAL_PATTERN: OnceLock<Regex> = OnceLock::new();

fn company_regex() -> &'static Regex {
    COMPANY_PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Z&Ñ]{3}[0-9]{6}[0-9A-Z]{3}$").expect("invalid company pattern")
    })
}

fn person_regex() -> &'static Regex {
    PERSON_PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Z&Ñ]{4}[0-9]{6}[0-9A-Z]{0,3}$").expect("invalid person pattern")
    })
}

fn serial_regex() -> &'static Regex {
    SERIAL_PATTERN.get_or_init(|| {
        Regex::new(r"^[1-9A-V][1-9A-Z][0-9A]$").expect("invalid serial pattern")
    })
}

fn fail(category: ErrorCategory, number: &str) -> ValidationError {
    ValidationError::new(category, Kind::MxRfc, number)
}

/// Who the number was issued to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Holder {
    /// Natural person (10 or 13 characters).
    Person,
    /// Legal entity (12 characters).
    Company,
}

impl Holder {
    /// Number of name characters at the start of the number.
    pub fn name_len(&self) -> usize {
        match self {
            Self::Person => 4,
            Self::Company => 3,
        }
    }

    /// Returns the snake_case identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::Company => "company",
        }
    }
}

impl std::fmt::Display for Holder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strip dashes, underscores and spaces; upper-case.
pub fn compact(number: &str) -> String {
    normalize::compact(number, SEPARATORS, CasePolicy::Upper)
}

/// Check character for the number without its final character.
///
/// The input is left-padded with spaces to a 12-character window and each
/// character's alphabet value is weighted `13 - i`. Returns `None` if a
/// character is outside the check alphabet.
pub fn calc_check_digit(number: &str) -> Option<char> {
    let chars: Vec<char> = number.chars().collect();
    let window: Vec<char> = std::iter::repeat(' ')
        .take(CHECK_WINDOW.saturating_sub(chars.len()))
        .chain(chars.iter().skip(chars.len().saturating_sub(CHECK_WINDOW)).copied())
        .collect();

    let alphabet: Vec<char> = CHECK_ALPHABET.chars().collect();
    let mut sum: u64 = 0;
    for (i, c) in window.iter().enumerate() {
        let value = alphabet.iter().position(|a| a == c)?;
        sum += value as u64 * (13 - i as u64);
    }
    // (11 - sum) mod 11 without going negative.
    let check = (11 - sum % 11) % 11;
    alphabet.get(check as usize).copied()
}

fn parse_date(digits: &str) -> Option<NaiveDate> {
    let field = |range: std::ops::Range<usize>| digits.get(range)?.parse::<u32>().ok();
    let year = field(0..2)?;
    let month = field(2..4)?;
    let day = field(4..6)?;
    NaiveDate::from_ymd_opt(2000 + year as i32, month, day)
}

/// A validated RFC.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Rfc {
    number: String,
    holder: Holder,
    date: NaiveDate,
}

impl Rfc {
    /// Validate and wrap an RFC without check-digit verification.
    ///
    /// # Errors
    ///
    /// See [`parse()`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        parse(&value.into(), false)
    }

    /// The canonical form.
    pub fn as_str(&self) -> &str {
        &self.number
    }

    /// Person or company.
    pub fn holder(&self) -> Holder {
        self.holder
    }

    /// The embedded date, read in the 20xx century.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// The name characters.
    pub fn name(&self) -> String {
        self.number.chars().take(self.holder.name_len()).collect()
    }

    /// The serial (homoclave), empty for 10-character personal numbers.
    pub fn serial(&self) -> String {
        self.number.chars().skip(self.holder.name_len() + 6).collect()
    }
}

impl std::fmt::Display for Rfc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.number)
    }
}

/// Validate an RFC and return the parsed value.
///
/// # Errors
///
/// - `InvalidLength` unless 10, 12 or 13 characters
/// - `InvalidFormat` if the layout for that length does not match
/// - `InvalidComponent` for a blacklisted personal prefix or an impossible
///   date; with `validate_check_digits`, also for a malformed serial
/// - `InvalidChecksum` with `validate_check_digits` when the last character
///   disagrees
pub fn parse(number: &str, validate_check_digits: bool) -> Result<Rfc, ValidationError> {
    let number = compact(number);
    let chars: Vec<char> = number.chars().collect();

    let holder = match chars.len() {
        10 | 13 => Holder::Person,
        12 => Holder::Company,
        _ => return Err(fail(ErrorCategory::InvalidLength, &number)),
    };
    let pattern = match holder {
        Holder::Person => person_regex(),
        Holder::Company => company_regex(),
    };
    if !pattern.is_match(&number) {
        return Err(fail(ErrorCategory::InvalidFormat, &number));
    }

    let name_len = holder.name_len();
    if holder == Holder::Person {
        let name: String = chars[..name_len].iter().collect();
        if NAME_BLACKLIST.contains(&name.as_str()) {
            return Err(fail(ErrorCategory::InvalidComponent, &number));
        }
    }
    let date_digits: String = chars[name_len..name_len + 6].iter().collect();
    let date = parse_date(&date_digits)
        .ok_or_else(|| fail(ErrorCategory::InvalidComponent, &number))?;

    if validate_check_digits && chars.len() >= 12 {
        let serial: String = chars[chars.len() - 3..].iter().collect();
        if !serial_regex().is_match(&serial) {
            return Err(fail(ErrorCategory::InvalidComponent, &number));
        }
        let body: String = chars[..chars.len() - 1].iter().collect();
        if calc_check_digit(&body) != chars.last().copied() {
            return Err(fail(ErrorCategory::InvalidChecksum, &number));
        }
    }

    Ok(Rfc {
        number,
        holder,
        date,
    })
}

/// Validate an RFC and return its canonical form.
///
/// # Errors
///
/// See [`parse()`].
pub fn validate(number: &str, validate_check_digits: bool) -> Result<String, ValidationError> {
    parse(number, validate_check_digits).map(|rfc| rfc.number)
}

/// `true` if [`validate()`] succeeds.
pub fn is_valid(number: &str, validate_check_digits: bool) -> bool {
    validate(number, validate_check_digits).is_ok()
}

/// Presentation form: name, date and serial groups joined by `separator`,
/// with empty trailing groups dropped.
pub fn format(number: &str, separator: &str) -> String {
    let chars: Vec<char> = compact(number).chars().collect();
    let name_len = if chars.len() == 12 { 3 } else { 4 };
    let group = |from: usize, to: usize| -> String {
        chars
            .get(from.min(chars.len())..to.min(chars.len()))
            .unwrap_or_default()
            .iter()
            .collect()
    };
    let groups = [
        group(0, name_len),
        group(name_len, name_len + 6),
        group(name_len + 6, chars.len()),
    ];
    let joined = groups.join(separator);
    if separator.is_empty() {
        return joined;
    }
    let mut trimmed = joined.as_str();
    while let Some(rest) = trimmed.strip_prefix(separator) {
        trimmed = rest;
    }
    while let Some(rest) = trimmed.strip_suffix(separator) {
        trimmed = rest;
    }
    trimmed.to_string()
}

/// Holder type and ISO date of a valid RFC.
pub fn info(number: &str) -> Option<Attributes> {
    let rfc = parse(number, false).ok()?;
    let mut attributes = Attributes::new();
    attributes.insert("holder".to_string(), rfc.holder.to_string());
    attributes.insert("date".to_string(), rfc.date.format("%Y-%m-%d").to_string());
    Some(attributes)
}

/// Descriptor for the `mx.rfc` kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MxRfc {
    validate_check_digits: bool,
    separator: String,
}

impl Default for MxRfc {
    fn default() -> Self {
        Self {
            validate_check_digits: false,
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

impl MxRfc {
    /// Descriptor with check-digit verification off and a space separator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn check-digit verification on or off.
    pub fn with_check_digits(mut self, enabled: bool) -> Self {
        self.validate_check_digits = enabled;
        self
    }

    /// Use `separator` between groups in [`NumberFormat::format`]. Only
    /// separators accepted by [`is_group_separator`] keep `format` output
    /// valid; [`RegistryConfig`](crate::RegistryConfig) enforces this.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Whether check digits are verified.
    pub fn validates_check_digits(&self) -> bool {
        self.validate_check_digits
    }
}

impl NumberFormat for MxRfc {
    fn kind(&self) -> Kind {
        Kind::MxRfc
    }

    fn compact(&self, number: &str) -> String {
        compact(number)
    }

    fn validate(&self, number: &str) -> Result<String, ValidationError> {
        validate(number, self.validate_check_digits)
    }

    fn format(&self, number: &str) -> String {
        format(number, &self.separator)
    }

    fn info(&self, number: &str) -> Option<Attributes> {
        info(number)
    }
}
