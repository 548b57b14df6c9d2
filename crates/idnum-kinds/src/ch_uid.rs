//! # Swiss UID (Unternehmens-Identifikationsnummer)
//!
//! Every Swiss business is assigned a UID: the prefix `CHE`, eight digits,
//! and a mod-11 check digit. The canonical form is `CHE` followed by the
//! nine digits; the presentation form is `CHE-DDD.DDD.DDD`.
//!
//! ## Validation
//!
//! - Exactly 12 characters after normalization
//! - Must start with `CHE`
//! - Positions 3..12 must be digits
//! - Check digit is `(11 - Σ wᵢ·dᵢ) mod 11` with weights
//!   `5, 4, 3, 2, 7, 6, 5, 4`; a computed value of 10 is never valid
//!
//! Registry details (name, legal form, status) are not part of the number;
//! they can be fetched through a [`LookupClient`] with [`lookup()`].

use serde::Serialize;

use idnum_core::checksum::mod11_check_digit;
use idnum_core::normalize::{self, CasePolicy};
use idnum_core::{Attributes, ErrorCategory, Kind, LookupClient, LookupError, ValidationError};

use crate::traits::NumberFormat;

const SEPARATORS: &str = " -.";
const PREFIX: &str = "CHE";
const LENGTH: usize = 12;

/// Check-digit weights for the eight-digit body.
pub const WEIGHTS: [u32; 8] = [5, 4, 3, 2, 7, 6, 5, 4];

fn fail(category: ErrorCategory, number: &str) -> ValidationError {
    ValidationError::new(category, Kind::ChUid, number)
}

/// Strip spaces, dashes and dots; upper-case.
pub fn compact(number: &str) -> String {
    normalize::compact(number, SEPARATORS, CasePolicy::Upper)
}

/// Check digit for an eight-digit body.
///
/// Returns `None` if `body` is not exactly eight digits or if the computed
/// value is 10, which no valid UID can carry.
pub fn calc_check_digit(body: &str) -> Option<char> {
    let digits = normalize::digit_values(body)?;
    if digits.len() != WEIGHTS.len() {
        return None;
    }
    mod11_check_digit(&digits, &WEIGHTS)
}

/// Validate a UID and return its canonical form.
///
/// # Errors
///
/// - `InvalidLength` unless exactly 12 characters
/// - `InvalidComponent` if the prefix is not `CHE`
/// - `InvalidFormat` if the nine trailing characters are not all digits
/// - `InvalidChecksum` if the check digit disagrees or would be 10
pub fn validate(number: &str) -> Result<String, ValidationError> {
    let number = compact(number);
    if number.chars().count() != LENGTH {
        return Err(fail(ErrorCategory::InvalidLength, &number));
    }
    if !number.starts_with(PREFIX) {
        return Err(fail(ErrorCategory::InvalidComponent, &number));
    }
    let digits = &number[PREFIX.len()..];
    if !normalize::all_digits(digits) {
        return Err(fail(ErrorCategory::InvalidFormat, &number));
    }
    let (body, check) = digits.split_at(WEIGHTS.len());
    match calc_check_digit(body) {
        Some(expected) if check.starts_with(expected) => Ok(number),
        _ => Err(fail(ErrorCategory::InvalidChecksum, &number)),
    }
}

/// `true` if [`validate()`] succeeds.
pub fn is_valid(number: &str) -> bool {
    validate(number).is_ok()
}

/// Presentation form `CHE-DDD.DDD.DDD`.
///
/// Does not validate; shorter or longer input is grouped the same way.
pub fn format(number: &str) -> String {
    let chars: Vec<char> = compact(number).chars().collect();
    let head: String = chars.iter().take(PREFIX.len()).collect();
    let groups: Vec<String> = chars
        .get(PREFIX.len()..)
        .unwrap_or_default()
        .chunks(3)
        .map(|group| group.iter().collect())
        .collect();
    format!("{head}-{}", groups.join("."))
}

/// Validate `number`, then ask `client` for registry details.
///
/// # Errors
///
/// - [`LookupError::Invalid`] if the number does not validate; the client is
///   not called
/// - [`LookupError::Transport`] if the client fails
pub fn lookup<C: LookupClient>(
    client: &C,
    number: &str,
) -> Result<Option<Attributes>, LookupError<C::Error>> {
    let number = validate(number)?;
    tracing::debug!(kind = %Kind::ChUid, "querying UID registry");
    client.lookup(&number).map_err(LookupError::Transport)
}

/// A validated Swiss UID in canonical form.
///
/// Serializes as the canonical string; deserialization validates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SwissUid(String);

impl_validating_deserialize!(SwissUid);

impl SwissUid {
    /// Validate and wrap a UID.
    ///
    /// # Errors
    ///
    /// See [`validate()`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        validate(&value.into()).map(Self)
    }

    /// The canonical form (`CHE` + 9 digits).
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The presentation form `CHE-DDD.DDD.DDD`.
    pub fn formatted(&self) -> String {
        format(&self.0)
    }
}

impl std::fmt::Display for SwissUid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.formatted())
    }
}

/// Descriptor for the `ch.uid` kind.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChUid;

impl NumberFormat for ChUid {
    fn kind(&self) -> Kind {
        Kind::ChUid
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use idnum_core::InMemoryLookup;

    #[test]
    fn validates_formatted_number() {
        assert_eq!(validate("CHE-100.155.212").unwrap(), "CHE100155212");
        assert_eq!(validate("che 109 322 551").unwrap(), "CHE109322551");
    }

    #[test]
    fn format_groups_digits() {
        assert_eq!(format("CHE100155212"), "CHE-100.155.212");
        assert_eq!(format("che-100155212"), "CHE-100.155.212");
    }

    #[test]
    fn format_short_input_does_not_panic() {
        assert_eq!(format("CH"), "CH-");
        assert_eq!(format("CHE1234"), "CHE-123.4");
    }

    #[test]
    fn wrong_check_digit() {
        let err = validate("CHE-100.155.213").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::InvalidChecksum);
        assert_eq!(err.kind(), Kind::ChUid);
        assert_eq!(err.number(), "CHE100155213");
    }

    #[test]
    fn check_value_ten_is_never_valid() {
        // Σ = 3·4 = 12 ≡ 1 (mod 11) → check value 10.
        assert_eq!(calc_check_digit("00000003"), None);
        for last in '0'..='9' {
            let number = format!("CHE00000003{last}");
            let err = validate(&number).unwrap_err();
            assert_eq!(err.category(), ErrorCategory::InvalidChecksum);
        }
    }

    #[test]
    fn calc_check_digit_known_values() {
        assert_eq!(calc_check_digit("10015521"), Some('2'));
        assert_eq!(calc_check_digit("00000001"), Some('7'));
        assert_eq!(calc_check_digit("1001552"), None);
        assert_eq!(calc_check_digit("1001552x"), None);
    }

    #[test]
    fn wrong_length() {
        for number in ["", "CHE10015521", "CHE1001552120"] {
            let err = validate(number).unwrap_err();
            assert_eq!(err.category(), ErrorCategory::InvalidLength, "{number:?}");
        }
    }

    #[test]
    fn wrong_prefix() {
        let err = validate("CHF100155212").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::InvalidComponent);
    }

    #[test]
    fn non_digit_body() {
        let err = validate("CHE10015521X").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::InvalidFormat);
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // 12 characters, one of them multi-byte: length passes, body fails.
        let err = validate("CHE10015521Ñ").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::InvalidFormat);
    }

    #[test]
    fn newtype_roundtrip() {
        let uid = SwissUid::new("CHE-100.155.212").unwrap();
        assert_eq!(uid.as_str(), "CHE100155212");
        assert_eq!(uid.to_string(), "CHE-100.155.212");
        let json = serde_json::to_string(&uid).unwrap();
        assert_eq!(json, "\"CHE100155212\"");
        let back: SwissUid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, uid);
        assert!(serde_json::from_str::<SwissUid>("\"CHE100155213\"").is_err());
    }

    #[test]
    fn lookup_validates_before_calling_client() {
        let mut record = Attributes::new();
        record.insert("name".to_string(), "Example AG".to_string());
        let client = InMemoryLookup::new().with_record("CHE100155212", record.clone());

        assert_eq!(lookup(&client, "CHE-100.155.212").unwrap(), Some(record));
        assert_eq!(lookup(&client, "CHE-109.322.551").unwrap(), None);
        assert!(matches!(
            lookup(&client, "CHE-100.155.213"),
            Err(LookupError::Invalid(_))
        ));
    }

    #[derive(Debug)]
    struct Offline;

    impl LookupClient for Offline {
        type Error = std::io::Error;

        fn lookup(&self, _number: &str) -> Result<Option<Attributes>, Self::Error> {
            Err(std::io::Error::new(std::io::ErrorKind::NotConnected, "offline"))
        }
    }

    #[test]
    fn lookup_transport_error_is_not_a_validation_error() {
        let err = lookup(&Offline, "CHE-100.155.212").unwrap_err();
        assert!(matches!(err, LookupError::Transport(_)));
    }

    #[test]
    fn descriptor_delegates() {
        let d = ChUid;
        assert_eq!(d.kind(), Kind::ChUid);
        assert!(d.is_valid("CHE-100.155.212"));
        assert!(!d.is_valid("CHE-100.155.213"));
        assert!(d.info("CHE-100.155.212").is_none());
    }
}
