//! # Number Format Trait
//!
//! The uniform contract every kind implements. The registry stores one
//! descriptor per kind behind this trait.

use idnum_core::{Attributes, Kind, ValidationError};

/// Operations shared by every identifier kind.
///
/// ## Contract
///
/// - [`compact`](Self::compact) never fails and is idempotent.
/// - [`validate`](Self::validate) returns the canonical form on success.
/// - [`is_valid`](Self::is_valid) is `true` iff `validate` succeeds.
/// - [`format`](Self::format) accepts raw or canonical input; for any `x`
///   that validates, `validate(format(x)) == compact(x)`.
/// - [`info`](Self::info) is only meaningful for valid input.
pub trait NumberFormat: Send + Sync + std::fmt::Debug {
    /// The kind this descriptor validates.
    fn kind(&self) -> Kind;

    /// Normalize raw input into canonical form.
    fn compact(&self, number: &str) -> String;

    /// Validate `number` and return its canonical form.
    ///
    /// # Errors
    ///
    /// Returns the first failure detected, in the order
    /// length/structure → character set → sub-field → checksum →
    /// reference data.
    fn validate(&self, number: &str) -> Result<String, ValidationError>;

    /// `true` if [`validate`](Self::validate) succeeds.
    fn is_valid(&self, number: &str) -> bool {
        self.validate(number).is_ok()
    }

    /// Presentation form of `number`.
    fn format(&self, number: &str) -> String;

    /// Attributes derived from a valid number, or `None` if the kind
    /// defines no local information.
    fn info(&self, _number: &str) -> Option<Attributes> {
        None
    }
}
