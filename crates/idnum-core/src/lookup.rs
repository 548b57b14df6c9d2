//! # Registry Lookup Capability
//!
//! Some identifier standards have an authoritative online registry (the
//! Swiss UID register, for example). The transport is outside this
//! workspace; validators only see the [`LookupClient`] trait.
//!
//! A lookup is only attempted for numbers that validated. Transport failures
//! are passed through as [`LookupError::Transport`] and are never turned into
//! validation errors.

use std::collections::BTreeMap;
use std::convert::Infallible;

use thiserror::Error;

use crate::error::ValidationError;
use crate::refdata::Attributes;

/// A synchronous registry lookup.
///
/// Implementations decide their own transport, retries and timeouts.
pub trait LookupClient {
    /// Transport-level failure type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Look up a canonical, already validated number. `Ok(None)` means the
    /// registry has no record for it.
    fn lookup(&self, number: &str) -> Result<Option<Attributes>, Self::Error>;
}

/// Failure of a validate-then-lookup call.
#[derive(Error, Debug)]
pub enum LookupError<E>
where
    E: std::error::Error + 'static,
{
    /// The number did not validate; the client was not called.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// The client failed.
    #[error("registry lookup failed: {0}")]
    Transport(#[source] E),
}

/// A lookup client backed by an in-memory map. Never fails.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLookup {
    records: BTreeMap<String, Attributes>,
}

impl InMemoryLookup {
    /// Create an empty client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the record for a canonical number.
    pub fn insert(&mut self, number: impl Into<String>, attributes: Attributes) {
        self.records.insert(number.into(), attributes);
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_record(mut self, number: impl Into<String>, attributes: Attributes) -> Self {
        self.insert(number, attributes);
        self
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if no records are stored.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl LookupClient for InMemoryLookup {
    type Error = Infallible;

    fn lookup(&self, number: &str) -> Result<Option<Attributes>, Self::Error> {
        Ok(self.records.get(number).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCategory;
    use crate::kind::Kind;

    fn attrs(name: &str) -> Attributes {
        let mut a = Attributes::new();
        a.insert("name".to_string(), name.to_string());
        a
    }

    #[test]
    fn in_memory_hit_and_miss() {
        let client = InMemoryLookup::new().with_record("CHE100155212", attrs("Example AG"));
        assert_eq!(client.len(), 1);
        let hit = client.lookup("CHE100155212").unwrap();
        assert_eq!(hit, Some(attrs("Example AG")));
        assert_eq!(client.lookup("CHE000000000").unwrap(), None);
    }

    #[test]
    fn invalid_wraps_validation_error() {
        let invalid =
            ValidationError::new(ErrorCategory::InvalidChecksum, Kind::ChUid, "CHE100155213");
        let err: LookupError<Infallible> = invalid.into();
        assert!(matches!(err, LookupError::Invalid(_)));
        assert!(format!("{err}").contains("checksum"));
    }

    #[test]
    fn transport_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "registry timed out");
        let err = LookupError::Transport(io);
        assert!(format!("{err}").contains("registry timed out"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
