//! # Kind Registry
//!
//! A fixed map from [`Kind`] to its [`NumberFormat`] descriptor, built once
//! from a [`RegistryConfig`]. The façade methods on [`Registry`] add the
//! input-size guard and logging on top of the per-kind operations, so
//! callers can treat every kind the same way.
//!
//! Lookup is an exhaustive `match`, not a hash map: a new [`Kind`] variant
//! does not compile until it has a descriptor here.

use std::sync::OnceLock;

use idnum_core::{Attributes, ErrorCategory, Kind, UnknownKind, ValidationError};

use crate::bitcoin::Bitcoin;
use crate::ch_uid::ChUid;
use crate::config::RegistryConfig;
use crate::mx_rfc::MxRfc;
use crate::nz_bankaccount::NzBankAccount;
use crate::traits::NumberFormat;

static GLOBAL: OnceLock<Registry> = OnceLock::new();

/// Descriptors for every kind plus the shared input limit.
#[derive(Debug, Clone)]
pub struct Registry {
    ch_uid: ChUid,
    mx_rfc: MxRfc,
    nz_bankaccount: NzBankAccount,
    bitcoin: Bitcoin,
    max_input_chars: usize,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(&RegistryConfig::default())
    }
}

impl Registry {
    /// Build a registry from `config`.
    pub fn new(config: &RegistryConfig) -> Self {
        Self {
            ch_uid: ChUid,
            mx_rfc: MxRfc::new()
                .with_check_digits(config.mx_rfc.validate_check_digits)
                .with_separator(config.mx_rfc.separator.clone()),
            nz_bankaccount: NzBankAccount,
            bitcoin: Bitcoin,
            max_input_chars: config.max_input_chars,
        }
    }

    /// Shared registry with the default configuration.
    pub fn global() -> &'static Registry {
        GLOBAL.get_or_init(Registry::default)
    }

    /// The descriptor for `kind`.
    pub fn get(&self, kind: Kind) -> &dyn NumberFormat {
        match kind {
            Kind::ChUid => &self.ch_uid,
            Kind::MxRfc => &self.mx_rfc,
            Kind::NzBankAccount => &self.nz_bankaccount,
            Kind::Bitcoin => &self.bitcoin,
        }
    }

    /// The descriptor for a dotted kind name such as `nz.bankaccount`.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownKind`] if the name is not registered.
    pub fn by_name(&self, name: &str) -> Result<&dyn NumberFormat, UnknownKind> {
        Ok(self.get(name.parse()?))
    }

    /// Descriptors of every kind issued by `country` (ISO 3166-1 alpha-2,
    /// case-insensitive).
    pub fn by_country(&self, country: &str) -> Vec<&dyn NumberFormat> {
        Kind::all()
            .iter()
            .filter(|kind| {
                kind.country()
                    .is_some_and(|code| code.eq_ignore_ascii_case(country))
            })
            .map(|kind| self.get(*kind))
            .collect()
    }

    /// Every registered kind, in canonical order.
    pub fn kinds(&self) -> &'static [Kind] {
        Kind::all()
    }

    /// Raw input limit in characters.
    pub fn max_input_chars(&self) -> usize {
        self.max_input_chars
    }

    pub fn compact(&self, kind: Kind, number: &str) -> String {
        self.get(kind).compact(number)
    }

    /// Validate `number` as `kind` and return its canonical form.
    ///
    /// # Errors
    ///
    /// `InvalidLength` if the raw input exceeds the configured limit;
    /// otherwise whatever the kind reports.
    pub fn validate(&self, kind: Kind, number: &str) -> Result<String, ValidationError> {
        tracing::trace!(%kind, number, "validating");
        let descriptor = self.get(kind);
        if number.chars().count() > self.max_input_chars {
            let err = ValidationError::new(
                ErrorCategory::InvalidLength,
                kind,
                descriptor.compact(number),
            );
            tracing::debug!(%kind, category = %err.category(), "input exceeds limit");
            return Err(err);
        }
        descriptor.validate(number).map_err(|err| {
            tracing::debug!(%kind, category = %err.category(), "rejected");
            err
        })
    }

    /// `true` if [`validate`](Self::validate) succeeds.
    pub fn is_valid(&self, kind: Kind, number: &str) -> bool {
        self.validate(kind, number).is_ok()
    }

    pub fn format(&self, kind: Kind, number: &str) -> String {
        self.get(kind).format(number)
    }

    /// Kind-specific attributes of a valid number.
    pub fn info(&self, kind: Kind, number: &str) -> Option<Attributes> {
        if number.chars().count() > self.max_input_chars {
            return None;
        }
        self.get(kind).info(number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use idnum_core::KIND_COUNT;

    #[test]
    fn every_kind_has_matching_descriptor() {
        let registry = Registry::default();
        assert_eq!(registry.kinds().len(), KIND_COUNT);
        for kind in registry.kinds() {
            assert_eq!(registry.get(*kind).kind(), *kind);
        }
    }

    #[test]
    fn by_name() {
        let registry = Registry::default();
        let nz = registry.by_name("nz.bankaccount").unwrap();
        assert_eq!(nz.kind(), Kind::NzBankAccount);
        let err = registry.by_name("de.vat").unwrap_err();
        assert_eq!(err.0, "de.vat");
    }

    #[test]
    fn by_country() {
        let registry = Registry::default();
        let mx = registry.by_country("MX");
        assert_eq!(mx.len(), 1);
        assert_eq!(mx[0].kind(), Kind::MxRfc);
        assert!(registry.by_country("de").is_empty());
    }

    #[test]
    fn config_reaches_rfc_descriptor() {
        let mut config = RegistryConfig::default();
        config.mx_rfc.validate_check_digits = true;
        config.mx_rfc.separator = "-".to_string();
        let registry = Registry::new(&config);
        let err = registry.validate(Kind::MxRfc, "VACE-460910-SX6").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::InvalidChecksum);
        assert_eq!(registry.format(Kind::MxRfc, "GODE561231GR8"), "GODE-561231-GR8");

        let lenient = Registry::default();
        assert_eq!(lenient.validate(Kind::MxRfc, "VACE-460910-SX6").unwrap(), "VACE460910SX6");
    }

    #[test]
    fn rfc_format_round_trips_under_every_accepted_separator() {
        for separator in ["", "-", "_", " - "] {
            let document = format!(r#"{{"mx_rfc": {{"separator": {separator:?}}}}}"#);
            let config: RegistryConfig = serde_json::from_str(&document).unwrap();
            let registry = Registry::new(&config);
            for number in ["GODE561231GR8", "MAB9307148T4", "GODE561231"] {
                let formatted = registry.format(Kind::MxRfc, number);
                assert_eq!(
                    registry.validate(Kind::MxRfc, &formatted).as_deref(),
                    Ok(number),
                    "{separator:?} {formatted:?}"
                );
            }
        }
        let rejected = serde_json::from_str::<RegistryConfig>(r#"{"mx_rfc": {"separator": "/"}}"#);
        assert!(rejected.is_err());
    }

    #[test]
    fn oversized_input_is_rejected_before_validation() {
        let config = RegistryConfig {
            max_input_chars: 10,
            ..RegistryConfig::default()
        };
        let registry = Registry::new(&config);
        let err = registry.validate(Kind::ChUid, "CHE-100.155.212").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::InvalidLength);
        assert_eq!(err.number(), "CHE100155212");
        assert!(registry.info(Kind::ChUid, "CHE-100.155.212").is_none());
        assert!(!registry.is_valid(Kind::ChUid, "CHE100155212"));
    }

    #[test]
    fn limit_counts_characters() {
        let config = RegistryConfig {
            max_input_chars: 10,
            ..RegistryConfig::default()
        };
        let registry = Registry::new(&config);
        // Ten characters, eleven bytes.
        assert_eq!(registry.validate(Kind::MxRfc, "PEÑA561231").unwrap(), "PEÑA561231");
    }

    #[test]
    fn facade_delegates() {
        let registry = Registry::global();
        assert_eq!(registry.compact(Kind::Bitcoin, " BC1SW50QA3JX3S "), "bc1sw50qa3jx3s");
        assert!(registry.is_valid(Kind::NzBankAccount, "01-0242-0100194-00"));
        assert_eq!(
            registry
                .info(Kind::NzBankAccount, "01-0242-0100194-00")
                .and_then(|info| info.get("bank").cloned()),
            Some("ANZ Bank New Zealand".to_string())
        );
    }
}
