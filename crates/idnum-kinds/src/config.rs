//! Registry configuration.
//!
//! Defaults match the plain free functions of each kind module. Override via
//! environment variables, a YAML/JSON document (all fields optional), or
//! explicit construction.

use serde::{Deserialize, Deserializer, Serialize};

use crate::mx_rfc::{self, DEFAULT_SEPARATOR};

/// Default cap on raw input length, in characters.
pub const DEFAULT_MAX_INPUT_CHARS: usize = 256;

/// Options for the Mexican RFC kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RfcConfig {
    /// Verify the final check character. Off by default.
    pub validate_check_digits: bool,
    /// Separator placed between groups by `format`. Must consist of
    /// characters `compact` strips (`-`, `_`, space) or be empty.
    #[serde(deserialize_with = "deserialize_separator")]
    pub separator: String,
}

impl Default for RfcConfig {
    fn default() -> Self {
        Self {
            validate_check_digits: false,
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

/// Configuration for a [`Registry`](crate::Registry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    pub mx_rfc: RfcConfig,
    /// Raw input longer than this is rejected with `InvalidLength` before
    /// any kind-specific work.
    pub max_input_chars: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            mx_rfc: RfcConfig::default(),
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
        }
    }
}

fn deserialize_separator<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    check_separator("mx_rfc.separator", raw).map_err(serde::de::Error::custom)
}

fn check_separator(source: &str, raw: String) -> Result<String, ConfigError> {
    if mx_rfc::is_group_separator(&raw) {
        Ok(raw)
    } else {
        Err(ConfigError::InvalidSeparator(source.to_string(), raw))
    }
}

impl RegistryConfig {
    /// Load configuration from environment variables on top of the defaults.
    ///
    /// Variables:
    /// - `IDNUM_RFC_CHECK_DIGITS` (`1`/`true`/`yes`/`on` or `0`/`false`/`no`/`off`; default off)
    /// - `IDNUM_RFC_SEPARATOR` (default: a single space)
    /// - `IDNUM_MAX_INPUT_CHARS` (default: 256)
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Check invariants that hold for deserialized and environment-loaded
    /// configurations. Call this on configurations built by hand.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidSeparator`] for an RFC separator that `compact`
    /// would not remove, [`ConfigError::InvalidNumber`] for a zero input
    /// limit.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_separator("mx_rfc.separator", self.mx_rfc.separator.clone())?;
        if self.max_input_chars == 0 {
            return Err(ConfigError::InvalidNumber(
                "max_input_chars".to_string(),
                "0".to_string(),
            ));
        }
        Ok(())
    }

    /// Override fields from environment variables that are set.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_vars(|var| std::env::var(var).ok())
    }

    fn apply_vars(&mut self, get: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(raw) = get("IDNUM_RFC_CHECK_DIGITS") {
            self.mx_rfc.validate_check_digits = parse_bool("IDNUM_RFC_CHECK_DIGITS", &raw)?;
        }
        if let Some(raw) = get("IDNUM_RFC_SEPARATOR") {
            self.mx_rfc.separator = check_separator("IDNUM_RFC_SEPARATOR", raw)?;
        }
        if let Some(raw) = get("IDNUM_MAX_INPUT_CHARS") {
            let parsed = raw.trim().parse::<usize>().ok().filter(|n| *n > 0);
            self.max_input_chars = parsed.ok_or_else(|| {
                ConfigError::InvalidNumber("IDNUM_MAX_INPUT_CHARS".to_string(), raw)
            })?;
        }
        Ok(())
    }
}

fn parse_bool(var: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool(var.to_string(), raw.to_string())),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid boolean for {0}: {1:?}")]
    InvalidBool(String, String),
    #[error("invalid positive integer for {0}: {1:?}")]
    InvalidNumber(String, String),
    #[error("invalid RFC group separator for {0}: {1:?} (use \"\", \" \", \"-\" or \"_\")")]
    InvalidSeparator(String, String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults() {
        let cfg = RegistryConfig::default();
        assert!(!cfg.mx_rfc.validate_check_digits);
        assert_eq!(cfg.mx_rfc.separator, " ");
        assert_eq!(cfg.max_input_chars, 256);
    }

    #[test]
    fn env_overrides() {
        let env = vars(&[
            ("IDNUM_RFC_CHECK_DIGITS", "Yes"),
            ("IDNUM_RFC_SEPARATOR", "-"),
            ("IDNUM_MAX_INPUT_CHARS", "64"),
        ]);
        let mut cfg = RegistryConfig::default();
        cfg.apply_vars(|k| env.get(k).cloned()).unwrap();
        assert!(cfg.mx_rfc.validate_check_digits);
        assert_eq!(cfg.mx_rfc.separator, "-");
        assert_eq!(cfg.max_input_chars, 64);
    }

    #[test]
    fn absent_vars_keep_current_values() {
        let mut cfg = RegistryConfig::default();
        cfg.mx_rfc.validate_check_digits = true;
        cfg.apply_vars(|_| None).unwrap();
        assert!(cfg.mx_rfc.validate_check_digits);
    }

    #[test]
    fn rejects_bad_bool() {
        let env = vars(&[("IDNUM_RFC_CHECK_DIGITS", "maybe")]);
        let err = RegistryConfig::default()
            .apply_vars(|k| env.get(k).cloned())
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBool(..)));
    }

    #[test]
    fn rejects_bad_number() {
        for value in ["lots", "0", "-3"] {
            let env = vars(&[("IDNUM_MAX_INPUT_CHARS", value)]);
            let err = RegistryConfig::default()
                .apply_vars(|k| env.get(k).cloned())
                .unwrap_err();
            assert!(matches!(err, ConfigError::InvalidNumber(..)), "{value}");
        }
    }

    #[test]
    fn partial_document_uses_defaults() {
        let cfg: RegistryConfig =
            serde_json::from_str(r#"{"mx_rfc": {"validate_check_digits": true}}"#).unwrap();
        assert!(cfg.mx_rfc.validate_check_digits);
        assert_eq!(cfg.mx_rfc.separator, " ");
        assert_eq!(cfg.max_input_chars, 256);
    }

    #[test]
    fn rejects_separator_compact_keeps() {
        for value in ["/", ".", "-/-"] {
            let env = vars(&[("IDNUM_RFC_SEPARATOR", value)]);
            let err = RegistryConfig::default()
                .apply_vars(|k| env.get(k).cloned())
                .unwrap_err();
            assert!(matches!(err, ConfigError::InvalidSeparator(..)), "{value:?}");
        }
    }

    #[test]
    fn accepts_separators_compact_strips() {
        for value in ["", " ", "-", "_", " - "] {
            let env = vars(&[("IDNUM_RFC_SEPARATOR", value)]);
            let mut cfg = RegistryConfig::default();
            cfg.apply_vars(|k| env.get(k).cloned()).unwrap();
            assert_eq!(cfg.mx_rfc.separator, value);
            cfg.validate().unwrap();
        }
    }

    #[test]
    fn document_with_bad_separator_is_rejected() {
        let err = serde_json::from_str::<RegistryConfig>(r#"{"mx_rfc": {"separator": "/"}}"#)
            .unwrap_err();
        assert!(err.to_string().contains("invalid RFC group separator"));
        let cfg: RegistryConfig =
            serde_json::from_str(r#"{"mx_rfc": {"separator": "_"}}"#).unwrap();
        assert_eq!(cfg.mx_rfc.separator, "_");
    }

    #[test]
    fn validate_checks_hand_built_config() {
        let mut cfg = RegistryConfig::default();
        cfg.validate().unwrap();
        cfg.mx_rfc.separator = "/".to_string();
        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidSeparator(..))));
        cfg.mx_rfc.separator = "-".to_string();
        cfg.max_input_chars = 0;
        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidNumber(..))));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(serde_json::from_str::<RegistryConfig>(r#"{"max_chars": 3}"#).is_err());
    }
}
