//! # Configuration Loading
//!
//! Builds the [`RegistryConfig`] for one invocation. Sources are applied in
//! order, later ones winning:
//!
//! 1. Built-in defaults.
//! 2. The YAML file given with `--config` (every field optional).
//! 3. `IDNUM_*` environment variables.
//! 4. Command-line flags (`--check-digits`).

use std::path::Path;

use anyhow::{Context, Result};

use idnum_kinds::RegistryConfig;

/// Load the configuration for this invocation.
///
/// # Errors
///
/// Fails if the file cannot be read or parsed, if an environment variable
/// holds a malformed value, or if the merged result is inconsistent (for
/// example an RFC separator that `compact` would not strip).
pub fn load_config(path: Option<&Path>, check_digits: bool) -> Result<RegistryConfig> {
    let mut config = match path {
        Some(path) => read_config_file(path)?,
        None => RegistryConfig::default(),
    };
    config
        .apply_env()
        .context("invalid IDNUM_* environment variable")?;
    if check_digits {
        config.mx_rfc.validate_check_digits = true;
    }
    config.validate().context("invalid configuration")?;
    tracing::debug!(?config, "configuration loaded");
    Ok(config)
}

/// Parse a YAML configuration file.
pub fn read_config_file(path: &Path) -> Result<RegistryConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    if text.trim().is_empty() {
        return Ok(RegistryConfig::default());
    }
    serde_yaml::from_str(&text)
        .with_context(|| format!("failed to parse config file {}", path.display()))
}
