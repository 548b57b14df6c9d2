//! # idnum-cli: Command-Line Interface
//!
//! Provides the `idnum` binary on top of the
//! [`Registry`](idnum_kinds::Registry) façade.
//!
//! ## Subcommands
//!
//! - `idnum validate <kind> <number>...`: check numbers, exit 0 only if all
//!   are valid.
//! - `idnum compact <kind> <number>...`: print the canonical form.
//! - `idnum format <kind> <number>...`: print the presentation form.
//! - `idnum info <kind> <number>...`: print attributes of valid numbers.
//! - `idnum kinds`: list the supported kinds.
//!
//! ```bash
//! idnum validate nz.bankaccount 01-0242-0100194-00
//! idnum --check-digits validate mx.rfc VACE-460910-SX6 --json
//! idnum --config idnum.yaml info bitcoin bc1qardv855yjngspvxuttq897aqca3lxju2y69jce
//! ```
//!
//! ## Exit Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | every number valid, or the command has no verdict |
//! | 1 | at least one number invalid, or a usage error |
//! | 2 | configuration could not be loaded |

pub mod config;
pub mod info;
pub mod kinds;
pub mod transform;
pub mod validate;

use idnum_core::{ErrorCategory, ValidationError};
use serde::Serialize;

/// Exit code when every number is valid.
pub const EXIT_VALID: u8 = 0;
/// Exit code when a number is invalid or the invocation is wrong.
pub const EXIT_INVALID: u8 = 1;
/// Exit code when configuration could not be loaded.
pub const EXIT_CONFIG: u8 = 2;

/// Per-number verdict, emitted as one JSON object per line with `--json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// The input exactly as given.
    pub number: String,
    pub valid: bool,
    /// Canonical form if valid.
    pub canonical: Option<String>,
    /// Failure category if invalid.
    pub error: Option<ErrorCategory>,
    /// Human-readable failure message if invalid.
    pub message: Option<String>,
}

impl Report {
    /// Build a report from a validation result.
    pub fn new(number: &str, result: Result<String, ValidationError>) -> Self {
        match result {
            Ok(canonical) => Self {
                number: number.to_string(),
                valid: true,
                canonical: Some(canonical),
                error: None,
                message: None,
            },
            Err(err) => Self {
                number: number.to_string(),
                valid: false,
                canonical: None,
                error: Some(err.category()),
                message: Some(err.to_string()),
            },
        }
    }
}

/// Map a batch verdict to an exit code.
pub fn exit_code(all_valid: bool) -> u8 {
    if all_valid {
        EXIT_VALID
    } else {
        EXIT_INVALID
    }
}

/// Serialize `value` as a single JSON line.
pub fn json_line<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string(value)?)
}
