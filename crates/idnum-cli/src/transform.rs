//! # Compact and Format Subcommands
//!
//! Print the canonical or presentation form of each number, one per line.
//! Neither validates: garbage in, normalized garbage out.

use anyhow::Result;
use clap::Args;

use idnum_core::Kind;
use idnum_kinds::Registry;

use crate::EXIT_VALID;

/// Arguments shared by `compact` and `format`.
#[derive(Args, Debug)]
pub struct TransformArgs {
    /// Number kind (ch.uid, mx.rfc, nz.bankaccount, bitcoin).
    pub kind: Kind,

    /// Numbers to transform.
    #[arg(required = true)]
    pub numbers: Vec<String>,
}

/// Which transformation to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    Compact,
    Format,
}

impl Transform {
    pub fn apply(&self, registry: &Registry, kind: Kind, number: &str) -> String {
        match self {
            Self::Compact => registry.compact(kind, number),
            Self::Format => registry.format(kind, number),
        }
    }
}

/// Execute `compact` or `format`.
pub fn run_transform(
    args: &TransformArgs,
    transform: Transform,
    registry: &Registry,
) -> Result<u8> {
    for number in &args.numbers {
        println!("{}", transform.apply(registry, args.kind, number));
    }
    Ok(EXIT_VALID)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_and_format() {
        let registry = Registry::default();
        assert_eq!(
            Transform::Compact.apply(&registry, Kind::NzBankAccount, "01-0242-0100194-00"),
            "0102420100194000"
        );
        assert_eq!(
            Transform::Format.apply(&registry, Kind::NzBankAccount, "0102420100194000"),
            "01-0242-0100194-000"
        );
        assert_eq!(
            Transform::Format.apply(&registry, Kind::MxRfc, "gode561231gr8"),
            "GODE 561231 GR8"
        );
    }
}
