//! # Info Subcommand
//!
//! Validates each number and prints the attributes its kind derives from
//! it (bank and branch, holder and date, address variant). Swiss UIDs carry
//! no local attributes.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use idnum_core::{Attributes, Kind};
use idnum_kinds::Registry;

use crate::{exit_code, json_line};

/// Arguments for the info subcommand.
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Number kind (ch.uid, mx.rfc, nz.bankaccount, bitcoin).
    pub kind: Kind,

    /// Numbers to describe.
    #[arg(required = true)]
    pub numbers: Vec<String>,

    /// Emit one JSON object per number instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Attributes of one number, or the reason it has none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InfoReport {
    pub number: String,
    pub valid: bool,
    pub canonical: Option<String>,
    pub info: Attributes,
    pub message: Option<String>,
}

pub fn describe(registry: &Registry, kind: Kind, number: &str) -> InfoReport {
    match registry.validate(kind, number) {
        Ok(canonical) => InfoReport {
            number: number.to_string(),
            valid: true,
            info: registry.info(kind, &canonical).unwrap_or_default(),
            canonical: Some(canonical),
            message: None,
        },
        Err(err) => InfoReport {
            number: number.to_string(),
            valid: false,
            canonical: None,
            info: Attributes::new(),
            message: Some(err.to_string()),
        },
    }
}

/// Text form: a header line, then one indented `key: value` line per
/// attribute.
pub fn render(report: &InfoReport) -> String {
    let Some(canonical) = &report.canonical else {
        return format!("{}: {}", report.number, report.message.as_deref().unwrap_or("invalid"));
    };
    let mut out = format!("{}: {canonical}", report.number);
    if report.info.is_empty() {
        out.push_str("\n  (no local information)");
    }
    for (key, value) in &report.info {
        out.push_str(&format!("\n  {key}: {value}"));
    }
    out
}

/// Execute the info subcommand.
pub fn run_info(args: &InfoArgs, registry: &Registry) -> Result<u8> {
    let mut all_valid = true;
    for number in &args.numbers {
        let report = describe(registry, args.kind, number);
        all_valid &= report.valid;
        if args.json {
            println!("{}", json_line(&report)?);
        } else {
            println!("{}", render(&report));
        }
    }
    Ok(exit_code(all_valid))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nz_account_attributes() {
        let registry = Registry::default();
        let report = describe(&registry, Kind::NzBankAccount, "01-0242-0100194-00");
        assert!(report.valid);
        assert_eq!(
            render(&report),
            "01-0242-0100194-00: 0102420100194000\n  \
             bank: ANZ Bank New Zealand\n  \
             bic: ANZBNZ22\n  \
             branch: ANZ Retail"
        );
    }

    #[test]
    fn uid_has_no_local_information() {
        let registry = Registry::default();
        let report = describe(&registry, Kind::ChUid, "CHE-100.155.212");
        assert!(report.info.is_empty());
        assert!(render(&report).ends_with("(no local information)"));
    }

    #[test]
    fn invalid_number_reports_error() {
        let registry = Registry::default();
        let report = describe(&registry, Kind::MxRfc, "GODE561331GR8");
        assert!(!report.valid);
        assert_eq!(
            render(&report),
            "GODE561331GR8: invalid mx.rfc component: \"GODE561331GR8\""
        );
    }

    #[test]
    fn json_shape() {
        let registry = Registry::default();
        let report = describe(&registry, Kind::MxRfc, "MAB-930714-8T4");
        let value: serde_json::Value = serde_json::from_str(&json_line(&report).unwrap()).unwrap();
        assert_eq!(value["canonical"], "MAB9307148T4");
        assert_eq!(value["info"]["holder"], "company");
        assert_eq!(value["info"]["date"], "2093-07-14");
    }
}
