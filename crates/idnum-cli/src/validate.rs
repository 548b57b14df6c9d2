//! # Validate Subcommand
//!
//! Checks one or more numbers of a single kind. Prints one line per number
//! and exits non-zero if any of them is invalid.

use anyhow::Result;
use clap::Args;

use idnum_core::Kind;
use idnum_kinds::Registry;

use crate::{exit_code, json_line, Report};

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Number kind (ch.uid, mx.rfc, nz.bankaccount, bitcoin).
    pub kind: Kind,

    /// Numbers to validate.
    #[arg(required = true)]
    pub numbers: Vec<String>,

    /// Emit one JSON object per number instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Validate every number and collect the verdicts.
pub fn reports(registry: &Registry, kind: Kind, numbers: &[String]) -> Vec<Report> {
    numbers
        .iter()
        .map(|number| Report::new(number, registry.validate(kind, number)))
        .collect()
}

/// Text form of a verdict.
pub fn render(report: &Report) -> String {
    match (&report.canonical, &report.message) {
        (Some(canonical), _) => format!("{}: valid ({canonical})", report.number),
        (None, Some(message)) => format!("{}: {message}", report.number),
        (None, None) => format!("{}: invalid", report.number),
    }
}

/// Execute the validate subcommand.
pub fn run_validate(args: &ValidateArgs, registry: &Registry) -> Result<u8> {
    let reports = reports(registry, args.kind, &args.numbers);
    for report in &reports {
        if args.json {
            println!("{}", json_line(report)?);
        } else {
            println!("{}", render(report));
        }
    }
    let invalid = reports.iter().filter(|r| !r.valid).count();
    tracing::info!(kind = %args.kind, checked = reports.len(), invalid, "validation finished");
    Ok(exit_code(invalid == 0))
}
