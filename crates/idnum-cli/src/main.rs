//! # idnum CLI entry point
//!
//! Parses command-line arguments, loads configuration, and dispatches to
//! subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use idnum_cli::config::load_config;
use idnum_cli::info::{run_info, InfoArgs};
use idnum_cli::kinds::{run_kinds, KindsArgs};
use idnum_cli::transform::{run_transform, Transform, TransformArgs};
use idnum_cli::validate::{run_validate, ValidateArgs};
use idnum_cli::{EXIT_CONFIG, EXIT_INVALID};
use idnum_kinds::Registry;

/// Validate, normalize and describe national identifiers and account
/// numbers.
#[derive(Parser, Debug)]
#[command(name = "idnum", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verify Mexican RFC check digits.
    #[arg(long, global = true)]
    check_digits: bool,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check numbers and report a verdict for each.
    Validate(ValidateArgs),

    /// Print the canonical form of each number.
    Compact(TransformArgs),

    /// Print the presentation form of each number.
    Format(TransformArgs),

    /// Print attributes derived from each valid number.
    Info(InfoArgs),

    /// List the supported number kinds.
    Kinds(KindsArgs),
}

/// Default filter directive for a `-v` count.
fn verbosity_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn init_tracing(verbose: u8, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity_level(verbose)));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(EXIT_INVALID)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_tracing(cli.verbose, cli.log_json);
    tracing::debug!("idnum CLI v{} starting", env!("CARGO_PKG_VERSION"));

    let config = match load_config(cli.config.as_deref(), cli.check_digits) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(EXIT_CONFIG);
        }
    };
    let registry = Registry::new(&config);

    let result = match &cli.command {
        Commands::Validate(args) => run_validate(args, &registry),
        Commands::Compact(args) => run_transform(args, Transform::Compact, &registry),
        Commands::Format(args) => run_transform(args, Transform::Format, &registry),
        Commands::Info(args) => run_info(args, &registry),
        Commands::Kinds(args) => run_kinds(args, &registry),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_INVALID)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use idnum_core::Kind;

    #[test]
    fn cli_parse_validate() {
        let cli = Cli::try_parse_from(["idnum", "validate", "ch.uid", "CHE-100.155.212"]).unwrap();
        if let Commands::Validate(args) = cli.command {
            assert_eq!(args.kind, Kind::ChUid);
            assert_eq!(args.numbers, vec!["CHE-100.155.212".to_string()]);
            assert!(!args.json);
        } else {
            panic!("expected validate");
        }
    }

    #[test]
    fn cli_parse_validate_many_with_json() {
        let cli = Cli::try_parse_from([
            "idnum",
            "validate",
            "nz.bankaccount",
            "01-0242-0100194-00",
            "01-0242-0100195-00",
            "--json",
        ])
        .unwrap();
        if let Commands::Validate(args) = cli.command {
            assert_eq!(args.kind, Kind::NzBankAccount);
            assert_eq!(args.numbers.len(), 2);
            assert!(args.json);
        } else {
            panic!("expected validate");
        }
    }

    #[test]
    fn cli_parse_validate_requires_number() {
        assert!(Cli::try_parse_from(["idnum", "validate", "bitcoin"]).is_err());
    }

    #[test]
    fn cli_parse_unknown_kind_errors() {
        assert!(Cli::try_parse_from(["idnum", "validate", "fr.siren", "123"]).is_err());
    }

    #[test]
    fn cli_parse_compact_and_format() {
        let cli = Cli::try_parse_from(["idnum", "compact", "mx.rfc", "GODE 561231 GR8"]).unwrap();
        assert!(matches!(cli.command, Commands::Compact(_)));
        let cli = Cli::try_parse_from(["idnum", "format", "bitcoin", "BC1QW508"]).unwrap();
        assert!(matches!(cli.command, Commands::Format(_)));
    }

    #[test]
    fn cli_parse_info() {
        let cli =
            Cli::try_parse_from(["idnum", "info", "mx.rfc", "MAB-930714-8T4", "--json"]).unwrap();
        if let Commands::Info(args) = cli.command {
            assert_eq!(args.kind, Kind::MxRfc);
            assert!(args.json);
        } else {
            panic!("expected info");
        }
    }

    #[test]
    fn cli_parse_kinds_with_country() {
        let cli = Cli::try_parse_from(["idnum", "kinds", "--country", "ch"]).unwrap();
        if let Commands::Kinds(args) = cli.command {
            assert_eq!(args.country.as_deref(), Some("ch"));
        } else {
            panic!("expected kinds");
        }
    }

    #[test]
    fn cli_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "idnum",
            "validate",
            "mx.rfc",
            "VACE-460910-SX6",
            "--check-digits",
            "--config",
            "idnum.yaml",
            "-vv",
        ])
        .unwrap();
        assert!(cli.check_digits);
        assert_eq!(cli.config, Some(PathBuf::from("idnum.yaml")));
        assert_eq!(cli.verbose, 2);
        assert!(!cli.log_json);
    }

    #[test]
    fn cli_parse_verbose_levels() {
        for (args, expected) in [
            (vec!["idnum", "kinds"], "warn"),
            (vec!["idnum", "-v", "kinds"], "info"),
            (vec!["idnum", "-vv", "kinds"], "debug"),
            (vec!["idnum", "-vvvv", "kinds"], "trace"),
        ] {
            let cli = Cli::try_parse_from(args).unwrap();
            assert_eq!(verbosity_level(cli.verbose), expected);
        }
    }

    #[test]
    fn cli_parse_no_subcommand_errors() {
        assert!(Cli::try_parse_from(["idnum"]).is_err());
    }
}
