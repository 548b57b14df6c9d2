//! # Kinds Subcommand
//!
//! Lists the supported number kinds, optionally filtered by country.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use idnum_core::Kind;
use idnum_kinds::Registry;

use crate::{json_line, EXIT_VALID};

/// Arguments for the kinds subcommand.
#[derive(Args, Debug)]
pub struct KindsArgs {
    /// Only list kinds issued by this country (ISO 3166-1 alpha-2).
    #[arg(long)]
    pub country: Option<String>,

    /// Emit one JSON object per kind instead of a table.
    #[arg(long)]
    pub json: bool,
}

/// One row of the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KindEntry {
    pub kind: Kind,
    pub country: Option<&'static str>,
    pub description: &'static str,
}

impl From<Kind> for KindEntry {
    fn from(kind: Kind) -> Self {
        Self {
            kind,
            country: kind.country(),
            description: kind.description(),
        }
    }
}

/// Kinds matching the filter, in canonical order.
pub fn entries(registry: &Registry, country: Option<&str>) -> Vec<KindEntry> {
    match country {
        Some(country) => registry
            .by_country(country)
            .into_iter()
            .map(|descriptor| KindEntry::from(descriptor.kind()))
            .collect(),
        None => registry.kinds().iter().copied().map(KindEntry::from).collect(),
    }
}

pub fn render(entry: &KindEntry) -> String {
    format!(
        "{:<16} {:<4} {}",
        entry.kind.as_str(),
        entry.country.unwrap_or("-"),
        entry.description
    )
}

/// Execute the kinds subcommand.
pub fn run_kinds(args: &KindsArgs, registry: &Registry) -> Result<u8> {
    for entry in entries(registry, args.country.as_deref()) {
        if args.json {
            println!("{}", json_line(&entry)?);
        } else {
            println!("{}", render(&entry));
        }
    }
    Ok(EXIT_VALID)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_kind() {
        let registry = Registry::default();
        let all = entries(&registry, None);
        assert_eq!(all.len(), idnum_core::KIND_COUNT);
        assert_eq!(all[0].kind, Kind::ChUid);
    }

    #[test]
    fn country_filter() {
        let registry = Registry::default();
        let nz = entries(&registry, Some("nz"));
        assert_eq!(nz.len(), 1);
        assert_eq!(nz[0].kind, Kind::NzBankAccount);
        assert!(entries(&registry, Some("fr")).is_empty());
    }

    #[test]
    fn text_and_json_rows() {
        let entry = KindEntry::from(Kind::Bitcoin);
        assert_eq!(render(&entry), "bitcoin          -    Bitcoin address");
        let value: serde_json::Value = serde_json::from_str(&json_line(&entry).unwrap()).unwrap();
        assert_eq!(value["kind"], "bitcoin");
        assert_eq!(value["country"], serde_json::Value::Null);
    }
}
