//! # idnum-kinds: Identifier Validators
//!
//! One module per identifier standard, each exposing the same free
//! functions (`compact`, `validate`, `is_valid`, `format`, and `info` where
//! defined), a validated newtype, and a unit descriptor implementing
//! [`NumberFormat`]. The [`Registry`] maps every [`Kind`](idnum_core::Kind)
//! to its descriptor so callers can parameterize by kind without special
//! casing.
//!
//! | Module | Kind | Canonical form | Presentation |
//! |--------|------|----------------|--------------|
//! | [`ch_uid`] | `ch.uid` | `CHE` + 9 digits | `CHE-DDD.DDD.DDD` |
//! | [`mx_rfc`] | `mx.rfc` | name + date + optional serial | groups separated by a space |
//! | [`nz_bankaccount`] | `nz.bankaccount` | 16 digits | `BB-BBBB-AAAAAAA-SSS` |
//! | [`bitcoin`] | `bitcoin` | user case (Base58) / lower case (Bech32) | canonical form |
//!
//! ## Crate Policy
//!
//! - Validators are pure: no I/O, no shared mutable state.
//! - Every failure is an [`idnum_core::ValidationError`]; codec errors are
//!   mapped at the module boundary.
//! - No `.unwrap()` outside tests. Literal regex patterns compiled in
//!   `OnceLock` initializers use `.expect()`; their unit tests cover them.

/// Implement `Deserialize` for a validated newtype by routing the decoded
/// string through its `new()` constructor.
macro_rules! impl_validating_deserialize {
    ($ty:ident) => {
        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Self::new(raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

pub mod bitcoin;
pub mod ch_uid;
pub mod config;
pub mod mx_rfc;
pub mod nz_bankaccount;
pub mod registry;
pub mod traits;

pub use bitcoin::{Bitcoin, BitcoinAddress, Variant};
pub use ch_uid::{ChUid, SwissUid};
pub use config::{ConfigError, RegistryConfig, RfcConfig};
pub use mx_rfc::{Holder, MxRfc, Rfc};
pub use nz_bankaccount::{Algorithm, NzBankAccount, NzBankAccountNumber};
pub use registry::Registry;
pub use traits::NumberFormat;
