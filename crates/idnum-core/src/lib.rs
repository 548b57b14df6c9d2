//! # idnum-core: Foundational Primitives for Identifier Validation
//!
//! This crate is the leaf of the `idnum` workspace. It holds everything the
//! per-kind validators share and nothing that is specific to one identifier
//! standard.
//!
//! ## Key Design Principles
//!
//! 1. **One closed error taxonomy.** [`ValidationError`] has exactly four
//!    variants. Every validator reports through it; codec failures are mapped
//!    onto it at the kind boundary and never leak.
//!
//! 2. **Single `Kind` enum.** One definition of the supported identifier
//!    standards, exhaustive `match` everywhere. Adding a kind forces every
//!    consumer to handle it.
//!
//! 3. **Normalization is separate from validation.** [`normalize::compact()`]
//!    never fails; structural checks happen afterwards on the canonical form.
//!
//! 4. **No shared mutable state.** The only long-lived data are immutable
//!    reference tables, published through `OnceLock`.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `idnum-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests. The one exception is
//!   `.expect()` on a literal regex pattern compiled inside a `OnceLock`
//!   initializer; every such pattern is exercised by unit tests.

pub mod checksum;
pub mod codec;
pub mod error;
pub mod kind;
pub mod lookup;
pub mod normalize;
pub mod refdata;

// Re-export primary types for ergonomic imports.
pub use error::{CodecError, ErrorCategory, RefDataError, UnknownKind, ValidationError};
pub use kind::{Kind, KIND_COUNT};
pub use lookup::{InMemoryLookup, LookupClient, LookupError};
pub use normalize::CasePolicy;
pub use refdata::{Attributes, PrefixTable};
