//! Core domain types, errors, and constants for the `kplookup` workspace.
//!
//! This crate establishes the foundational data structures and error handling
//! used by the resolver and the CLI binary.
//!
//! ## Key Components
//!
//! - **`errors`**: Defines the primary `Error` enum and `Result` type alias,
//!   centralizing all failure modes of a lookup (malformed request, missing
//!   configuration, subprocess failures) for predictable error handling.
//! - **`types`**: Domain-specific wrappers like [`LookupRequest`],
//!   [`CommandArguments`], and [`MasterPassword`] that enforce invariants at
//!   the type level, most importantly that the master password is never
//!   printed and is wiped once a lookup finishes.
//! - **`constants`**: Shared static constants such as the external binary
//!   name and the environment-variable fallbacks.

pub mod constants;
pub mod errors;
pub mod types;

pub use self::{
    errors::{Error, Result},
    types::*,
};
