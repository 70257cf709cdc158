//! Domain types for credential lookups
//!
//! Newtype wrappers that keep the lookup pipeline honest: argument vectors
//! are built through [`CommandArguments`], requests are validated once into
//! [`LookupRequest`], and the master password only ever exists inside
//! [`MasterPassword`].

mod commands;
mod request;
mod security;

pub use commands::CommandArguments;
pub use request::{LookupRequest, RequestedAttribute};
pub use security::MasterPassword;
