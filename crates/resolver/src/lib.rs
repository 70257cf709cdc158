//! Configuration resolution and external-tool invocation for kplookup
//!
//! This crate implements the lookup pipeline: a caller-supplied variable map
//! and the process environment are resolved into a validated
//! [`ResolvedConfig`], the request terms are parsed, and `keepassxc-cli` is
//! invoked with the master password streamed over stdin. Each lookup is a
//! single synchronous subprocess call with no caching and no retries.
//!
//! ## Key Components
//!
//! - **`config`**: layered configuration lookup with precedence rules and
//!   filesystem validation, parameterized by a [`VariableKeys`] table.
//! - **`executor`**: the [`CommandExecutor`] seam over subprocess execution,
//!   so invocation logic can be tested without the real binary.
//! - **`invoker`**: command construction and outcome classification.
//! - **`lookup`**: the high-level [`Lookup`] entry point tying it together.

mod config;
mod executor;
mod invoker;
mod lookup;

pub use config::{ConfigResolver, ResolvedConfig, VariableKeys};
pub use executor::{CommandExecutor, CommandExecutorFactory, SystemCommandExecutor};
pub use invoker::Invoker;
pub use lookup::Lookup;
