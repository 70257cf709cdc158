//! High-level lookup entry point
//!
//! Ties the pipeline together: parse the request terms, resolve and validate
//! configuration, invoke the external tool. Each call builds its own
//! [`ResolvedConfig`](crate::ResolvedConfig), which is dropped (and its
//! password zeroized) as soon as the call returns. Concurrent lookups are
//! independent; nothing here is shared or cached.

use std::collections::HashMap;

use kplookup_core::{LookupRequest, Result};

use crate::config::{ConfigResolver, VariableKeys};
use crate::invoker::Invoker;

/// A credential lookup against a KeePass database via `keepassxc-cli`.
pub struct Lookup {
    resolver: ConfigResolver,
    invoker: Invoker,
}

impl Lookup {
    /// A lookup using the default variable vocabulary and the real binary.
    #[must_use]
    pub fn new() -> Self {
        Self::with_keys(VariableKeys::default())
    }

    /// A lookup reading the given variable key table.
    #[must_use]
    pub fn with_keys(keys: VariableKeys) -> Self {
        Self {
            resolver: ConfigResolver::new(keys),
            invoker: Invoker::new(),
        }
    }

    /// Replace the invoker, e.g. to set a timeout or override the binary.
    #[must_use]
    pub fn with_invoker(mut self, invoker: Invoker) -> Self {
        self.invoker = invoker;
        self
    }

    /// Run one lookup: `terms` as described on
    /// [`LookupRequest::parse`], `variables` as the externally supplied
    /// configuration layer. Returns the requested attribute value, trimmed.
    pub async fn run(
        &self,
        terms: &[String],
        variables: &HashMap<String, String>,
    ) -> Result<String> {
        let request = LookupRequest::parse(terms)?;
        let config = self.resolver.resolve(variables)?;
        self.invoker.invoke(&config, &request).await
    }
}

impl Default for Lookup {
    fn default() -> Self {
        Self::new()
    }
}
