//! Secure handling of the database master password

use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// The database master password, zeroized on drop.
///
/// `Debug` is redacted, so the value cannot leak through error chains or
/// tracing output. The raw bytes are only reachable through
/// [`MasterPassword::stdin_payload`], at the point they are written to the
/// child process.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct MasterPassword(String);

impl MasterPassword {
    /// Wrap a resolved master password.
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// The password bytes with the trailing newline `keepassxc-cli` expects
    /// on its standard input. The buffer zeroizes itself on drop, so the
    /// bytes are wiped even when the invocation is abandoned mid-flight.
    #[must_use]
    pub fn stdin_payload(&self) -> Zeroizing<Vec<u8>> {
        let mut payload = Vec::with_capacity(self.0.len() + 1);
        payload.extend_from_slice(self.0.as_bytes());
        payload.push(b'\n');
        Zeroizing::new(payload)
    }
}

impl fmt::Debug for MasterPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MasterPassword(<redacted>)")
    }
}
