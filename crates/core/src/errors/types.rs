//! Core error type definitions

use std::path::PathBuf;
use std::time::Duration;

/// Result type alias for kplookup operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for kplookup operations using thiserror
///
/// Every variant is terminal for the lookup that produced it: there is no
/// retry and no fallback value anywhere in the pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed lookup request (missing, empty, or extra terms)
    RequestFormat { message: String },

    /// Missing or invalid configuration values
    Configuration { message: String },

    /// Shell expansion of a configured path failed, e.g. it referenced an
    /// undefined variable
    ShellExpansion { value: String, message: String },

    /// A configured path does not name an existing regular file after
    /// expansion and canonicalization
    FileNotFound { role: &'static str, path: PathBuf },

    /// The external tool could not be started at all
    Invocation {
        command: String,
        args: Vec<String>,
        #[source]
        source: std::io::Error,
    },

    /// The external tool ran but exited non-zero
    ExternalTool {
        command: String,
        args: Vec<String>,
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
    },

    /// The external tool did not finish within the configured deadline
    Timeout { command: String, duration: Duration },
}
