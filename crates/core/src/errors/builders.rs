//! Builder methods for creating errors with context

use super::types::Error;
use std::path::PathBuf;
use std::time::Duration;

// Helper methods for creating errors with context
impl Error {
    /// Create a request format error
    #[must_use]
    pub fn request_format(message: impl Into<String>) -> Self {
        Error::RequestFormat {
            message: message.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// Create a shell expansion error
    #[must_use]
    pub fn shell_expansion(value: impl Into<String>, message: impl Into<String>) -> Self {
        Error::ShellExpansion {
            value: value.into(),
            message: message.into(),
        }
    }

    /// Create a file-not-found error, naming which of the configured paths
    /// failed validation
    #[must_use]
    pub fn file_not_found(role: &'static str, path: impl Into<PathBuf>) -> Self {
        Error::FileNotFound {
            role,
            path: path.into(),
        }
    }

    /// Create an invocation error for a subprocess that could not be started
    #[must_use]
    pub fn invocation(command: impl Into<String>, args: Vec<String>, source: std::io::Error) -> Self {
        Error::Invocation {
            command: command.into(),
            args,
            source,
        }
    }

    /// Create an external tool error for a subprocess that exited non-zero
    #[must_use]
    pub fn external_tool(
        command: impl Into<String>,
        args: Vec<String>,
        exit_code: Option<i32>,
        stdout: impl Into<String>,
        stderr: impl Into<String>,
    ) -> Self {
        Error::ExternalTool {
            command: command.into(),
            args,
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// Create a timeout error
    #[must_use]
    pub fn timeout(command: impl Into<String>, duration: Duration) -> Self {
        Error::Timeout {
            command: command.into(),
            duration,
        }
    }
}
