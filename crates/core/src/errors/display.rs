//! Display implementations for error types
//!
//! The rendered command line is always the argv only; the master password
//! travels over stdin and can never end up in an error message.

use super::types::Error;
use std::fmt;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::RequestFormat { message } => {
                write!(f, "invalid lookup request: {message}")
            }
            Error::Configuration { message } => {
                write!(f, "configuration error: {message}")
            }
            Error::ShellExpansion { value, message } => {
                write!(f, "failed to expand value '{value}': {message}")
            }
            Error::FileNotFound { role, path } => {
                write!(f, "{} file '{}' not found", role, path.display())
            }
            Error::Invocation {
                command,
                args,
                source,
            } => {
                write!(
                    f,
                    "failed to start '{} {}': {}",
                    command,
                    args.join(" "),
                    source
                )
            }
            Error::ExternalTool {
                command,
                args,
                exit_code,
                stdout,
                stderr,
            } => {
                match exit_code {
                    Some(code) => write!(
                        f,
                        "command '{} {}' returned non-zero exit status {}.",
                        command,
                        args.join(" "),
                        code
                    )?,
                    None => write!(
                        f,
                        "command '{} {}' was terminated by a signal.",
                        command,
                        args.join(" ")
                    )?,
                }
                write!(f, "\nSTDOUT: {stdout}\nSTDERR: {stderr}")
            }
            Error::Timeout { command, duration } => {
                write!(f, "command '{command}' timed out after {duration:?}")
            }
        }
    }
}
