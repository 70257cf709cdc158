//! Command construction and outcome classification
//!
//! One lookup maps to one `keepassxc-cli show` invocation. The argument
//! order is the external tool's fixed CLI grammar and must not change:
//! `show -a <attribute> <database> <entry> [--key-file <path>]`. The master
//! password travels over stdin only, never in the argv.

use std::time::Duration;

use kplookup_core::{constants, CommandArguments, Error, LookupRequest, Result};

use crate::config::ResolvedConfig;
use crate::executor::{CommandExecutor, CommandExecutorFactory};

/// Runs the external tool for a validated request and configuration.
///
/// There are no retries: re-running with a wrong password or a missing
/// entry cannot succeed and may trigger lockout behavior in the tool.
pub struct Invoker {
    binary: String,
    timeout: Option<Duration>,
    executor: Box<dyn CommandExecutor>,
}

impl Invoker {
    /// An invoker running the real `keepassxc-cli` from `PATH`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_executor(CommandExecutorFactory::system())
    }

    /// An invoker running through a custom executor.
    #[must_use]
    pub fn with_executor(executor: Box<dyn CommandExecutor>) -> Self {
        Self {
            binary: constants::KEEPASSXC_CLI_BIN.to_string(),
            timeout: None,
            executor,
        }
    }

    /// Override the external binary (mainly for tests and packaged installs
    /// that place the tool outside `PATH`).
    #[must_use]
    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }

    /// Abort the subprocess call after `timeout`. The default is no
    /// timeout, matching the tool's interactive expectations.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn build_args(config: &ResolvedConfig, request: &LookupRequest) -> CommandArguments {
        let mut args = CommandArguments::new();
        args.push(constants::SHOW_SUBCOMMAND);
        args.push(constants::ATTRIBUTE_FLAG);
        args.push(request.shown_attribute());
        args.push(config.database().to_string_lossy().into_owned());
        args.push(request.entry());
        if let Some(key_file) = config.key_file() {
            args.extend([
                constants::KEY_FILE_FLAG.to_string(),
                key_file.to_string_lossy().into_owned(),
            ]);
        }
        args
    }

    /// Execute the external tool and classify the outcome.
    ///
    /// Exit code zero yields the trimmed stdout; a non-zero exit yields an
    /// [`Error::ExternalTool`] carrying the exit code, the argv, and both
    /// captured streams.
    pub async fn invoke(&self, config: &ResolvedConfig, request: &LookupRequest) -> Result<String> {
        let args = Self::build_args(config, request);
        tracing::debug!(
            command = %self.binary,
            args = %args.display_line(),
            "executing external tool"
        );

        let stdin = config.password().stdin_payload();
        let execution = self.executor.execute(&self.binary, &args, stdin);
        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, execution)
                .await
                .map_err(|_| Error::timeout(self.binary.as_str(), limit))??,
            None => execution.await?,
        };

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        if output.status.success() {
            let stdout = String::from_utf8(output.stdout).map_err(|e| {
                Error::configuration(format!("command output is not valid UTF-8: {e}"))
            })?;
            tracing::debug!("external tool succeeded");
            Ok(stdout.trim().to_string())
        } else {
            let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
            tracing::warn!(
                exit_code = ?output.status.code(),
                %stderr,
                "external tool failed"
            );
            Err(Error::external_tool(
                self.binary.as_str(),
                args.into_inner(),
                output.status.code(),
                stdout,
                stderr,
            ))
        }
    }
}

impl Default for Invoker {
    fn default() -> Self {
        Self::new()
    }
}
