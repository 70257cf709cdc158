//! Subprocess execution behind a trait
//!
//! This abstraction allows invocation logic to be tested without the real
//! `keepassxc-cli` binary by providing different implementations for
//! production and test environments. The executor owns the only place where
//! secret bytes touch a child process: they are written to stdin, the pipe
//! is closed, and the buffer is wiped when it drops.

use async_trait::async_trait;
use kplookup_core::{CommandArguments, Error, Result};
#[cfg(test)]
use std::collections::HashMap;
use std::process::{Output, Stdio};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use zeroize::Zeroizing;

/// Trait for executing external commands
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Run `cmd` with `args`, write `stdin` to the child's standard input,
    /// close the input stream, and collect the full output. Blocks the
    /// caller until the child exits. The stdin buffer zeroizes on drop,
    /// including when the returned future is cancelled.
    async fn execute(
        &self,
        cmd: &str,
        args: &CommandArguments,
        stdin: Zeroizing<Vec<u8>>,
    ) -> Result<Output>;
}

/// Production implementation that spawns real processes
pub struct SystemCommandExecutor;

#[async_trait]
impl CommandExecutor for SystemCommandExecutor {
    async fn execute(
        &self,
        cmd: &str,
        args: &CommandArguments,
        stdin: Zeroizing<Vec<u8>>,
    ) -> Result<Output> {
        // kill_on_drop: if the caller abandons this future (a timeout), the
        // child holding the password must not keep running unattended.
        let spawned = Command::new(cmd)
            .args(args.as_slice())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn();

        let mut child = match spawned {
            Ok(child) => child,
            Err(e) => return Err(Error::invocation(cmd, args.as_slice().to_vec(), e)),
        };

        // Feed the password and close the pipe; the tool reads one line.
        // A broken pipe means the child exited before reading stdin; the
        // exit status collected below is the better diagnostic for that.
        if let Some(mut pipe) = child.stdin.take() {
            let written = pipe.write_all(&stdin).await;
            drop(stdin);
            match written {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {}
                Err(e) => return Err(Error::invocation(cmd, args.as_slice().to_vec(), e)),
            }
            drop(pipe);
        }

        child
            .wait_with_output()
            .await
            .map_err(|e| Error::invocation(cmd, args.as_slice().to_vec(), e))
    }
}

/// Test implementation that simulates command execution with canned
/// responses, keyed by the full command line. Captures the argv and stdin
/// payload of every call so tests can assert on them.
#[cfg(test)]
pub struct TestCommandExecutor {
    responses: std::sync::Mutex<HashMap<String, TestResponse>>,
    calls: std::sync::Mutex<Vec<RecordedCall>>,
}

#[cfg(test)]
#[derive(Clone)]
pub struct TestResponse {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub status_code: i32,
}

#[cfg(test)]
#[derive(Clone)]
pub struct RecordedCall {
    pub cmd: String,
    pub args: Vec<String>,
    pub stdin: Vec<u8>,
}

#[cfg(test)]
impl Default for TestCommandExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl TestCommandExecutor {
    pub fn new() -> Self {
        Self {
            responses: std::sync::Mutex::new(HashMap::new()),
            calls: std::sync::Mutex::new(Vec::new()),
        }
    }

    fn key(cmd: &str, args: &[String]) -> String {
        format!("{} {}", cmd, args.join(" "))
    }

    pub fn add_response(&self, cmd: &str, args: &[String], response: TestResponse) {
        self.responses
            .lock()
            .expect("test responses lock poisoned")
            .insert(Self::key(cmd, args), response);
    }

    pub fn add_simple_response(&self, cmd: &str, args: &[String], stdout: &str) {
        self.add_response(
            cmd,
            args,
            TestResponse {
                stdout: stdout.as_bytes().to_vec(),
                stderr: Vec::new(),
                status_code: 0,
            },
        );
    }

    pub fn add_error_response(&self, cmd: &str, args: &[String], status_code: i32, stderr: &str) {
        self.add_response(
            cmd,
            args,
            TestResponse {
                stdout: Vec::new(),
                stderr: stderr.as_bytes().to_vec(),
                status_code,
            },
        );
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("call log lock poisoned").clone()
    }
}

#[cfg(test)]
#[async_trait]
impl CommandExecutor for TestCommandExecutor {
    async fn execute(
        &self,
        cmd: &str,
        args: &CommandArguments,
        stdin: Zeroizing<Vec<u8>>,
    ) -> Result<Output> {
        self.calls
            .lock()
            .expect("call log lock poisoned")
            .push(RecordedCall {
                cmd: cmd.to_string(),
                args: args.as_slice().to_vec(),
                stdin: stdin.to_vec(),
            });

        let key = Self::key(cmd, args.as_slice());
        let responses = self
            .responses
            .lock()
            .expect("test responses lock poisoned");

        match responses.get(&key) {
            Some(response) => Ok(Output {
                status: exit_status::from_exit_code(response.status_code),
                stdout: response.stdout.clone(),
                stderr: response.stderr.clone(),
            }),
            None => Err(Error::configuration(format!(
                "no test response configured for command: {key}"
            ))),
        }
    }
}

/// Factory for creating command executors
pub struct CommandExecutorFactory;

impl CommandExecutorFactory {
    /// Create a production command executor
    #[must_use]
    pub fn system() -> Box<dyn CommandExecutor> {
        Box::new(SystemCommandExecutor)
    }

    /// Create a test command executor
    #[cfg(test)]
    pub fn test() -> TestCommandExecutor {
        TestCommandExecutor::new()
    }
}
