//! `az` command execution
//!
//! Runs one `az` invocation at a time to completion, capturing stdout for
//! JSON decoding and classifying stderr on failure.

use super::error::{AzError, classify_az_error};
use super::types::parse_records;
use crate::config::AzConfig;
use serde::de::DeserializeOwned;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Runner for the `az` program
#[derive(Debug, Clone)]
pub struct AzCli {
    program: String,
    /// Arguments placed before every argument list (e.g. a wrapper script)
    leading_args: Vec<String>,
    timeout: Option<Duration>,
}

impl AzCli {
    /// Runner for `program` with no leading arguments and no timeout
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            leading_args: Vec::new(),
            timeout: None,
        }
    }

    /// Runner built from the `az` section of the run configuration
    pub fn from_config(config: &AzConfig) -> Self {
        Self {
            program: config.program.clone(),
            leading_args: config.leading_args.clone(),
            timeout: config.command_timeout,
        }
    }

    pub fn with_leading_args(mut self, args: Vec<String>) -> Self {
        self.leading_args = args;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Render the full command line for display
    pub fn render(&self, args: &[&str]) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.leading_args.iter().map(String::as_str))
            .chain(args.iter().copied())
            .map(shell_quote)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run `az` with `args` and return its stdout.
    ///
    /// # Returns
    /// * `Ok(stdout)` if the command exited 0
    /// * `Err(AzError)` classified from stderr on non-zero exit, or on
    ///   spawn failure or timeout
    pub async fn run(&self, args: &[&str]) -> Result<Vec<u8>, AzError> {
        let rendered = self.render(args);
        info!(command = %rendered, "Running az");

        let output = Command::new(&self.program)
            .args(&self.leading_args)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output();

        let output = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, output).await {
                Ok(result) => result,
                Err(_) => {
                    // kill_on_drop reaps the child once the future is dropped
                    warn!(command = %rendered, timeout_secs = limit.as_secs(), "Command timed out, killing process");
                    return Err(AzError::TimedOut {
                        command: rendered,
                        secs: limit.as_secs(),
                    });
                }
            },
            None => output.await,
        }
        .map_err(|source| AzError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        if output.status.success() {
            debug!(command = %rendered, bytes = output.stdout.len(), "Command succeeded");
            return Ok(output.stdout);
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        debug!(
            command = %rendered,
            exit_code = ?output.status.code(),
            stderr = %stderr.trim(),
            "Command failed"
        );
        Err(classify_az_error(&stderr))
    }

    /// Run `az` and decode its stdout as a list of `T`, skipping malformed
    /// elements.
    pub async fn run_list<T: DeserializeOwned>(
        &self,
        args: &[&str],
        kind: &'static str,
    ) -> Result<Vec<T>, AzError> {
        let stdout = self.run(args).await?;
        Ok(parse_records(&stdout, kind)?)
    }

    /// Run `az` for its side effect only.
    pub async fn run_unit(&self, args: &[&str]) -> Result<(), AzError> {
        self.run(args).await.map(|_| ())
    }
}

/// Single-quote an argument if the shell would split or expand it.
fn shell_quote(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=@,+%".contains(c));
    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', "'\\''"))
    }
}
