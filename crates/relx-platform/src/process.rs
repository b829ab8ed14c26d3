//! Process spawning for external command-line tools.
//!
//! Callers describe a command with [`CommandSpec`] and hand it to a
//! [`CommandRunner`]. [`ProcessRunner`] is the real implementation; tests
//! substitute their own runner to script the tool's output.

use crate::{OpContext, PlatformError, Result};
use async_trait::async_trait;
use std::fmt;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, trace};

/// Description of a command to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Program to execute.
    program: String,
    /// Arguments.
    args: Vec<String>,
}

impl CommandSpec {
    /// Create a new command spec.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Add an argument.
    #[must_use]
    pub fn arg(mut self, arg: impl AsRef<str>) -> Self {
        self.args.push(arg.as_ref().to_string());
        self
    }

    /// Add multiple arguments.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Program name.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments, in order.
    #[must_use]
    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    /// Whether `needle` appears as a contiguous run of arguments.
    #[must_use]
    pub fn has_args(&self, needle: &[&str]) -> bool {
        needle.is_empty()
            || self
                .args
                .windows(needle.len())
                .any(|w| w.iter().zip(needle).all(|(a, b)| a == b))
    }

    fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        cmd
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Output from a completed process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when terminated by a signal.
    pub code: Option<i32>,
    /// Captured stdout.
    pub stdout: Vec<u8>,
    /// Captured stderr.
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    /// Successful output with the given stdout, for scripted runners.
    #[must_use]
    pub fn from_stdout(stdout: impl Into<Vec<u8>>) -> Self {
        Self {
            code: Some(0),
            stdout: stdout.into(),
            stderr: Vec::new(),
        }
    }

    /// Check if process succeeded (exit code 0).
    #[must_use]
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Get stdout as string.
    #[must_use]
    pub fn stdout_str(&self) -> String {
        String::from_utf8_lossy(&self.stdout).to_string()
    }

    /// Get stderr as string.
    #[must_use]
    pub fn stderr_str(&self) -> String {
        String::from_utf8_lossy(&self.stderr).to_string()
    }

    /// Convert to Result, returning Err if process failed.
    ///
    /// # Errors
    /// Returns [`PlatformError::ProcessFailed`] carrying stderr, or stdout
    /// when stderr is empty.
    pub fn into_result(self, command: &str) -> Result<Self> {
        if self.success() {
            return Ok(self);
        }

        let stderr = self.stderr_str();
        let message = if stderr.trim().is_empty() {
            self.stdout_str()
        } else {
            stderr
        };

        Err(PlatformError::ProcessFailed {
            command: command.to_string(),
            code: self.code.unwrap_or(-1),
            stderr: message.trim().to_string(),
        })
    }
}

impl From<std::process::Output> for CommandOutput {
    fn from(output: std::process::Output) -> Self {
        Self {
            code: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        }
    }
}

/// Runs external commands.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `spec` to completion within `ctx`, capturing its output.
    ///
    /// # Errors
    /// Fails when the process cannot be spawned, exits non-zero, times out or
    /// is cancelled.
    async fn run(&self, ctx: &OpContext, spec: &CommandSpec) -> Result<CommandOutput>;
}

/// [`CommandRunner`] backed by `tokio::process`.
///
/// Children are spawned with `kill_on_drop`, so a call abandoned through
/// timeout or cancellation terminates its process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    /// Create a new runner.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, ctx: &OpContext, spec: &CommandSpec) -> Result<CommandOutput> {
        let command = spec.to_string();
        debug!(%command, "running command");

        let child = spec
            .build_command()
            .spawn()
            .map_err(|e| PlatformError::spawn_failed(spec.program(), e.to_string()))?;

        let output = ctx
            .bound(&command, child.wait_with_output())
            .await?
            .map_err(|e| PlatformError::Process(e.to_string()))?;

        let output = CommandOutput::from(output);
        trace!(
            %command,
            code = ?output.code,
            stdout_bytes = output.stdout.len(),
            "command finished"
        );

        output.into_result(&command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn command_spec_builder() {
        let spec = CommandSpec::new("osc")
            .args(["-A", "https://api.example.org"])
            .arg("ls")
            .arg("home:user");

        assert_eq!(spec.program(), "osc");
        assert_eq!(
            spec.arguments(),
            ["-A", "https://api.example.org", "ls", "home:user"]
        );
        assert_eq!(spec.to_string(), "osc -A https://api.example.org ls home:user");
    }

    #[test]
    fn command_spec_has_args() {
        let spec = CommandSpec::new("osc").args(["ls", "-b", "P", "pkg", "-r", "repo1"]);
        assert!(spec.has_args(&["ls", "-b"]));
        assert!(spec.has_args(&["-r", "repo1"]));
        assert!(!spec.has_args(&["-b", "ls"]));
        assert!(spec.has_args(&[]));
    }

    #[test]
    fn failed_output_prefers_stderr() {
        let output = CommandOutput {
            code: Some(2),
            stdout: b"partial".to_vec(),
            stderr: b"boom\n".to_vec(),
        };
        let err = output.into_result("osc ls").unwrap_err();
        assert_eq!(
            err,
            PlatformError::ProcessFailed {
                command: "osc ls".into(),
                code: 2,
                stderr: "boom".into(),
            }
        );
    }

    #[test]
    fn failed_output_falls_back_to_stdout() {
        let output = CommandOutput {
            code: None,
            stdout: b"only stdout".to_vec(),
            stderr: Vec::new(),
        };
        let err = output.into_result("osc ls").unwrap_err();
        assert!(matches!(err, PlatformError::ProcessFailed { code: -1, ref stderr, .. } if stderr == "only stdout"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn run_captures_stdout() {
        let ctx = OpContext::detached(Duration::from_secs(10));
        let spec = CommandSpec::new("sh").args(["-c", "printf 'a\\nb\\n'"]);

        let output = ProcessRunner::new().run(&ctx, &spec).await.unwrap();

        assert!(output.success());
        assert_eq!(output.stdout_str(), "a\nb\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn run_reports_exit_code() {
        let ctx = OpContext::detached(Duration::from_secs(10));
        let spec = CommandSpec::new("sh").args(["-c", "echo nope >&2; exit 3"]);

        let err = ProcessRunner::new().run(&ctx, &spec).await.unwrap_err();

        assert!(
            matches!(err, PlatformError::ProcessFailed { code: 3, ref stderr, .. } if stderr == "nope")
        );
    }

    #[tokio::test]
    async fn run_missing_program() {
        let ctx = OpContext::detached(Duration::from_secs(10));
        let spec = CommandSpec::new("relx-nonexistent-command-12345");

        let err = ProcessRunner::new().run(&ctx, &spec).await.unwrap_err();

        assert!(matches!(err, PlatformError::SpawnFailed { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn run_times_out_and_returns_promptly() {
        let ctx = OpContext::detached(Duration::from_millis(100));
        let spec = CommandSpec::new("sleep").arg("30");
        let start = Instant::now();

        let err = ProcessRunner::new().run(&ctx, &spec).await.unwrap_err();

        assert!(matches!(err, PlatformError::Timeout { .. }));
        assert!(start.elapsed() < Duration::from_secs(10));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn run_cancelled() {
        let ctx = OpContext::detached(Duration::from_secs(60));
        let token = ctx.token().clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            token.cancel();
        });

        let err = ProcessRunner::new()
            .run(&ctx, &CommandSpec::new("sleep").arg("30"))
            .await
            .unwrap_err();

        assert!(matches!(err, PlatformError::Cancelled { .. }));
    }
}
