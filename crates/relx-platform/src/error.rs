//! Platform-specific error types.

use thiserror::Error;

/// Platform operation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// Process spawn failed.
    #[error("failed to spawn process '{command}': {reason}")]
    SpawnFailed {
        /// Command that failed.
        command: String,
        /// Failure reason.
        reason: String,
    },

    /// Process exited with non-zero status.
    #[error("process exited with code {code}: {stderr}")]
    ProcessFailed {
        /// Command that failed.
        command: String,
        /// Exit code, `-1` when killed by a signal.
        code: i32,
        /// Standard error output.
        stderr: String,
    },

    /// Process error while waiting for output.
    #[error("process error: {0}")]
    Process(String),

    /// The operation did not finish within its budget.
    #[error("{operation} timed out after {timeout_secs}s")]
    Timeout {
        /// What was running.
        operation: String,
        /// Budget in seconds.
        timeout_secs: u64,
    },

    /// The operation was cancelled before it finished.
    #[error("{operation} was cancelled")]
    Cancelled {
        /// What was running.
        operation: String,
    },

    /// Signal handling error.
    #[error("signal error: {0}")]
    Signal(String),
}

impl PlatformError {
    /// Create a spawn failed error.
    #[must_use]
    pub fn spawn_failed(command: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SpawnFailed {
            command: command.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for platform operations.
pub type Result<T> = std::result::Result<T, PlatformError>;
