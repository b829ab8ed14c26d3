//! Cancellable, deadline-bound operation context.

use crate::{PlatformError, Result};
use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Context handed to every external call.
///
/// Carries the caller's cancellation token and the per-call timeout. Each
/// [`OpContext::bound`] call starts a fresh timeout; the budget is never
/// shared between calls.
#[derive(Debug, Clone)]
pub struct OpContext {
    token: CancellationToken,
    timeout: Duration,
}

impl OpContext {
    /// Create a context tied to `token`.
    #[must_use]
    pub const fn new(token: CancellationToken, timeout: Duration) -> Self {
        Self { token, timeout }
    }

    /// Create a context with its own, never-cancelled token.
    #[must_use]
    pub fn detached(timeout: Duration) -> Self {
        Self::new(CancellationToken::new(), timeout)
    }

    /// Cancellation token.
    #[must_use]
    pub const fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Per-call timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Whether cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Run `fut` until it completes, the timeout elapses, or the token fires.
    ///
    /// The future is dropped on timeout or cancellation, so resources it owns
    /// (such as a child process spawned with `kill_on_drop`) are released.
    ///
    /// # Errors
    /// Returns [`PlatformError::Cancelled`] or [`PlatformError::Timeout`].
    pub async fn bound<F>(&self, operation: &str, fut: F) -> Result<F::Output>
    where
        F: Future,
    {
        if self.token.is_cancelled() {
            return Err(PlatformError::Cancelled {
                operation: operation.to_string(),
            });
        }

        tokio::select! {
            biased;
            () = self.token.cancelled() => Err(PlatformError::Cancelled {
                operation: operation.to_string(),
            }),
            out = tokio::time::timeout(self.timeout, fut) => out.map_err(|_| PlatformError::Timeout {
                operation: operation.to_string(),
                timeout_secs: self.timeout.as_secs(),
            }),
        }
    }
}
