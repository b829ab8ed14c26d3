//! Cross-platform shutdown signal handling.
//!
//! - Unix: SIGINT, SIGTERM
//! - Windows: Ctrl+C

use crate::{PlatformError, Result};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Signals that request shutdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalKind {
    /// Interrupt (Ctrl+C on all platforms, SIGINT on Unix).
    Interrupt,
    /// Terminate (SIGTERM on Unix).
    Terminate,
}

impl SignalKind {
    /// Signal name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Interrupt => "SIGINT",
            Self::Terminate => "SIGTERM",
        }
    }
}

/// Wait for the next shutdown signal.
///
/// # Errors
/// Returns error if the signal handlers cannot be installed.
pub async fn wait_for_shutdown() -> Result<SignalKind> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind as UnixSignal, signal};

        let mut term = signal(UnixSignal::terminate())
            .map_err(|e| PlatformError::Signal(e.to_string()))?;

        tokio::select! {
            res = tokio::signal::ctrl_c() => {
                res.map_err(|e| PlatformError::Signal(e.to_string()))?;
                Ok(SignalKind::Interrupt)
            }
            _ = term.recv() => Ok(SignalKind::Terminate),
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c()
            .await
            .map_err(|e| PlatformError::Signal(e.to_string()))?;
        Ok(SignalKind::Interrupt)
    }
}

/// Token that is cancelled when the process receives a shutdown signal.
///
/// Must be called from within a Tokio runtime. The listener task ends when
/// the token is cancelled by any other means. If the signal handlers cannot
/// be installed the failure is logged and the token stays live.
#[must_use]
pub fn shutdown_token() -> CancellationToken {
    let token = CancellationToken::new();
    tokio::spawn(cancel_on(token.clone(), wait_for_shutdown()));
    token
}

async fn cancel_on<F>(token: CancellationToken, signal: F)
where
    F: Future<Output = Result<SignalKind>>,
{
    tokio::select! {
        () = token.cancelled() => {}
        res = signal => match res {
            Ok(kind) => {
                debug!(signal = kind.name(), "shutdown requested");
                token.cancel();
            }
            Err(e) => warn!(error = %e, "cannot listen for shutdown signals"),
        },
    }
}
