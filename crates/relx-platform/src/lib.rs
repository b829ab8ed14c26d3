//! Process execution and signal handling for relx.
//!
//! Everything that touches the operating system lives here: spawning the
//! external tools the listers shell out to, bounding each call with a
//! cancellation token and a timeout, and turning Ctrl-C into cancellation.

#![deny(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod context;
pub mod error;
pub mod process;
pub mod signal;

pub use context::OpContext;
pub use error::{PlatformError, Result};
pub use process::{CommandOutput, CommandRunner, CommandSpec, ProcessRunner};
pub use signal::shutdown_token;
pub use tokio_util::sync::CancellationToken;
