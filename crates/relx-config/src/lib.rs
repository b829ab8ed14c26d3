//! Configuration management for relx.
//!
//! Configuration is a single JSON file. The first file found wins:
//!
//! 1. `--config <path>`
//! 2. `$RELX_CONFIG_FILE`
//! 3. User config directory (`~/.config/relx/config.json` on Linux)
//! 4. System config (`/etc/relx/config.json`)
//!
//! When no file exists the built-in defaults apply. A file that exists but
//! cannot be read, parsed or validated is always an error.
//!
//! ```json
//! {
//!     "obs_api_url": "https://api.opensuse.org",
//!     "package_filter_patterns": [
//!         {"pattern": "000product*", "repository": "images"}
//!     ],
//!     "binary_filter_patterns": ["*.iso", "*.qcow2"],
//!     "operation_timeout_seconds": 300,
//!     "max_concurrent_lookups": 10
//! }
//! ```
//!
//! # Quick Start
//!
//! ```no_run
//! use relx_config::ConfigLoader;
//!
//! let (config, source) = ConfigLoader::new()
//!     .resolve_or_default()
//!     .expect("failed to load config");
//! println!("loaded from {source}: {} rules", config.package_filter_patterns.len());
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod loader;
pub mod types;
pub mod validate;

pub use error::{ConfigError, Result};
pub use loader::{
    CONFIG_ENV_VAR, CONFIG_FILE_NAME, ConfigLoader, ConfigSource, load_file, parse_str,
};
pub use types::{
    DEFAULT_MAX_CONCURRENT_LOOKUPS, DEFAULT_OPERATION_TIMEOUT_SECS, DEFAULT_OSC_COMMAND,
    RelxConfig,
};
pub use validate::{Severity, ValidationIssue, ValidationResult, Validator};

/// Prelude module for common imports.
pub mod prelude {
    pub use crate::error::{ConfigError, Result};
    pub use crate::loader::{ConfigLoader, ConfigSource};
    pub use crate::types::RelxConfig;
    pub use crate::validate::Validator;
}
