//! Configuration model.

use relx_core::{EmptyFilterPolicy, PackageFilterRule};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default per-call timeout for external tools.
pub const DEFAULT_OPERATION_TIMEOUT_SECS: u64 = 300;

/// Default ceiling on simultaneous binary lookups.
pub const DEFAULT_MAX_CONCURRENT_LOOKUPS: usize = 10;

/// Default OBS command-line client.
pub const DEFAULT_OSC_COMMAND: &str = "osc";

/// relx configuration, as stored in `config.json`.
///
/// Every field is optional in the file. Unknown keys are ignored so a file
/// shared with other release tooling still loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelxConfig {
    /// OBS API URL passed to `osc -A`. Empty uses osc's own default.
    pub obs_api_url: String,

    /// Program used to talk to OBS.
    pub osc_command: String,

    /// Ordered package rules; first match wins.
    pub package_filter_patterns: Vec<PackageFilterRule>,

    /// Globs applied to the final artifact names. Empty keeps everything.
    pub binary_filter_patterns: Vec<String>,

    /// Per-call timeout in seconds; `0` means the default.
    pub operation_timeout_seconds: u64,

    /// Maximum number of binary lookups in flight.
    pub max_concurrent_lookups: usize,

    /// What an empty `package_filter_patterns` selects.
    pub empty_package_filter: EmptyFilterPolicy,
}

impl Default for RelxConfig {
    fn default() -> Self {
        Self {
            obs_api_url: String::new(),
            osc_command: DEFAULT_OSC_COMMAND.to_string(),
            package_filter_patterns: Vec::new(),
            binary_filter_patterns: Vec::new(),
            operation_timeout_seconds: DEFAULT_OPERATION_TIMEOUT_SECS,
            max_concurrent_lookups: DEFAULT_MAX_CONCURRENT_LOOKUPS,
            empty_package_filter: EmptyFilterPolicy::Skip,
        }
    }
}

impl RelxConfig {
    /// Per-call timeout for external tools.
    #[must_use]
    pub const fn operation_timeout(&self) -> Duration {
        if self.operation_timeout_seconds == 0 {
            Duration::from_secs(DEFAULT_OPERATION_TIMEOUT_SECS)
        } else {
            Duration::from_secs(self.operation_timeout_seconds)
        }
    }

    /// Fill in defaults for values that mean "unset".
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.operation_timeout_seconds == 0 {
            self.operation_timeout_seconds = DEFAULT_OPERATION_TIMEOUT_SECS;
        }
        if self.osc_command.trim().is_empty() {
            self.osc_command = DEFAULT_OSC_COMMAND.to_string();
        }
        self
    }
}
