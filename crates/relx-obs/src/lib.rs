//! Artifact discovery for Open Build Service projects.
//!
//! Lists a project's packages, keeps those matching the configured rules,
//! lists each kept package's binaries with bounded concurrency, and returns
//! the sorted, deduplicated artifact names that pass the final filter.
//!
//! # Quick Start
//!
//! ```no_run
//! use relx_core::PackageFilterRule;
//! use relx_obs::{ArtifactPipeline, OscClient, PipelineOptions};
//! use relx_platform::{CancellationToken, ProcessRunner};
//! use std::sync::Arc;
//!
//! # async fn run() -> relx_obs::Result<()> {
//! let client = OscClient::new(Arc::new(ProcessRunner::new()));
//! let options = PipelineOptions::default()
//!     .with_package_rules(vec![PackageFilterRule::new("000product*", "images")])
//!     .with_binary_patterns(["*.iso"]);
//!
//! let pipeline = ArtifactPipeline::with_osc(client, options);
//! let artifacts = pipeline
//!     .list_artifacts(&CancellationToken::new(), "openSUSE:Factory")
//!     .await?;
//! for name in &artifacts {
//!     println!("{name}");
//! }
//! # Ok(())
//! # }
//! ```

#![deny(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregate;
pub mod enumerate;
pub mod error;
pub mod filter;
pub mod lister;
pub mod osc;
pub mod pipeline;

#[cfg(test)]
mod test_support;

pub use aggregate::{aggregate, aggregate_with};
pub use enumerate::enumerate;
pub use error::{AggregateError, ObsError, Result};
pub use filter::{filter_packages, filter_packages_with_policy};
pub use lister::{BinaryLister, PackageLister};
pub use osc::{OscClient, parse_binaries, parse_packages};
pub use pipeline::{
    ArtifactPipeline, DEFAULT_CONCURRENCY_LIMIT, DEFAULT_OPERATION_TIMEOUT, PipelineOptions,
};
