//! The artifact discovery pipeline.
//!
//! ```text
//! list packages -> filter packages -> enumerate binaries -> aggregate
//! ```
//!
//! A package-listing failure aborts immediately. Binary-listing failures are
//! collected and returned together once every lookup has finished.

use crate::aggregate::aggregate_with;
use crate::enumerate::enumerate;
use crate::filter::filter_packages_with_policy;
use crate::lister::{BinaryLister, PackageLister};
use crate::osc::OscClient;
use crate::{ObsError, Result};
use relx_core::{EmptyFilterPolicy, PackageFilterRule, PatternSet};
use relx_platform::OpContext;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Default ceiling on simultaneous binary lookups.
pub const DEFAULT_CONCURRENCY_LIMIT: usize = 10;

/// Default per-call timeout.
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(300);

/// Filter configuration for one pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Ordered package rules; first match wins.
    pub package_rules: Vec<PackageFilterRule>,
    /// Globs applied to the final artifact names. Empty keeps everything.
    pub binary_patterns: Vec<String>,
    /// Maximum number of binary lookups in flight.
    pub concurrency_limit: usize,
    /// Budget for each external call.
    pub operation_timeout: Duration,
    /// What an empty `package_rules` selects.
    pub empty_filter_policy: EmptyFilterPolicy,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            package_rules: Vec::new(),
            binary_patterns: Vec::new(),
            concurrency_limit: DEFAULT_CONCURRENCY_LIMIT,
            operation_timeout: DEFAULT_OPERATION_TIMEOUT,
            empty_filter_policy: EmptyFilterPolicy::Skip,
        }
    }
}

impl PipelineOptions {
    /// Set the package rules.
    #[must_use]
    pub fn with_package_rules(mut self, rules: Vec<PackageFilterRule>) -> Self {
        self.package_rules = rules;
        self
    }

    /// Set the final artifact patterns.
    #[must_use]
    pub fn with_binary_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.binary_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Set the concurrency limit.
    #[must_use]
    pub const fn with_concurrency_limit(mut self, limit: usize) -> Self {
        self.concurrency_limit = limit;
        self
    }

    /// Set the per-call timeout.
    #[must_use]
    pub const fn with_operation_timeout(mut self, timeout: Duration) -> Self {
        self.operation_timeout = timeout;
        self
    }

    /// Set the empty-rule-list policy.
    #[must_use]
    pub const fn with_empty_filter_policy(mut self, policy: EmptyFilterPolicy) -> Self {
        self.empty_filter_policy = policy;
        self
    }
}

/// Discovers the artifacts of a project.
pub struct ArtifactPipeline {
    packages: Arc<dyn PackageLister>,
    binaries: Arc<dyn BinaryLister>,
    options: PipelineOptions,
    binary_patterns: PatternSet,
}

impl ArtifactPipeline {
    /// Pipeline over the given listers.
    #[must_use]
    pub fn new(
        packages: Arc<dyn PackageLister>,
        binaries: Arc<dyn BinaryLister>,
        options: PipelineOptions,
    ) -> Self {
        let binary_patterns = PatternSet::new(&options.binary_patterns);
        Self {
            packages,
            binaries,
            options,
            binary_patterns,
        }
    }

    /// Pipeline using one `osc` client for both listings.
    #[must_use]
    pub fn with_osc(client: OscClient, options: PipelineOptions) -> Self {
        let client = Arc::new(client);
        Self::new(client.clone(), client, options)
    }

    /// Filter configuration.
    #[must_use]
    pub const fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Sorted, deduplicated artifact names of `project`.
    ///
    /// Cancelling `cancel` stops every in-flight lookup.
    ///
    /// With no package rules under [`EmptyFilterPolicy::Skip`] this returns
    /// an empty list without listing packages, so a broken `osc` setup or an
    /// unknown project is not detected in that configuration.
    ///
    /// # Errors
    /// Returns [`ObsError::ListPackages`] when the package listing fails,
    /// [`ObsError::Aggregate`] when any binary listing fails, and
    /// [`ObsError::InvalidConcurrency`] for a concurrency limit of zero.
    pub async fn list_artifacts(
        &self,
        cancel: &CancellationToken,
        project: &str,
    ) -> Result<Vec<String>> {
        if self.options.concurrency_limit == 0 {
            return Err(ObsError::InvalidConcurrency);
        }

        info!(%project, "starting artifact search");

        if self.options.package_rules.is_empty()
            && self.options.empty_filter_policy == EmptyFilterPolicy::Skip
        {
            info!("no package filter patterns configured, no packages to process");
            return Ok(Vec::new());
        }

        let ctx = OpContext::new(cancel.clone(), self.options.operation_timeout);

        let all = self
            .packages
            .list_packages(&ctx, project)
            .await
            .map_err(|e| ObsError::list_packages(project, e))?;
        debug!(%project, count = all.len(), "packages listed");

        let selected = filter_packages_with_policy(
            &all,
            &self.options.package_rules,
            self.options.empty_filter_policy,
        );
        info!(%project, count = selected.len(), "packages matching filter patterns");

        let binaries = enumerate(
            &ctx,
            project,
            &selected,
            Arc::clone(&self.binaries),
            self.options.concurrency_limit,
        )
        .await?;

        let artifacts = aggregate_with(binaries, &self.binary_patterns);
        info!(%project, count = artifacts.len(), "artifacts found");
        Ok(artifacts)
    }
}

impl fmt::Debug for ArtifactPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArtifactPipeline")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
