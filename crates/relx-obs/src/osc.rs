//! Listers backed by the `osc` command-line client.

use crate::lister::{BinaryLister, PackageLister};
use crate::{ObsError, Result};
use ahash::AHashSet;
use async_trait::async_trait;
use relx_platform::{CommandRunner, CommandSpec, OpContext};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Default `osc` program.
pub const DEFAULT_OSC_PROGRAM: &str = "osc";

/// OBS client shelling out to `osc`.
///
/// Implements both [`PackageLister`] and [`BinaryLister`]. Every call runs
/// one `osc` process through the injected [`CommandRunner`].
#[derive(Clone)]
pub struct OscClient {
    runner: Arc<dyn CommandRunner>,
    program: String,
    api_url: String,
}

impl OscClient {
    /// Client running `osc` against its configured default API.
    #[must_use]
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            runner,
            program: DEFAULT_OSC_PROGRAM.to_string(),
            api_url: String::new(),
        }
    }

    /// Use a different `osc` program.
    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        let program = program.into();
        if !program.trim().is_empty() {
            self.program = program;
        }
        self
    }

    /// Pass `-A <url>` on every call. Empty keeps `osc`'s default.
    #[must_use]
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// API URL passed to `osc`, empty for its default.
    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn base_command(&self) -> CommandSpec {
        let spec = CommandSpec::new(&self.program);
        if self.api_url.is_empty() {
            spec
        } else {
            spec.args(["-A", self.api_url.as_str()])
        }
    }

    /// `osc [-A url] ls <project>`
    #[must_use]
    pub fn packages_command(&self, project: &str) -> CommandSpec {
        self.base_command().args(["ls", project])
    }

    /// `osc [-A url] ls -b <project> <package> [-r <repository>]`
    #[must_use]
    pub fn binaries_command(&self, project: &str, package: &str, repository: &str) -> CommandSpec {
        let spec = self.base_command().args(["ls", "-b", project, package]);
        if repository.is_empty() {
            spec
        } else {
            spec.args(["-r", repository])
        }
    }
}

impl fmt::Debug for OscClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OscClient")
            .field("program", &self.program)
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl PackageLister for OscClient {
    async fn list_packages(&self, ctx: &OpContext, project: &str) -> Result<Vec<String>> {
        let spec = self.packages_command(project);
        debug!(%project, "listing packages");

        let output = self
            .runner
            .run(ctx, &spec)
            .await
            .map_err(|source| ObsError::Command {
                command: format!("{} ls", self.program),
                subject: format!("project '{project}'"),
                source,
            })?;

        let packages = parse_packages(&output.stdout_str());
        trace!(%project, count = packages.len(), "packages listed");
        Ok(packages)
    }
}

#[async_trait]
impl BinaryLister for OscClient {
    async fn list_binaries(
        &self,
        ctx: &OpContext,
        project: &str,
        package: &str,
        repository: &str,
    ) -> Result<Vec<String>> {
        let spec = self.binaries_command(project, package, repository);
        debug!(%package, %repository, "listing binaries");

        let output = self
            .runner
            .run(ctx, &spec)
            .await
            .map_err(|source| ObsError::Command {
                command: format!("{} ls -b", self.program),
                subject: format!("package '{package}'"),
                source,
            })?;

        let binaries = parse_binaries(&output.stdout_str());
        trace!(%package, count = binaries.len(), "binaries listed");
        Ok(binaries)
    }
}

/// Package names from `osc ls` output: one per line, trimmed, blanks dropped.
#[must_use]
pub fn parse_packages(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Artifact names from `osc ls -b` output.
///
/// Artifacts are the indented lines; unindented lines are `repo/arch`
/// headers. Names starting with `_` are build metadata (`_buildenv`,
/// `_statistics`) and are skipped. Duplicates across architectures are
/// reported once, in first-seen order.
#[must_use]
pub fn parse_binaries(stdout: &str) -> Vec<String> {
    let mut seen = AHashSet::new();
    stdout
        .lines()
        .filter(|line| line.starts_with(' ') && !line.starts_with(" _"))
        .map(str::trim)
        .filter(|name| !name.is_empty() && seen.insert(*name))
        .map(str::to_string)
        .collect()
}
