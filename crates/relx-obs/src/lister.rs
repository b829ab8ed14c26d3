//! Lister seams between the pipeline and the build service.

use crate::Result;
use async_trait::async_trait;
use relx_platform::OpContext;

/// Lists the packages of a project.
#[async_trait]
pub trait PackageLister: Send + Sync {
    /// Package names of `project`, trimmed, without blank entries.
    async fn list_packages(&self, ctx: &OpContext, project: &str) -> Result<Vec<String>>;
}

/// Lists the published binaries of a package.
#[async_trait]
pub trait BinaryLister: Send + Sync {
    /// Binary artifact names of `package` in `project`.
    ///
    /// An empty `repository` means the build service's default.
    async fn list_binaries(
        &self,
        ctx: &OpContext,
        project: &str,
        package: &str,
        repository: &str,
    ) -> Result<Vec<String>>;
}
