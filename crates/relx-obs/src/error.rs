//! Artifact discovery errors.

use relx_platform::PlatformError;
use std::fmt;
use thiserror::Error;

/// Errors from listing packages and binaries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ObsError {
    /// An external command failed.
    #[error("failed to run '{command}' for {subject}: {source}")]
    Command {
        /// Short form of the command, e.g. `osc ls -b`.
        command: String,
        /// What the command was about, e.g. `package 'foo'`.
        subject: String,
        /// Underlying failure.
        source: PlatformError,
    },

    /// The package listing failed; nothing was enumerated.
    #[error("failed to list packages for project {project}: {source}")]
    ListPackages {
        /// Project being listed.
        project: String,
        /// Underlying failure.
        source: Box<ObsError>,
    },

    /// Binary listing failed for one package.
    #[error("failed to list binaries for package '{package}': {source}")]
    ListBinaries {
        /// Package being listed.
        package: String,
        /// Underlying failure.
        source: Box<ObsError>,
    },

    /// A binary lookup task panicked.
    #[error("binary lookup for package '{package}' panicked")]
    TaskPanicked {
        /// Package the task was listing.
        package: String,
    },

    /// One or more binary lookups failed.
    #[error(transparent)]
    Aggregate(#[from] AggregateError),

    /// A concurrency limit of zero would never schedule anything.
    #[error("concurrency limit must be at least 1")]
    InvalidConcurrency,

    /// Lister-specific failure.
    #[error("{0}")]
    Backend(String),
}

impl ObsError {
    /// Wrap a package-listing failure.
    #[must_use]
    pub fn list_packages(project: impl Into<String>, source: Self) -> Self {
        Self::ListPackages {
            project: project.into(),
            source: Box::new(source),
        }
    }

    /// Wrap a binary-listing failure.
    #[must_use]
    pub fn list_binaries(package: impl Into<String>, source: Self) -> Self {
        Self::ListBinaries {
            package: package.into(),
            source: Box::new(source),
        }
    }

    /// Whether this error, or every error it aggregates, comes from
    /// cancellation.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        match self {
            Self::Command { source, .. } => matches!(source, PlatformError::Cancelled { .. }),
            Self::ListPackages { source, .. } | Self::ListBinaries { source, .. } => {
                source.is_cancelled()
            }
            Self::Aggregate(agg) => {
                !agg.errors.is_empty() && agg.errors.iter().all(Self::is_cancelled)
            }
            _ => false,
        }
    }
}

/// Every binary-listing failure of one enumeration.
///
/// Entries are sorted by their message so the text is stable regardless of
/// which task failed first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateError {
    errors: Vec<ObsError>,
}

impl AggregateError {
    /// Collect `errors`, sorted by message.
    #[must_use]
    pub fn new(mut errors: Vec<ObsError>) -> Self {
        errors.sort_by_cached_key(ToString::to_string);
        Self { errors }
    }

    /// Individual failures.
    #[must_use]
    pub fn errors(&self) -> &[ObsError] {
        &self.errors
    }

    /// Number of failures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Whether no failures were collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Consume into the individual failures.
    #[must_use]
    pub fn into_errors(self) -> Vec<ObsError> {
        self.errors
    }
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("multiple errors occurred while listing binaries: [")?;
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{err}")?;
        }
        f.write_str("]")
    }
}

impl std::error::Error for AggregateError {}

/// Result type for artifact discovery.
pub type Result<T> = std::result::Result<T, ObsError>;
